//! Console command protocol for the interactive binary.
//!
//! One command per line. Arguments after the command word are taken
//! verbatim, so situation and custom text may contain spaces.

use thiserror::Error;

use crate::domain::decision::ChoiceId;

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// `situation <text>`
    Situation(String),
    /// `generate`
    Generate,
    /// `custom <text>`; an empty argument clears the draft.
    Custom(String),
    /// `select <choice-id>`; legacy ids are accepted.
    Select(ChoiceId),
    /// `select custom`
    SelectCustom,
    /// `next`
    Next,
    /// `fresh`
    Fresh,
    /// `status`
    Status,
    /// `help`
    Help,
    /// `quit` or `exit`
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Result<Self, ConsoleError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "" => Err(ConsoleError::Empty),
            "situation" => Ok(ConsoleCommand::Situation(rest.to_string())),
            "generate" => Ok(ConsoleCommand::Generate),
            "custom" => Ok(ConsoleCommand::Custom(rest.to_string())),
            "select" if rest.is_empty() => Err(ConsoleError::MissingArgument {
                command: "select",
                argument: "a choice id",
            }),
            "select" => {
                let choice_id = ChoiceId::parse(rest);
                if choice_id.is_custom() {
                    Ok(ConsoleCommand::SelectCustom)
                } else {
                    Ok(ConsoleCommand::Select(choice_id))
                }
            }
            "next" => Ok(ConsoleCommand::Next),
            "fresh" => Ok(ConsoleCommand::Fresh),
            "status" => Ok(ConsoleCommand::Status),
            "help" | "?" => Ok(ConsoleCommand::Help),
            "quit" | "exit" => Ok(ConsoleCommand::Quit),
            other => Err(ConsoleError::Unknown(other.to_string())),
        }
    }
}

pub const HELP: &str = "\
commands:
  situation <text>   edit the situation (draft only)
  generate           generate options
  custom <text>      edit the custom option text
  select <id>        select option-1 .. option-N
  select custom      select the custom text
  next               preview the next cycle's options (after reveal)
  fresh              start a new cycle (after reveal)
  status             print the board
  quit               exit";
