//! Why an engine operation was turned down.
//!
//! A rejection is not a failure: the cycle is left exactly as it was and
//! the presentation layer is expected to have the matching affordance
//! disabled already.

use std::fmt;
use thiserror::Error;

use super::{ChoiceId, Phase};
use crate::domain::foundation::ErrorCode;

/// Engine operations, named for logs and rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SetSituationText,
    GenerateOptions,
    SetCustomText,
    Select,
    GenerateNextPreview,
    StartFreshCycle,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::SetSituationText => "set_situation_text",
            Operation::GenerateOptions => "generate_options",
            Operation::SetCustomText => "set_custom_text",
            Operation::Select => "select",
            Operation::GenerateNextPreview => "generate_next_preview",
            Operation::StartFreshCycle => "start_fresh_cycle",
        };
        write!(f, "{}", s)
    }
}

/// Reason an operation left the cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("{operation} is not allowed in the {phase} phase")]
    WrongPhase { operation: Operation, phase: Phase },

    #[error("{operation} requires non-blank {field}")]
    EmptyInput {
        operation: Operation,
        field: &'static str,
    },

    #[error("{operation} rejected: the change window has closed")]
    WindowClosed { operation: Operation },

    #[error("{operation} rejected: no selectable slot '{choice_id}'")]
    UnknownChoice {
        operation: Operation,
        choice_id: ChoiceId,
    },
}

impl Rejection {
    pub fn code(&self) -> ErrorCode {
        match self {
            Rejection::WrongPhase { .. } => ErrorCode::WrongPhase,
            Rejection::EmptyInput { .. } => ErrorCode::EmptyInput,
            Rejection::WindowClosed { .. } => ErrorCode::WindowClosed,
            Rejection::UnknownChoice { .. } => ErrorCode::UnknownChoice,
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            Rejection::WrongPhase { operation, .. }
            | Rejection::EmptyInput { operation, .. }
            | Rejection::WindowClosed { operation }
            | Rejection::UnknownChoice { operation, .. } => *operation,
        }
    }
}
