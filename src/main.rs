//! Interactive console board.
//!
//! Reads one command per line from stdin and prints the board snapshot as
//! JSON to stdout after each. Logs go to stderr.

use std::error::Error;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{info, warn};

use decision_graph::adapters::console::HELP;
use decision_graph::adapters::{
    ConsoleCommand, FileCycleStore, MockOptionSource, SystemClock,
};
use decision_graph::application::{
    BoardError, DecisionBoardService, TickScheduler, TickSchedulerConfig,
};
use decision_graph::config::AppConfig;
use decision_graph::domain::decision::{BoardSnapshot, DecisionEngine, SelectionKind};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    config.logging.init();

    let engine = DecisionEngine::new(config.timing.lock_timings()?);
    let store = FileCycleStore::new(config.storage.record_path());
    info!(path = %store.path().display(), "opening decision board");

    let service = Arc::new(
        DecisionBoardService::open(
            engine,
            Arc::new(store),
            Arc::new(MockOptionSource::new()),
            Arc::new(SystemClock),
        )
        .await?,
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = TickScheduler::new(
        Arc::clone(&service),
        TickSchedulerConfig::default().with_interval(config.timing.tick_interval()),
    );
    let ticker = tokio::spawn(async move { scheduler.run(shutdown_rx).await });

    print_snapshot(&service.snapshot().await)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match ConsoleCommand::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                eprintln!("{}", err);
                continue;
            }
        };

        let outcome = match command {
            ConsoleCommand::Quit => break,
            ConsoleCommand::Help => {
                println!("{}", HELP);
                continue;
            }
            ConsoleCommand::Status => Ok(service.snapshot().await),
            ConsoleCommand::Situation(text) => service.set_situation_text(&text).await,
            ConsoleCommand::Generate => service.generate_options().await,
            ConsoleCommand::Custom(text) => service.set_custom_text(&text).await,
            ConsoleCommand::Select(choice_id) => {
                service.select(choice_id, "", SelectionKind::Option).await
            }
            ConsoleCommand::SelectCustom => service.select_custom().await,
            ConsoleCommand::Next => service.generate_next_preview().await,
            ConsoleCommand::Fresh => service.start_fresh_cycle().await,
        };

        match outcome {
            Ok(snapshot) => print_snapshot(&snapshot)?,
            Err(BoardError::Rejected(rejection)) => {
                eprintln!("[{}] {}", rejection.code(), rejection);
            }
            Err(err) => {
                warn!(code = %err.code(), error = %err, "board operation failed");
                eprintln!("[{}] {}", err.code(), err);
            }
        }
    }

    let _ = shutdown_tx.send(true);
    ticker.await?;
    info!("decision board closed");
    Ok(())
}

fn print_snapshot(snapshot: &BoardSnapshot) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(snapshot)?);
    Ok(())
}
