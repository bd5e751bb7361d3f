//! DecisionBoardService - owner of the live decision cycle.
//!
//! Wraps the pure `DecisionEngine` with a clock, an option source and a
//! store. Each call ticks the cycle at the current instant, applies the
//! operation, persists the result and returns a fresh snapshot. Callers
//! never see a cycle that was changed but not saved.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::decision::record::{self, RecordError};
use crate::domain::decision::{
    BoardSnapshot, ChoiceId, CycleState, DecisionEngine, DecisionEvent, DecisionOption,
    Rejection, SelectionKind,
};
use crate::domain::foundation::{ErrorCode, Timestamp};
use crate::ports::{Clock, CycleStore, CycleStoreError, OptionSource};

/// Error type for board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The engine turned the operation down; nothing changed.
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error(transparent)]
    Storage(#[from] CycleStoreError),

    #[error(transparent)]
    Record(#[from] RecordError),
}

impl BoardError {
    pub fn code(&self) -> ErrorCode {
        match self {
            BoardError::Rejected(rejection) => rejection.code(),
            BoardError::Storage(err) => err.code(),
            BoardError::Record(err) => err.code(),
        }
    }
}

struct Board {
    state: CycleState,
    /// Next-cycle preview options. Regenerated, never persisted.
    preview: Vec<DecisionOption>,
}

/// Application service for the single decision board.
pub struct DecisionBoardService {
    engine: DecisionEngine,
    store: Arc<dyn CycleStore>,
    options: Arc<dyn OptionSource>,
    clock: Arc<dyn Clock>,
    board: Mutex<Board>,
}

impl DecisionBoardService {
    /// Loads the stored cycle, or starts a fresh Draft.
    ///
    /// An unreadable record, including one that is not valid UTF-8, is
    /// logged and replaced; the store is written before this returns so the
    /// next start sees the restored cycle.
    pub async fn open(
        engine: DecisionEngine,
        store: Arc<dyn CycleStore>,
        options: Arc<dyn OptionSource>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, BoardError> {
        let now = clock.now();

        let loaded = match store.load().await {
            Ok(raw) => raw.map(|raw| record::decode(&raw)),
            Err(CycleStoreError::InvalidEncoding(detail)) => {
                Some(Err(RecordError::Malformed(detail)))
            }
            Err(err) => return Err(err.into()),
        };

        let mut state = match loaded {
            None => {
                info!("no stored cycle, starting a fresh draft");
                CycleState::new()
            }
            Some(Ok(stored)) => {
                let state = engine.restore(stored, now);
                info!(phase = %state.phase(), "restored decision cycle");
                state
            }
            Some(Err(err)) => {
                warn!(code = %err.code(), error = %err, "discarding unreadable cycle record");
                CycleState::new()
            }
        };

        if state.options_generated() && state.options().is_empty() {
            let refill = options.generate(state.situation_text());
            if state.restore_missing_options(refill) {
                info!(count = state.options().len(), "refilled missing options");
            }
        }

        let mut board = Board {
            state,
            preview: Vec::new(),
        };
        refresh_preview(options.as_ref(), &mut board);

        let service = Self {
            engine,
            store,
            options,
            clock,
            board: Mutex::new(board),
        };
        {
            let board = service.board.lock().await;
            service.persist(&board.state).await?;
        }
        Ok(service)
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    /// Current snapshot without changing anything.
    pub async fn snapshot(&self) -> BoardSnapshot {
        let now = self.clock.now();
        let board = self.board.lock().await;
        self.engine.snapshot(&board.state, now, &board.preview)
    }

    /// Copy of the live cycle.
    pub async fn cycle(&self) -> CycleState {
        self.board.lock().await.state.clone()
    }

    /// Re-derives the phase at the current instant, persisting any change.
    pub async fn tick(&self) -> Result<Option<DecisionEvent>, BoardError> {
        let now = self.clock.now();
        let mut board = self.board.lock().await;

        let event = self.tick_board(&mut board, now);
        if event.is_some() {
            self.persist(&board.state).await?;
        }
        Ok(event)
    }

    pub async fn set_situation_text(&self, text: &str) -> Result<BoardSnapshot, BoardError> {
        self.apply(|engine, state, _| engine.set_situation_text(state, text))
            .await
    }

    /// Generates options from the situation text via the option source.
    pub async fn generate_options(&self) -> Result<BoardSnapshot, BoardError> {
        let options = Arc::clone(&self.options);
        self.apply(move |engine, state, _| {
            engine.ensure_can_generate(state)?;
            let generated = options.generate(state.situation_text());
            engine.generate_options(state, generated)
        })
        .await
    }

    pub async fn set_custom_text(&self, text: &str) -> Result<BoardSnapshot, BoardError> {
        self.apply(|engine, state, now| engine.set_custom_text(state, text, now))
            .await
    }

    pub async fn select(
        &self,
        choice_id: ChoiceId,
        text: &str,
        kind: SelectionKind,
    ) -> Result<BoardSnapshot, BoardError> {
        self.apply(|engine, state, now| engine.select(state, choice_id, text, kind, now))
            .await
    }

    /// Selects the custom slot with the current custom text.
    pub async fn select_custom(&self) -> Result<BoardSnapshot, BoardError> {
        self.apply(|engine, state, now| {
            let text = state.custom_text().to_string();
            engine.select(state, ChoiceId::custom(), &text, SelectionKind::Custom, now)
        })
        .await
    }

    pub async fn generate_next_preview(&self) -> Result<BoardSnapshot, BoardError> {
        self.apply(|engine, state, _| engine.generate_next_preview(state))
            .await
    }

    pub async fn start_fresh_cycle(&self) -> Result<BoardSnapshot, BoardError> {
        self.apply(|engine, state, _| engine.start_fresh_cycle(state))
            .await
    }

    async fn apply<F>(&self, operation: F) -> Result<BoardSnapshot, BoardError>
    where
        F: FnOnce(&DecisionEngine, &mut CycleState, Timestamp) -> Result<DecisionEvent, Rejection>,
    {
        let now = self.clock.now();
        let mut board = self.board.lock().await;
        let ticked = self.tick_board(&mut board, now).is_some();

        match operation(&self.engine, &mut board.state, now) {
            Ok(event) => {
                log_event(&event, &board.state);
                refresh_preview(self.options.as_ref(), &mut board);
                self.persist(&board.state).await?;
                Ok(self.engine.snapshot(&board.state, now, &board.preview))
            }
            Err(rejection) => {
                if ticked {
                    self.persist(&board.state).await?;
                }
                debug!(
                    operation = %rejection.operation(),
                    code = %rejection.code(),
                    phase = %board.state.phase(),
                    "operation rejected: {}",
                    rejection
                );
                Err(rejection.into())
            }
        }
    }

    fn tick_board(&self, board: &mut Board, now: Timestamp) -> Option<DecisionEvent> {
        let event = self.engine.tick(&mut board.state, now)?;
        log_event(&event, &board.state);
        Some(event)
    }

    async fn persist(&self, state: &CycleState) -> Result<(), BoardError> {
        let raw = record::encode(state)?;
        self.store.save(&raw).await?;
        Ok(())
    }
}

/// Keeps the preview in step with the cycle's flag.
fn refresh_preview(options: &dyn OptionSource, board: &mut Board) {
    if !board.state.next_cycle_options_generated() {
        board.preview.clear();
    } else if board.preview.is_empty() {
        board.preview = options.generate(board.state.situation_text());
    }
}

fn log_event(event: &DecisionEvent, state: &CycleState) {
    match event {
        DecisionEvent::PhaseChanged { from, to } => {
            info!(from = %from, to = %to, "phase changed");
        }
        DecisionEvent::ChoiceSelected {
            choice_id,
            kind,
            previous,
            ..
        } => {
            info!(
                choice_id = %choice_id,
                kind = %kind,
                switched = previous.is_some(),
                phase = %state.phase(),
                "choice selected"
            );
        }
        other => {
            info!(event = other.name(), phase = %state.phase(), "decision event");
        }
    }
}
