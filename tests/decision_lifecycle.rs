//! End-to-end lifecycle through the board service with a manual clock.

use std::sync::Arc;

use chrono::Duration;
use proptest::prelude::*;

use decision_graph::adapters::{InMemoryCycleStore, ManualClock, MockOptionSource};
use decision_graph::application::{BoardError, DecisionBoardService};
use decision_graph::domain::decision::record::{decode, encode};
use decision_graph::domain::decision::{
    ChoiceId, CycleState, DecisionEngine, Phase, Rejection, SelectionKind,
};
use decision_graph::domain::foundation::Timestamp;

fn t0() -> Timestamp {
    Timestamp::from_unix_millis(1_700_000_000_000).unwrap()
}

async fn open(store: &InMemoryCycleStore, clock: &ManualClock) -> DecisionBoardService {
    DecisionBoardService::open(
        DecisionEngine::default(),
        Arc::new(store.clone()),
        Arc::new(MockOptionSource::new()),
        Arc::new(clock.clone()),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn full_cycle_from_draft_to_next_preview() {
    let store = InMemoryCycleStore::new();
    let clock = ManualClock::new(t0());
    let service = open(&store, &clock).await;

    service.set_situation_text("new job offer").await.unwrap();
    let generated = service.generate_options().await.unwrap();
    assert_eq!(generated.phase, Phase::Generated);
    assert_eq!(generated.options.len(), 4);

    let selected = service
        .select(ChoiceId::slot(1), "Bold Quest", SelectionKind::Option)
        .await
        .unwrap();
    assert_eq!(selected.phase, Phase::Selected);
    assert_eq!(selected.lock_started_at, Some(t0()));

    clock.set(t0().plus_millis(130_000));
    service.tick().await.unwrap();
    let locked = service.snapshot().await;
    assert_eq!(locked.phase, Phase::Locked);
    assert!(locked.timers.is_change_window_closed);

    let rejected = service.set_custom_text("x").await;
    assert!(matches!(
        rejected,
        Err(BoardError::Rejected(Rejection::WindowClosed { .. }))
    ));
    assert_eq!(service.cycle().await.custom_text(), "");

    clock.set(t0().plus_millis(300_000));
    service.tick().await.unwrap();
    let revealed = service.cycle().await;
    assert_eq!(revealed.phase(), Phase::Revealed);
    assert!(revealed.reveal_displayed());

    let preview = service.generate_next_preview().await.unwrap();
    assert!(preview.next_cycle_options_generated);
    assert_eq!(preview.next_preview.len(), 4);
}

#[tokio::test]
async fn switching_inside_window_keeps_lock_start() {
    let store = InMemoryCycleStore::new();
    let clock = ManualClock::new(t0());
    let service = open(&store, &clock).await;
    service.set_situation_text("weekend plans").await.unwrap();
    service.generate_options().await.unwrap();
    service
        .select(ChoiceId::slot(1), "", SelectionKind::Option)
        .await
        .unwrap();

    clock.advance(Duration::seconds(100));
    let switched = service
        .select(ChoiceId::slot(4), "", SelectionKind::Option)
        .await
        .unwrap();

    assert_eq!(switched.lock_started_at, Some(t0()));
    assert_eq!(switched.selection.unwrap().text, "Quiet Study");
}

#[tokio::test]
async fn restart_mid_lock_resumes_from_persisted_clock() {
    let store = InMemoryCycleStore::new();
    let clock = ManualClock::new(t0());
    {
        let service = open(&store, &clock).await;
        service.set_situation_text("new job offer").await.unwrap();
        service.generate_options().await.unwrap();
        service
            .select(ChoiceId::slot(2), "", SelectionKind::Option)
            .await
            .unwrap();
    }

    clock.set(t0().plus_secs(200));
    let reopened = open(&store, &clock).await;
    let snapshot = reopened.snapshot().await;
    assert_eq!(snapshot.phase, Phase::Locked);
    assert_eq!(snapshot.lock_started_at, Some(t0()));

    clock.set(t0().plus_secs(3_600));
    let late = open(&store, &clock).await;
    let cycle = late.cycle().await;
    assert_eq!(cycle.phase(), Phase::Revealed);
    assert!(cycle.reveal_displayed());
}

#[tokio::test]
async fn select_before_generate_never_sets_selection() {
    let store = InMemoryCycleStore::new();
    let clock = ManualClock::new(t0());
    let service = open(&store, &clock).await;
    service.set_situation_text("new job offer").await.unwrap();

    let result = service
        .select(ChoiceId::slot(1), "Bold Quest", SelectionKind::Option)
        .await;

    assert!(matches!(
        result,
        Err(BoardError::Rejected(Rejection::WrongPhase {
            phase: Phase::Draft,
            ..
        }))
    ));
    assert!(service.cycle().await.selection().is_none());
}

#[tokio::test]
async fn fresh_cycle_starts_over_after_reveal() {
    let store = InMemoryCycleStore::new();
    let clock = ManualClock::new(t0());
    let service = open(&store, &clock).await;
    service.set_situation_text("day one").await.unwrap();
    service.generate_options().await.unwrap();
    service
        .select(ChoiceId::slot(3), "", SelectionKind::Option)
        .await
        .unwrap();
    clock.advance(Duration::minutes(6));

    let fresh = service.start_fresh_cycle().await.unwrap();

    assert_eq!(fresh.phase, Phase::Draft);
    assert!(fresh.selection.is_none());
    assert!(fresh.affordances.can_edit_situation);
    assert_eq!(service.cycle().await, CycleState::new());
}

// ───────────────────────────────────────────────────────────────
// Round-trip over reachable cycles
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Step {
    Situation(String),
    Generate,
    Custom(String),
    Select(usize),
    SelectCustom,
    Next,
    Fresh,
    Wait(i64),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        "[a-z ]{0,12}".prop_map(Step::Situation),
        Just(Step::Generate),
        "[a-z ]{0,12}".prop_map(Step::Custom),
        (1usize..6).prop_map(Step::Select),
        Just(Step::SelectCustom),
        Just(Step::Next),
        Just(Step::Fresh),
        (0i64..200_000).prop_map(Step::Wait),
    ]
}

proptest! {
    #[test]
    fn encode_then_restore_reproduces_reachable_cycles(
        steps in proptest::collection::vec(step(), 0..24)
    ) {
        let engine = DecisionEngine::default();
        let options = decision_graph::adapters::options::default_options();
        let mut state = CycleState::new();
        let mut now = t0();

        for step in steps {
            engine.tick(&mut state, now);
            let _ = match step {
                Step::Situation(text) => engine.set_situation_text(&mut state, text),
                Step::Generate => engine.generate_options(&mut state, options.clone()),
                Step::Custom(text) => engine.set_custom_text(&mut state, text, now),
                Step::Select(n) => {
                    engine.select(&mut state, ChoiceId::slot(n), "", SelectionKind::Option, now)
                }
                Step::SelectCustom => {
                    let text = state.custom_text().to_string();
                    engine.select(&mut state, ChoiceId::custom(), &text, SelectionKind::Custom, now)
                }
                Step::Next => engine.generate_next_preview(&mut state),
                Step::Fresh => engine.start_fresh_cycle(&mut state),
                Step::Wait(ms) => {
                    now = now.plus_millis(ms);
                    continue;
                }
            };
        }
        engine.tick(&mut state, now);
        prop_assert!(state.invariant_violation().is_none());

        let restored = engine.restore(decode(&encode(&state).unwrap()).unwrap(), now);
        prop_assert_eq!(restored, state);
    }
}
