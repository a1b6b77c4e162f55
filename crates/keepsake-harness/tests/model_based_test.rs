//! Model-based property tests.
//!
//! These tests generate random operation sequences and verify that the real
//! application behaves identically to the reference model.
//!
//! # Architecture
//!
//! ```text
//! proptest generates: Vec<Operation>
//!                          │
//!           ┌──────────────┼──────────────┐
//!           ▼              ▼              ▼
//!      ModelBook        App<SimEnv>    Compare
//!      (reference)      (scenario)     ObservableState
//! ```

use std::time::Duration;

use keepsake_app::{Album, App, AppConfig, Memory};
use keepsake_core::{NavigatorConfig, PageLabel};
use keepsake_harness::{
    InvariantRegistry, ModelBook, ModelOutcome, ObservableState, Operation, SimEnv,
    SystemSnapshot, Via, scenario,
};
use proptest::prelude::*;

const SETTLE: Duration = Duration::from_millis(600);

/// Real system wrapper that mirrors `ModelBook`'s interface.
struct RealBook {
    env: SimEnv,
    app: App<SimEnv>,
}

impl RealBook {
    fn new(album: Album, seed: u64) -> Self {
        let env = SimEnv::with_seed(seed);
        let config = AppConfig {
            navigator: NavigatorConfig { settle_delay: SETTLE },
            ..AppConfig::default()
        };
        let mut app = App::new(env.clone(), album, config).expect("non-empty album");
        app.start();
        Self { env, app }
    }

    fn apply(&mut self, op: &Operation) {
        scenario::apply(&mut self.app, &self.env, op);
    }

    fn snapshot(&self) -> SystemSnapshot {
        SystemSnapshot::from_app(&self.app)
    }

    fn observe(&self) -> ObservableState {
        ObservableState::from_snapshot(&self.snapshot())
    }
}

fn small_album(len: usize) -> Album {
    let pages = (0..len).map(|i| Memory::new(format!("Page {i}"), "")).collect();
    Album::new("Test", pages)
}

fn via_strategy() -> impl Strategy<Value = Via> {
    prop_oneof![
        Just(Via::Key),
        Just(Via::AltKey),
        Just(Via::Button),
        Just(Via::BookClick),
        Just(Via::Swipe),
    ]
}

fn operation_strategy(len: usize) -> impl Strategy<Value = Operation> {
    let max_target = u8::try_from(len + 3).unwrap_or(u8::MAX);
    prop_oneof![
        5 => via_strategy().prop_map(Operation::Advance),
        4 => via_strategy().prop_map(Operation::Retreat),
        1 => (0..=max_target).prop_map(Operation::JumpTo),
        1 => Just(Operation::Home),
        1 => Just(Operation::End),
        5 => (0u16..900).prop_map(Operation::Wait),
        1 => Just(Operation::ToggleEffects),
    ]
}

fn run_against_model(len: usize, seed: u64, ops: &[Operation]) -> Result<(), TestCaseError> {
    let mut model = ModelBook::new(len, SETTLE);
    let mut real = RealBook::new(small_album(len), seed);
    let registry = InvariantRegistry::standard();

    for (step, op) in ops.iter().enumerate() {
        model.apply(op);
        real.apply(op);

        let snapshot = real.snapshot();
        if let Err(violations) = registry.check_all(&snapshot) {
            return Err(TestCaseError::fail(format!(
                "step {step} ({op:?}) broke invariants: {violations:?}"
            )));
        }
        prop_assert_eq!(
            real.observe(),
            model.observe(),
            "diverged at step {} after {:?}",
            step,
            op
        );
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn app_matches_model(
        len in 1usize..8,
        seed in any::<u64>(),
        ops in prop::collection::vec(operation_strategy(8), 0..60),
    ) {
        run_against_model(len, seed, &ops)?;
    }

    #[test]
    fn default_album_matches_model(
        seed in any::<u64>(),
        ops in prop::collection::vec(operation_strategy(25), 0..120),
    ) {
        run_against_model(Album::default().len(), seed, &ops)?;
    }
}

#[test]
fn every_channel_turns_one_page() {
    for via in [Via::Key, Via::AltKey, Via::Button, Via::BookClick, Via::Swipe] {
        let mut model = ModelBook::new(3, SETTLE);
        let mut real = RealBook::new(small_album(3), 1);

        for op in [Operation::Advance(via), Operation::Wait(600)] {
            model.apply(&op);
            real.apply(&op);
        }
        assert_eq!(real.observe().index, 1, "{via:?} forward");
        assert_eq!(real.observe(), model.observe());

        for op in [Operation::Retreat(via), Operation::Wait(600)] {
            model.apply(&op);
            real.apply(&op);
        }
        assert_eq!(real.observe().index, 0, "{via:?} backward");
        assert_eq!(real.observe(), model.observe());
    }
}

#[test]
fn busy_flip_is_not_queued() {
    let mut model = ModelBook::new(4, SETTLE);
    let mut real = RealBook::new(small_album(4), 2);

    let ops = [
        Operation::Advance(Via::Key),
        Operation::Wait(100),
        Operation::Advance(Via::Swipe),
        Operation::Wait(500),
        Operation::Wait(600),
    ];
    let outcomes: Vec<_> = ops.iter().map(|op| model.apply(op)).collect();
    for op in &ops {
        real.apply(op);
    }

    assert_eq!(outcomes[2], ModelOutcome::Busy);
    assert_eq!(real.observe().index, 1);
    assert_eq!(real.observe().label, PageLabel::Memory(1));
    assert_eq!(real.observe(), model.observe());
}

#[test]
fn single_page_album_shows_cover_then_end() {
    let mut model = ModelBook::new(1, SETTLE);
    let mut real = RealBook::new(small_album(1), 3);
    assert_eq!(real.observe().label, PageLabel::Cover);

    for op in [Operation::Advance(Via::Button), Operation::Wait(600)] {
        model.apply(&op);
        real.apply(&op);
    }
    assert_eq!(real.observe().label, PageLabel::End);
    assert_eq!(real.observe(), model.observe());
}
