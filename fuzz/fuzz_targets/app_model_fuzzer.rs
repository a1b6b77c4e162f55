//! Fuzz target comparing the application against the reference book
//!
//! # Strategy
//!
//! - Every input channel: keys, buttons, book clicks, swipes
//! - Jumps, waits, and effect toggles interleaved with turns
//! - Arbitrary RNG seed for the decorative effects
//!
//! # Invariants
//!
//! - Navigation state matches `ModelBook` after every operation
//! - Standard invariants hold after every operation
//! - NEVER panic

#![no_main]

use arbitrary::Arbitrary;
use keepsake_app::{Album, App, AppConfig, Memory};
use keepsake_harness::{
    scenario, InvariantRegistry, ModelBook, ObservableState, Operation, SimEnv, SystemSnapshot,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    len: u8,
    seed: u64,
    ops: Vec<Operation>,
}

fuzz_target!(|input: Input| {
    let len = usize::from(input.len % 32) + 1;
    let pages = (0..len).map(|i| Memory::new(format!("Page {i}"), "")).collect();
    let config = AppConfig::default();
    let settle = config.navigator.settle_delay;

    let env = SimEnv::with_seed(input.seed);
    let Ok(mut app) = App::new(env.clone(), Album::new("Fuzz", pages), config) else {
        panic!("non-empty album rejected");
    };
    app.start();
    let mut model = ModelBook::new(len, settle);
    let registry = InvariantRegistry::standard();

    for op in &input.ops {
        model.apply(op);
        scenario::apply(&mut app, &env, op);

        let snapshot = SystemSnapshot::from_app(&app);
        if let Err(violations) = registry.check_all(&snapshot) {
            panic!("invariants broken after {op:?}: {violations:?}");
        }
        assert_eq!(ObservableState::from_snapshot(&snapshot), model.observe(), "after {op:?}");
    }
});
