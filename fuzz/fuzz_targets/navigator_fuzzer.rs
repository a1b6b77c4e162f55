//! Fuzz target for the page navigator state machine
//!
//! # Strategy
//!
//! - Deck sizes from a single page up to 64 pages
//! - Turn requests while idle, while animating, and at both covers
//! - Jumps to in-range and out-of-range targets
//! - Settle timers cancelled and resumed mid-flip
//! - Time advanced by arbitrary steps, including zero
//!
//! # Invariants
//!
//! - Index stays within `[0, N]`; never more than one page flipping
//! - Rejected requests leave the state byte-for-byte unchanged
//! - Once idle, pages before the index are flipped and the rest unflipped
//! - NEVER panic

#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use keepsake_core::{NavigatorConfig, PageNavigator, Phase};
use keepsake_harness::{InvariantRegistry, SystemSnapshot};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
enum NavOp {
    Advance,
    Retreat,
    JumpTo(u8),
    Wait(u16),
    CancelSettle,
    ResumeSettle,
}

#[derive(Debug, Arbitrary)]
struct Input {
    len: u8,
    settle_ms: u16,
    ops: Vec<NavOp>,
}

fuzz_target!(|input: Input| {
    let len = usize::from(input.len % 64) + 1;
    let settle_delay = Duration::from_millis(u64::from(input.settle_ms));
    let config = NavigatorConfig { settle_delay };
    let Ok(mut nav) = PageNavigator::<Duration>::with_len(len, config) else {
        panic!("non-empty deck rejected");
    };
    let registry = InvariantRegistry::standard();
    let mut now = Duration::ZERO;

    for op in input.ops {
        let before = nav.dump_state();
        let rejected = match op {
            NavOp::Advance => nav.advance(now).is_err(),
            NavOp::Retreat => nav.retreat(now).is_err(),
            NavOp::JumpTo(target) => nav.jump_to(usize::from(target)).is_err(),
            NavOp::Wait(ms) => {
                now += Duration::from_millis(u64::from(ms));
                nav.handle_tick(now);
                false
            },
            NavOp::CancelSettle => {
                nav.cancel_settle();
                false
            },
            NavOp::ResumeSettle => {
                nav.resume_settle(now);
                false
            },
        };

        if rejected {
            assert_eq!(nav.dump_state(), before, "rejection mutated state");
        }
        if let Err(violations) = registry.check_all(&SystemSnapshot::from_navigator(&nav)) {
            panic!("invariants broken after {op:?}: {violations:?}");
        }
    }

    // A paused flip still settles once resumed.
    nav.resume_settle(now);
    nav.handle_tick(now + nav.config().settle_delay);
    assert_eq!(nav.phase(), Phase::Idle);
});
