//! Property-based and scenario tests for the page navigator.
//!
//! Commands run against a virtual clock expressed as a `Duration` offset, so
//! every run is deterministic.

use std::time::Duration;

use keepsake_core::{
    NavigatorConfig, PageFace, PageLabel, PageMotion, PageNavigator, Phase, RejectKind,
    RejectReason,
};
use proptest::prelude::*;

const PAGES: usize = 25;
const SETTLE: Duration = Duration::from_millis(600);

fn navigator() -> PageNavigator<Duration> {
    PageNavigator::with_len(PAGES, NavigatorConfig { settle_delay: SETTLE })
        .expect("non-empty deck")
}

#[derive(Debug, Clone)]
enum Command {
    Advance,
    Retreat,
    JumpTo(usize),
    Wait(u64),
}

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        4 => Just(Command::Advance),
        3 => Just(Command::Retreat),
        1 => (0usize..=PAGES + 3).prop_map(Command::JumpTo),
        3 => (0u64..900).prop_map(Command::Wait),
    ]
}

/// Pages below the index are flipped, the rest unflipped, none flipping.
fn assert_idle_layout(nav: &PageNavigator<Duration>) {
    for page in nav.deck() {
        let flipped = page.index() < nav.current_index();
        let expected = if flipped { PageFace::Flipped } else { PageFace::Unflipped };
        assert_eq!(page.face(), expected, "page {} face", page.index());
        assert_eq!(page.motion(), PageMotion::Idle, "page {} motion", page.index());
    }
}

#[test]
fn reference_scenario() {
    let mut nav = navigator();
    let mut now = Duration::ZERO;

    nav.advance(now).expect("advance from cover");
    now += SETTLE;
    assert_eq!(nav.handle_tick(now), Some(1));
    assert_eq!(nav.current_label().to_string(), "memory(1)");

    nav.retreat(now).expect("retreat to cover");
    now += SETTLE;
    assert_eq!(nav.handle_tick(now), Some(0));
    assert_eq!(nav.current_label().to_string(), "cover");

    assert_eq!(nav.jump_to(PAGES), Ok(PAGES));
    assert_eq!(nav.current_label().to_string(), "end");
    assert_eq!(nav.phase(), Phase::Idle);

    let rejection = nav.advance(now).expect_err("advance at end");
    assert_eq!(rejection.kind(), RejectKind::OutOfBounds);
    assert_eq!(nav.current_index(), PAGES);
}

#[test]
fn advance_at_end_is_idempotent() {
    let mut nav = navigator();
    nav.jump_to(PAGES).expect("jump to end");
    let before = nav.dump_state();

    for i in 0..5 {
        let rejection = nav.advance(Duration::from_millis(i)).expect_err("at end");
        assert_eq!(rejection.reason, RejectReason::AtEnd);
        assert_eq!(nav.dump_state(), before);
    }
}

#[test]
fn retreat_at_cover_is_rejected() {
    let mut nav = navigator();
    let rejection = nav.retreat(Duration::ZERO).expect_err("at cover");
    assert_eq!(rejection.kind(), RejectKind::OutOfBounds);
    assert_eq!(nav.current_index(), 0);
}

#[test]
fn busy_rejection_leaves_in_flight_flip_intact() {
    let mut nav = navigator();
    nav.advance(Duration::ZERO).expect("first advance");

    let rejection = nav.advance(Duration::from_millis(300)).expect_err("second advance");
    assert_eq!(rejection.kind(), RejectKind::Busy);
    assert_eq!(nav.current_index(), 1);

    assert_eq!(nav.handle_tick(SETTLE), Some(1));
    assert_eq!(nav.current_index(), 1);
    assert_idle_layout(&nav);
}

#[test]
fn jump_label_matches_target() {
    for k in 0..=PAGES {
        let mut nav = navigator();
        nav.jump_to(k).expect("in range");
        let expected = match k {
            0 => PageLabel::Cover,
            PAGES => PageLabel::End,
            k => PageLabel::Memory(k),
        };
        assert_eq!(nav.current_label(), expected);
        assert_idle_layout(&nav);
    }
}

proptest! {
    #[test]
    fn prop_index_stays_in_bounds(commands in prop::collection::vec(command_strategy(), 0..80)) {
        let mut nav = navigator();
        let mut now = Duration::ZERO;

        for command in commands {
            match command {
                Command::Advance => { let _ = nav.advance(now); },
                Command::Retreat => { let _ = nav.retreat(now); },
                Command::JumpTo(k) => { let _ = nav.jump_to(k); },
                Command::Wait(ms) => {
                    now += Duration::from_millis(ms);
                    nav.handle_tick(now);
                },
            }

            prop_assert!(nav.current_index() <= PAGES);
            prop_assert!(nav.deck().flipping_count() <= 1);
            prop_assert_eq!(nav.deck().flipping_count() == 1, nav.is_animating());
        }

        now += SETTLE;
        nav.handle_tick(now);
        prop_assert_eq!(nav.phase(), Phase::Idle);
        assert_idle_layout(&nav);
    }

    #[test]
    fn prop_round_trip_restores_state(start in 0usize..PAGES) {
        let mut nav = navigator();
        nav.jump_to(start).expect("in range");
        let before = nav.dump_state();

        nav.advance(Duration::ZERO).expect("advance below end");
        nav.handle_tick(SETTLE);
        nav.retreat(SETTLE).expect("retreat above cover");
        nav.handle_tick(SETTLE * 2);

        prop_assert_eq!(nav.current_index(), start);
        prop_assert_eq!(nav.deck().pages()[start].face(), PageFace::Unflipped);
        prop_assert_eq!(nav.dump_state(), before);
    }

    #[test]
    fn prop_rejections_never_mutate(commands in prop::collection::vec(command_strategy(), 0..40)) {
        let mut nav = navigator();
        let mut now = Duration::ZERO;

        for command in commands {
            let before = nav.dump_state();
            let rejected = match command {
                Command::Advance => nav.advance(now).is_err(),
                Command::Retreat => nav.retreat(now).is_err(),
                Command::JumpTo(k) => nav.jump_to(k).is_err(),
                Command::Wait(ms) => {
                    now += Duration::from_millis(ms);
                    nav.handle_tick(now);
                    false
                },
            };
            if rejected {
                prop_assert_eq!(nav.dump_state(), before);
            }
        }
    }
}
