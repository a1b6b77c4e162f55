//! Property-based tests for the App state machine.
//!
//! Tests verify that invariants hold under arbitrary event sequences,
//! including resizes, focus changes, and pointer input anywhere on screen.

use std::time::Duration;

use keepsake_app::{Album, App, AppAction, AppConfig, AppEvent, KeyInput, Point};
use keepsake_core::Phase;
use keepsake_harness::{InvariantRegistry, SimEnv, SystemSnapshot};
use proptest::prelude::*;

/// Input plus the time to let pass before it.
#[derive(Debug, Clone, Copy)]
struct Timed {
    delay_ms: u64,
    event: AppEvent,
}

/// Generate random printable characters for input.
fn printable_char() -> impl Strategy<Value = char> {
    prop::char::range(' ', '~')
}

/// Generate random key inputs.
fn key_strategy() -> impl Strategy<Value = KeyInput> {
    prop_oneof![
        4 => printable_char().prop_map(KeyInput::Char),
        1 => Just(KeyInput::Enter),
        1 => Just(KeyInput::Backspace),
        1 => Just(KeyInput::Tab),
        3 => Just(KeyInput::Left),
        4 => Just(KeyInput::Right),
        1 => Just(KeyInput::Up),
        1 => Just(KeyInput::Down),
        1 => Just(KeyInput::Home),
        1 => Just(KeyInput::End),
    ]
}

fn point_strategy() -> impl Strategy<Value = Point> {
    (-20.0f64..1700.0, -20.0f64..900.0).prop_map(|(x, y)| Point::new(x, y))
}

/// Generate random app events.
fn event_strategy() -> impl Strategy<Value = AppEvent> {
    prop_oneof![
        8 => key_strategy().prop_map(AppEvent::Key),
        4 => Just(AppEvent::Tick),
        3 => point_strategy().prop_map(AppEvent::Click),
        2 => point_strategy().prop_map(AppEvent::PointerDown),
        2 => point_strategy().prop_map(AppEvent::PointerDrag),
        2 => point_strategy().prop_map(AppEvent::PointerUp),
        1 => (1u16..200, 1u16..100).prop_map(|(c, r)| AppEvent::Resize(c, r)),
        1 => any::<bool>().prop_map(AppEvent::Visibility),
    ]
}

fn timed_strategy() -> impl Strategy<Value = Timed> {
    (prop_oneof![3 => Just(0u64), 2 => 0u64..700], event_strategy())
        .prop_map(|(delay_ms, event)| Timed { delay_ms, event })
}

fn app(env: &SimEnv) -> App<SimEnv> {
    let mut app = App::new(env.clone(), Album::default(), AppConfig::default()).unwrap();
    app.start();
    app
}

/// Feed events, returning every action produced.
fn run(env: &SimEnv, app: &mut App<SimEnv>, events: &[Timed]) -> Vec<AppAction> {
    let mut actions = Vec::new();
    for timed in events {
        env.advance(Duration::from_millis(timed.delay_ms));
        actions.extend(app.handle(timed.event));
    }
    actions
}

proptest! {
    /// App invariants hold under arbitrary event sequences.
    #[test]
    fn invariants_hold_for_any_input(
        seed in any::<u64>(),
        events in prop::collection::vec(timed_strategy(), 0..150),
    ) {
        let env = SimEnv::with_seed(seed);
        let mut app = app(&env);
        let registry = InvariantRegistry::standard();

        for timed in &events {
            env.advance(Duration::from_millis(timed.delay_ms));
            app.handle(timed.event);

            let snapshot = SystemSnapshot::from_app(&app);
            if let Err(violations) = registry.check_all(&snapshot) {
                return Err(TestCaseError::fail(format!("{timed:?}: {violations:?}")));
            }
        }
    }

    /// Same seed and input give the same navigation, effects, and actions.
    #[test]
    fn replay_is_deterministic(
        seed in any::<u64>(),
        events in prop::collection::vec(timed_strategy(), 0..80),
    ) {
        let env_a = SimEnv::with_seed(seed);
        let env_b = SimEnv::with_seed(seed);
        let mut a = app(&env_a);
        let mut b = app(&env_b);

        let actions_a = run(&env_a, &mut a, &events);
        let actions_b = run(&env_b, &mut b, &events);

        prop_assert_eq!(actions_a, actions_b);
        prop_assert_eq!(a.navigator().dump_state(), b.navigator().dump_state());
        let effects_a = a.effects();
        let effects_b = b.effects();
        prop_assert_eq!(effects_a.live(), effects_b.live());
    }

    /// After enough quiet time every flip has settled.
    #[test]
    fn quiet_time_settles_navigation(
        events in prop::collection::vec(timed_strategy(), 0..80),
    ) {
        let env = SimEnv::default();
        let mut app = app(&env);
        run(&env, &mut app, &events);

        env.advance(Duration::from_secs(1));
        app.handle(AppEvent::Tick);

        prop_assert_eq!(app.navigator().phase(), Phase::Idle);
        let snapshot = SystemSnapshot::from_app(&app);
        prop_assert!(InvariantRegistry::standard().check_all(&snapshot).is_ok());
    }

    /// Layout regions always fit inside the terminal.
    #[test]
    fn layout_fits_terminal(cols in 1u16..300, rows in 1u16..120) {
        let env = SimEnv::default();
        let mut app = app(&env);
        app.handle(AppEvent::Resize(cols, rows));

        let layout = app.layout();
        for rect in [
            layout.book,
            layout.prev_button,
            layout.indicator,
            layout.next_button,
            layout.status,
        ] {
            prop_assert!(u32::from(rect.x) + u32::from(rect.width) <= u32::from(cols));
            prop_assert!(u32::from(rect.y) + u32::from(rect.height) <= u32::from(rows));
        }
    }
}
