//! Translation of model operations into application input.

use std::time::Duration;

use keepsake_app::{App, AppAction, AppEvent, Bounds, Intent, KeyInput, Point};
use keepsake_core::Environment;

use crate::{Operation, SimEnv, Step, model::Via};

/// Input that reproduces `op` on `app`'s current layout.
///
/// Returns `None` for [`Operation::JumpTo`], which has no keyboard or pointer
/// form for arbitrary targets.
pub fn steps<E: Environment>(op: &Operation, app: &App<E>) -> Option<Vec<Step>> {
    let layout = app.layout();
    let cell = app.cell();
    let book = layout.book.to_bounds(cell);

    let steps = match *op {
        Operation::Advance(via) => {
            let button = center(&layout.next_button.to_bounds(cell));
            turn(via, KeyInput::Right, KeyInput::Char(' '), button, &book, 0.8)
        },
        Operation::Retreat(via) => {
            let button = center(&layout.prev_button.to_bounds(cell));
            turn(via, KeyInput::Left, KeyInput::Backspace, button, &book, 0.1)
        },
        Operation::JumpTo(_) => return None,
        Operation::Home => vec![Step::Event(AppEvent::Key(KeyInput::Home))],
        Operation::End => vec![Step::Event(AppEvent::Key(KeyInput::End))],
        Operation::Wait(ms) => vec![Step::Wait(Duration::from_millis(u64::from(ms)))],
        Operation::ToggleEffects => vec![Step::Event(AppEvent::Key(KeyInput::Char('t')))],
    };
    Some(steps)
}

/// Apply `op` directly to `app`, advancing `env` for waits.
pub fn apply(app: &mut App<SimEnv>, env: &SimEnv, op: &Operation) -> Vec<AppAction> {
    let Some(steps) = steps(op, app) else {
        if let Operation::JumpTo(target) = *op {
            let _ = app.apply(Intent::JumpTo(usize::from(target)));
        }
        return app.handle(AppEvent::Tick);
    };

    let mut actions = Vec::new();
    for step in steps {
        let event = match step {
            Step::Event(event) => event,
            Step::Wait(by) => {
                env.advance(by);
                AppEvent::Tick
            },
        };
        actions.extend(app.handle(event));
    }
    actions
}

/// `fraction` is the horizontal position on the book for a click, and where
/// a swipe starts.
fn turn(
    via: Via,
    key: KeyInput,
    alt_key: KeyInput,
    button: Point,
    book: &Bounds,
    fraction: f64,
) -> Vec<Step> {
    let at = |fx: f64| Point::new(book.left + book.width * fx, book.top + book.height * 0.5);
    match via {
        Via::Key => vec![Step::Event(AppEvent::Key(key))],
        Via::AltKey => vec![Step::Event(AppEvent::Key(alt_key))],
        Via::Button => vec![Step::Event(AppEvent::Click(button))],
        Via::BookClick => vec![Step::Event(AppEvent::Click(at(fraction)))],
        Via::Swipe => {
            // Forward swipes travel leftwards.
            let (from, to) = if fraction > 0.5 { (0.9, 0.1) } else { (0.1, 0.9) };
            vec![
                Step::Event(AppEvent::PointerDown(at(from))),
                Step::Event(AppEvent::PointerDrag(at(0.5))),
                Step::Event(AppEvent::PointerUp(at(to))),
            ]
        },
    }
}

fn center(bounds: &Bounds) -> Point {
    Point::new(bounds.left + bounds.width / 2.0, bounds.top + bounds.height / 2.0)
}
