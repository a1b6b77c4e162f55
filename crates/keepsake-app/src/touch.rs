//! Press-drag-release gestures.
//!
//! A press that is released quickly without moving is a tap. A press that
//! moves far enough horizontally and little enough vertically is a swipe;
//! swiping towards the left advances.

use std::{ops::Sub, time::Duration};

use crate::{
    input::Intent,
    pointer::{GestureConfig, Point},
};

/// Classified gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Short press without movement, at the release point.
    Tap(Point),
    /// Horizontal swipe.
    Swipe(Intent),
}

#[derive(Debug, Clone, Copy)]
struct Press<I> {
    at: Point,
    started: I,
    moved: bool,
}

/// Tracks one press at a time.
#[derive(Debug, Clone)]
pub struct TouchAdapter<I> {
    config: GestureConfig,
    press: Option<Press<I>>,
}

impl<I> TouchAdapter<I>
where
    I: Copy + Ord + Sub<Output = Duration>,
{
    /// Create an adapter.
    pub fn new(config: GestureConfig) -> Self {
        Self { config, press: None }
    }

    /// Press down at `at`. Replaces any press still being tracked.
    pub fn start(&mut self, at: Point, now: I) {
        self.press = Some(Press { at, started: now, moved: false });
    }

    /// Pointer moved while pressed.
    pub fn moved(&mut self) {
        if let Some(press) = self.press.as_mut() {
            press.moved = true;
        }
    }

    /// Release at `at`, classifying the gesture.
    pub fn end(&mut self, at: Point, now: I) -> Option<Gesture> {
        let press = self.press.take()?;
        let held = if now > press.started { now - press.started } else { Duration::ZERO };

        if !press.moved {
            return (held < self.config.tap_max_duration).then_some(Gesture::Tap(at));
        }

        let dx = press.at.x - at.x;
        let dy = (press.at.y - at.y).abs();
        if dx.abs() > self.config.swipe_min_dx && dy < self.config.swipe_max_dy {
            let intent = if dx > 0.0 { Intent::Advance } else { Intent::Retreat };
            Some(Gesture::Swipe(intent))
        } else {
            None
        }
    }

    /// Whether a press is being tracked.
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Whether the current press has moved since it started.
    pub fn is_dragging(&self) -> bool {
        self.press.as_ref().is_some_and(|press| press.moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn adapter() -> TouchAdapter<Duration> {
        TouchAdapter::new(GestureConfig::default())
    }

    #[test]
    fn quick_still_press_is_tap() {
        let mut touch = adapter();
        let at = Point::new(10.0, 10.0);
        touch.start(at, ms(0));
        assert_eq!(touch.end(at, ms(299)), Some(Gesture::Tap(at)));
        assert!(!touch.is_pressed());
    }

    #[test]
    fn long_press_is_nothing() {
        let mut touch = adapter();
        touch.start(Point::new(10.0, 10.0), ms(0));
        assert_eq!(touch.end(Point::new(10.0, 10.0), ms(300)), None);
    }

    #[test]
    fn swipe_left_advances() {
        let mut touch = adapter();
        touch.start(Point::new(200.0, 50.0), ms(0));
        touch.moved();
        let gesture = touch.end(Point::new(100.0, 80.0), ms(1000));
        assert_eq!(gesture, Some(Gesture::Swipe(Intent::Advance)));
    }

    #[test]
    fn swipe_right_retreats() {
        let mut touch = adapter();
        touch.start(Point::new(100.0, 50.0), ms(0));
        touch.moved();
        let gesture = touch.end(Point::new(161.0, 50.0), ms(100));
        assert_eq!(gesture, Some(Gesture::Swipe(Intent::Retreat)));
    }

    #[test]
    fn short_or_steep_drags_are_ignored() {
        let mut touch = adapter();
        touch.start(Point::new(100.0, 50.0), ms(0));
        touch.moved();
        assert_eq!(touch.end(Point::new(160.0, 50.0), ms(100)), None);

        touch.start(Point::new(100.0, 0.0), ms(0));
        touch.moved();
        assert_eq!(touch.end(Point::new(300.0, 100.0), ms(100)), None);
    }

    #[test]
    fn drag_state_follows_press() {
        let mut touch = adapter();
        assert!(!touch.is_dragging());
        touch.start(Point::new(10.0, 10.0), ms(0));
        assert!(!touch.is_dragging());
        touch.moved();
        assert!(touch.is_dragging());
        touch.end(Point::new(12.0, 10.0), ms(50));
        assert!(!touch.is_dragging());
    }

    #[test]
    fn release_without_press_is_nothing() {
        let mut touch = adapter();
        touch.moved();
        assert_eq!(touch.end(Point::new(0.0, 0.0), ms(0)), None);
    }
}
