//! Pointer geometry and the click adapter.
//!
//! Coordinates are in surface pixels. Terminal frontends convert cell
//! positions using a nominal cell size so that gesture thresholds keep the
//! same meaning on every host.

use std::{ops::Sub, time::Duration};

use crate::input::Intent;

/// A position on the host surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal offset from the left edge.
    pub x: f64,
    /// Vertical offset from the top edge.
    pub y: f64,
}

impl Point {
    /// Point at `(x, y)`.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle on the host surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Bounds {
    /// Whether `point` lies inside (edges inclusive on the left and top).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x < self.left + self.width
            && point.y >= self.top
            && point.y < self.top + self.height
    }
}

/// Thresholds shared by the pointer and touch adapters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Clicks right of this fraction of the surface width advance.
    pub advance_zone: f64,
    /// Two clicks within this window form a double click.
    pub double_click_window: Duration,
    /// Longest press still counted as a tap.
    pub tap_max_duration: Duration,
    /// Horizontal travel a swipe must exceed.
    pub swipe_min_dx: f64,
    /// Vertical travel a swipe must stay under.
    pub swipe_max_dy: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            advance_zone: 0.35,
            double_click_window: Duration::from_millis(400),
            tap_max_duration: Duration::from_millis(300),
            swipe_min_dx: 60.0,
            swipe_max_dy: 100.0,
        }
    }
}

/// Result of a click on the book surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickOutcome {
    /// Navigation requested by the click's zone.
    pub intent: Option<Intent>,
    /// This click completed a double click.
    pub double_click: bool,
}

/// Turns clicks on the book surface into intents.
///
/// A click in the right-hand part of the surface advances, anywhere else
/// retreats. Every click navigates; a second click inside the double-click
/// window additionally reports `double_click` and starts a fresh count.
#[derive(Debug, Clone)]
pub struct PointerAdapter<I> {
    config: GestureConfig,
    last_click: Option<I>,
}

impl<I> PointerAdapter<I>
where
    I: Copy + Ord + Sub<Output = Duration>,
{
    /// Create an adapter.
    pub fn new(config: GestureConfig) -> Self {
        Self { config, last_click: None }
    }

    /// Intent for a click at `at` on `surface`, without double-click tracking.
    pub fn zone_intent(&self, at: Point, surface: &Bounds) -> Option<Intent> {
        if !surface.contains(at) {
            return None;
        }
        if at.x - surface.left > surface.width * self.config.advance_zone {
            Some(Intent::Advance)
        } else {
            Some(Intent::Retreat)
        }
    }

    /// Register a click. Clicks outside `surface` are ignored entirely.
    pub fn click(&mut self, at: Point, surface: &Bounds, now: I) -> ClickOutcome {
        let Some(intent) = self.zone_intent(at, surface) else {
            return ClickOutcome::default();
        };

        let double_click = match self.last_click {
            Some(prev) if now >= prev && now - prev <= self.config.double_click_window => true,
            _ => false,
        };
        self.last_click = if double_click { None } else { Some(now) };

        ClickOutcome { intent: Some(intent), double_click }
    }

    /// Active thresholds.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn book() -> Bounds {
        Bounds { left: 100.0, top: 0.0, width: 200.0, height: 100.0 }
    }

    #[test]
    fn zones_split_at_thirty_five_percent() {
        let pointer: PointerAdapter<Duration> = PointerAdapter::new(GestureConfig::default());
        // 35% of 200 is 70.
        assert_eq!(pointer.zone_intent(Point::new(170.0, 50.0), &book()), Some(Intent::Retreat));
        assert_eq!(pointer.zone_intent(Point::new(171.0, 50.0), &book()), Some(Intent::Advance));
        assert_eq!(pointer.zone_intent(Point::new(100.0, 50.0), &book()), Some(Intent::Retreat));
        assert_eq!(pointer.zone_intent(Point::new(50.0, 50.0), &book()), None);
    }

    #[test]
    fn double_click_within_window() {
        let mut pointer = PointerAdapter::new(GestureConfig::default());
        let at = Point::new(250.0, 50.0);

        let first = pointer.click(at, &book(), ms(0));
        assert_eq!(first.intent, Some(Intent::Advance));
        assert!(!first.double_click);

        let second = pointer.click(at, &book(), ms(400));
        assert_eq!(second.intent, Some(Intent::Advance));
        assert!(second.double_click);

        // Count restarts after a double click.
        assert!(!pointer.click(at, &book(), ms(500)).double_click);
    }

    #[test]
    fn slow_clicks_are_single() {
        let mut pointer = PointerAdapter::new(GestureConfig::default());
        let at = Point::new(120.0, 50.0);

        pointer.click(at, &book(), ms(0));
        assert!(!pointer.click(at, &book(), ms(401)).double_click);
        assert!(pointer.click(at, &book(), ms(700)).double_click);
    }

    #[test]
    fn clicks_outside_are_ignored() {
        let mut pointer = PointerAdapter::new(GestureConfig::default());
        pointer.click(Point::new(150.0, 50.0), &book(), ms(0));

        let outside = pointer.click(Point::new(10.0, 10.0), &book(), ms(100));
        assert_eq!(outside, ClickOutcome::default());
        assert!(pointer.click(Point::new(150.0, 50.0), &book(), ms(200)).double_click);
    }
}
