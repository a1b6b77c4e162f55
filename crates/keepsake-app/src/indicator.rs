//! Page indicator collaborator.

use keepsake_core::{HandlerResult, NavigationEvent, NavigatorView, PageLabel};

/// What the controls should offer after the last settle or rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordances {
    /// Label for the current index.
    pub label: PageLabel,
    /// Whether the previous-page control is enabled.
    pub can_retreat: bool,
    /// Whether the next-page control is enabled.
    pub can_advance: bool,
}

impl From<&NavigatorView> for Affordances {
    fn from(view: &NavigatorView) -> Self {
        Self {
            label: view.label(),
            can_retreat: view.can_retreat(),
            can_advance: view.can_advance(),
        }
    }
}

/// Keeps the indicator and button states in step with navigation.
///
/// Updated on `Settled` and `Rejected` only, so the label changes when a flip
/// lands rather than when it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    current: Affordances,
    updates: u64,
}

impl Indicator {
    /// Indicator showing `view`.
    pub fn new(view: &NavigatorView) -> Self {
        Self { current: view.into(), updates: 0 }
    }

    /// Navigator subscriber entry point.
    pub fn on_navigation(
        &mut self,
        event: &NavigationEvent,
        view: &NavigatorView,
    ) -> HandlerResult {
        if matches!(event, NavigationEvent::Started { .. }) {
            return Ok(());
        }
        self.current = view.into();
        self.updates += 1;
        Ok(())
    }

    /// Current affordances.
    pub fn affordances(&self) -> Affordances {
        self.current
    }

    /// Number of updates received.
    pub fn updates(&self) -> u64 {
        self.updates
    }
}

#[cfg(test)]
mod tests {
    use keepsake_core::Direction;

    use super::*;

    fn view(current_index: usize) -> NavigatorView {
        NavigatorView { current_index, len: 25, is_animating: false }
    }

    #[test]
    fn follows_settles_not_starts() {
        let mut indicator = Indicator::new(&view(0));
        assert_eq!(
            indicator.affordances(),
            Affordances { label: PageLabel::Cover, can_retreat: false, can_advance: true }
        );

        let started = NavigationEvent::Started { direction: Direction::Forward, from: 0, to: 1 };
        indicator.on_navigation(&started, &view(1)).unwrap();
        assert_eq!(indicator.affordances().label, PageLabel::Cover);

        let settled = NavigationEvent::Settled { index: 25, animated: false };
        indicator.on_navigation(&settled, &view(25)).unwrap();
        assert_eq!(
            indicator.affordances(),
            Affordances { label: PageLabel::End, can_retreat: true, can_advance: false }
        );
        assert_eq!(indicator.updates(), 1);
    }
}
