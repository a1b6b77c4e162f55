//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as the terminal driver but replays
//! a script against a virtual clock. It implements [`Driver`] so the same
//! [`keepsake_app::Runtime`] orchestration code runs in both production and
//! simulation.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use keepsake_app::{App, AppEvent, Banner, Driver};
use keepsake_core::{Environment, NavigatorSnapshot};

use crate::{InvariantRegistry, SimEnv, SystemSnapshot, Violation};

/// Error type for simulation driver.
#[derive(Debug, Clone)]
pub enum SimDriverError {
    /// A render observed state that breaks an invariant.
    Invariant(Vec<Violation>),
}

impl std::fmt::Display for SimDriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invariant(violations) => {
                let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
                write!(f, "invariant violation: {}", messages.join("; "))
            },
        }
    }
}

impl std::error::Error for SimDriverError {}

/// One scripted input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Deliver an event immediately.
    Event(AppEvent),
    /// Advance the virtual clock, then deliver a tick.
    Wait(Duration),
}

/// What the driver observed.
#[derive(Debug, Clone, Default)]
pub struct Record {
    /// Number of renders.
    pub renders: usize,
    /// Number of page-turn sounds.
    pub bells: usize,
    /// Navigator state at the most recent render.
    pub last_state: Option<NavigatorSnapshot>,
    /// Banner text at each render where one was showing, deduplicated.
    pub banners: Vec<Vec<String>>,
    /// Whether [`Driver::stop`] was called.
    pub stopped: bool,
}

/// Shared handle to a driver's [`Record`], usable after the driver has been
/// moved into a runtime.
#[derive(Debug, Clone, Default)]
pub struct Recorder(Arc<Mutex<Record>>);

impl Recorder {
    /// Copy of everything recorded so far.
    pub fn snapshot(&self) -> Record {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Record> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Simulation driver for deterministic testing.
///
/// Implements [`Driver`] so the same [`keepsake_app::Runtime`] orchestration
/// code runs in both the terminal and simulation tests. Input ends when the
/// script is exhausted.
pub struct SimDriver {
    env: SimEnv,
    script: VecDeque<Step>,
    recorder: Recorder,
    invariants: Option<InvariantRegistry>,
}

impl SimDriver {
    /// Driver that advances `env` on [`Step::Wait`].
    pub fn new(env: SimEnv) -> Self {
        Self { env, script: VecDeque::new(), recorder: Recorder::default(), invariants: None }
    }

    /// Enable invariant checking on every render.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(registry);
        self
    }

    /// Append steps to the script.
    #[must_use]
    pub fn with_script(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
        self.script.extend(steps);
        self
    }

    /// Append a step to the script.
    pub fn push(&mut self, step: Step) {
        self.script.push_back(step);
    }

    /// Handle to the observations.
    pub fn recorder(&self) -> Recorder {
        self.recorder.clone()
    }

    /// Steps not yet delivered.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        tokio::task::yield_now().await;

        let event = match self.script.pop_front() {
            Some(Step::Event(event)) => event,
            Some(Step::Wait(by)) => {
                self.env.advance(by);
                AppEvent::Tick
            },
            None => return Ok(None),
        };
        tracing::trace!(?event, at = ?self.env.elapsed(), "sim event");
        Ok(Some(event))
    }

    fn render<E: Environment>(&mut self, app: &App<E>) -> Result<(), Self::Error> {
        let banner = app.effects().banner().map(Banner::lines);
        {
            let mut record = self.recorder.lock();
            record.renders += 1;
            record.last_state = Some(app.navigator().dump_state());
            if let Some(lines) = banner
                && record.banners.last() != Some(&lines)
            {
                record.banners.push(lines);
            }
        }

        if let Some(registry) = &self.invariants {
            let snapshot = SystemSnapshot::from_app(app);
            registry.check_all(&snapshot).map_err(SimDriverError::Invariant)?;
        }
        Ok(())
    }

    fn bell(&mut self) -> Result<(), Self::Error> {
        self.recorder.lock().bells += 1;
        Ok(())
    }

    fn stop(&mut self) {
        self.recorder.lock().stopped = true;
    }
}
