//! The event loop shared by every host.

use keepsake_core::Environment;

use crate::{App, AppAction, Driver};

/// Pumps events from a [`Driver`] into an [`App`] and performs the
/// resulting actions on the driver.
pub struct Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    driver: D,
    app: App<E>,
}

impl<D, E> Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    /// Create a new runtime around an app.
    pub fn new(driver: D, app: App<E>) -> Self {
        Self { driver, app }
    }

    /// The application state.
    pub fn app(&self) -> &App<E> {
        &self.app
    }

    /// Show the welcome sequence, then read the book until the reader quits
    /// or input ends. The driver is stopped on a clean exit.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails to poll or render.
    pub async fn run(mut self) -> Result<(), D::Error> {
        let welcome = self.app.start();
        let mut done = self.perform(welcome)?;

        while !done {
            done = match self.driver.poll_event().await? {
                Some(event) => {
                    let actions = self.app.handle(event);
                    self.perform(actions)?
                },
                None => {
                    tracing::debug!("input ended");
                    true
                },
            };
        }

        self.driver.stop();
        Ok(())
    }

    /// Returns `true` once the app asks to quit.
    fn perform(&mut self, actions: Vec<AppAction>) -> Result<bool, D::Error> {
        for action in actions {
            match action {
                AppAction::Render => self.driver.render(&self.app)?,
                AppAction::Bell => {
                    if let Err(e) = self.driver.bell() {
                        tracing::warn!("page-turn sound failed: {e}");
                    }
                },
                AppAction::Quit => return Ok(true),
            }
        }
        Ok(false)
    }
}
