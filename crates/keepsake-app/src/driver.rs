//! The seam between [`crate::Runtime`] and a host.
//!
//! A host supplies input events, draws frames, and plays the page-turn
//! sound. The terminal frontend and the scripted simulation driver both
//! implement [`Driver`], so the same runtime loop drives either.

use std::future::Future;

use keepsake_core::Environment;

use crate::{App, AppEvent};

/// Input, output, and teardown for one host.
pub trait Driver: Send {
    /// Host failure, such as a closed terminal.
    type Error: std::error::Error + Send + 'static;

    /// Next input event, or `None` once input has ended.
    ///
    /// Hosts emit [`AppEvent::Tick`] while idle so pending flips settle.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Draw the current frame.
    fn render<E: Environment>(&mut self, app: &App<E>) -> Result<(), Self::Error>;

    /// Play the page-turn sound.
    ///
    /// # Errors
    ///
    /// Returns an error if the sound could not be played. The runtime logs
    /// and ignores it.
    fn bell(&mut self) -> Result<(), Self::Error>;

    /// Release resources and restore the host.
    fn stop(&mut self);
}
