//! Application state machine.
//!
//! This module defines the [`App`] state machine, which owns the page
//! navigator and everything that feeds it or listens to it: the input
//! adapters, the effects collaborator, and the page indicator.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute. Time
//! and randomness come from the [`Environment`], so the same code runs under
//! a virtual clock in simulation.
//!
//! # Responsibilities
//!
//! - Routes keys, clicks, and press-drag-release gestures to navigation.
//! - Drives settle timers and effect cues on every tick.
//! - Stores terminal dimensions for layout and hit-testing.

use std::{
    cell::{Ref, RefCell},
    rc::Rc,
};

use keepsake_core::{DeckError, Environment, EventKind, NavigatorConfig, PageNavigator, Rejection};

use crate::{
    Affordances, Album, AppAction, AppEvent, CellSize, Effects, EffectsConfig, Gesture,
    GestureConfig, Indicator, Intent, KeyInput, KeyboardAdapter, Point, PointerAdapter,
    ScreenLayout, SecretWord, TouchAdapter,
};

/// Default secret word.
pub const DEFAULT_SECRET: &str = "forever";

/// Application tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Navigator timing.
    pub navigator: NavigatorConfig,
    /// Click, tap, and swipe thresholds.
    pub gestures: GestureConfig,
    /// Decorative effects.
    pub effects: EffectsConfig,
    /// Word that unlocks the secret message. Empty disables it.
    pub secret: String,
    /// Ring the bell on page turns.
    pub bell: bool,
    /// Pixel size used to convert cells for hit-testing.
    pub cell: CellSize,
    /// Treat an undragged press-release as a click however long it was held.
    /// Mouse hosts set this; touch hosts keep the tap time limit.
    pub mouse_release_clicks: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            navigator: NavigatorConfig::default(),
            gestures: GestureConfig::default(),
            effects: EffectsConfig::default(),
            secret: DEFAULT_SECRET.to_string(),
            bell: true,
            cell: CellSize::default(),
            mouse_release_clicks: false,
        }
    }
}

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
pub struct App<E: Environment> {
    env: E,
    album: Album,
    navigator: PageNavigator<E::Instant>,
    effects: Rc<RefCell<Effects<E>>>,
    indicator: Rc<RefCell<Indicator>>,
    keyboard: KeyboardAdapter,
    pointer: PointerAdapter<E::Instant>,
    touch: TouchAdapter<E::Instant>,
    secret: SecretWord,
    bell: bool,
    cell: CellSize,
    mouse_release_clicks: bool,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl<E: Environment> App<E> {
    /// Create an app showing the cover of `album`.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Empty`] if the album has no pages.
    pub fn new(env: E, album: Album, config: AppConfig) -> Result<Self, DeckError> {
        let mut navigator = PageNavigator::with_len(album.len(), config.navigator)?;
        let effects = Rc::new(RefCell::new(Effects::new(env.clone(), config.effects)));
        let indicator = Rc::new(RefCell::new(Indicator::new(&navigator.view())));

        for kind in [EventKind::Started, EventKind::Settled, EventKind::Rejected] {
            let effects = Rc::clone(&effects);
            navigator.subscribe(kind, move |event, view| {
                effects.try_borrow_mut()?.on_navigation(event, view)
            });
        }
        for kind in [EventKind::Settled, EventKind::Rejected] {
            let indicator = Rc::clone(&indicator);
            navigator.subscribe(kind, move |event, view| {
                indicator.try_borrow_mut()?.on_navigation(event, view)
            });
        }

        Ok(Self {
            keyboard: KeyboardAdapter::new(album.len()),
            pointer: PointerAdapter::new(config.gestures),
            touch: TouchAdapter::new(config.gestures),
            secret: SecretWord::new(&config.secret),
            bell: config.bell,
            cell: config.cell,
            mouse_release_clicks: config.mouse_release_clicks,
            env,
            album,
            navigator,
            effects,
            indicator,
            terminal_size: (80, 24),
            status_message: None,
        })
    }

    /// Begin the welcome sequence.
    pub fn start(&mut self) -> Vec<AppAction> {
        tracing::info!(title = %self.album.title, pages = self.album.len(), "opening album");
        self.effects.borrow_mut().start(&self.album.title);
        vec![AppAction::Render]
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        let now = self.env.now();
        let mut changed = true;

        match event {
            AppEvent::Key(key) => {
                if self.handle_key(key) {
                    return vec![AppAction::Quit];
                }
            },
            AppEvent::Click(at) => self.click(at),
            AppEvent::PointerDown(at) => self.touch.start(at, now),
            AppEvent::PointerDrag(_) => {
                self.touch.moved();
                changed = false;
            },
            AppEvent::PointerUp(at) => {
                let held_still = self.touch.is_pressed() && !self.touch.is_dragging();
                match self.touch.end(at, now) {
                    Some(Gesture::Tap(at)) => self.click(at),
                    Some(Gesture::Swipe(intent)) => self.request(intent),
                    None if held_still && self.mouse_release_clicks => self.click(at),
                    None => {},
                }
            },
            AppEvent::Tick => {
                let settled = self.navigator.handle_tick(now).is_some();
                changed = settled || self.navigator.is_animating();
            },
            AppEvent::Resize(cols, rows) => self.terminal_size = (cols, rows),
            AppEvent::Visibility(visible) => self.effects.borrow_mut().set_visible(visible),
        }

        self.finish(changed)
    }

    /// Apply a navigation intent.
    ///
    /// # Errors
    ///
    /// Returns the navigator's [`Rejection`]; state is unchanged and the
    /// collaborators have already been notified.
    pub fn apply(&mut self, intent: Intent) -> Result<(), Rejection> {
        let now = self.env.now();
        let outcome = match intent {
            Intent::Advance => self.navigator.advance(now).map(|_| ()),
            Intent::Retreat => self.navigator.retreat(now).map(|_| ()),
            Intent::JumpTo(target) => self.navigator.jump_to(target).map(|_| ()),
        };
        if let Err(rejection) = &outcome {
            tracing::debug!(?intent, %rejection, "intent rejected");
        }
        outcome
    }

    /// The page navigator.
    pub fn navigator(&self) -> &PageNavigator<E::Instant> {
        &self.navigator
    }

    /// The album being shown.
    pub fn album(&self) -> &Album {
        &self.album
    }

    /// The effects collaborator, for rendering.
    pub fn effects(&self) -> Ref<'_, Effects<E>> {
        self.effects.borrow()
    }

    /// Label and control states from the indicator.
    pub fn affordances(&self) -> Affordances {
        self.indicator.borrow().affordances()
    }

    /// Screen regions for the current terminal size.
    pub fn layout(&self) -> ScreenLayout {
        ScreenLayout::compute(self.terminal_size.0, self.terminal_size.1)
    }

    /// Pixel size of one terminal cell for hit-testing.
    pub fn cell(&self) -> CellSize {
        self.cell
    }

    /// Current time from the environment.
    pub fn now(&self) -> E::Instant {
        self.env.now()
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Current status message, if any.
    pub fn status(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Set a status message to display to the user.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Returns `true` if the key quits.
    fn handle_key(&mut self, key: KeyInput) -> bool {
        if let KeyInput::Char(c) = key
            && self.secret.push(c)
        {
            tracing::info!("secret word entered");
            self.effects.borrow_mut().secret_message();
        }

        match key {
            KeyInput::Char('q') | KeyInput::Esc => return true,
            KeyInput::Char('t') => {
                let enabled = self.effects.borrow_mut().toggle();
                self.set_status(if enabled { "Effects on" } else { "Effects off" });
            },
            KeyInput::Char('d') => {
                tracing::debug!("navigator state:\n{}", self.navigator.dump_state());
                self.set_status("State written to log");
            },
            key => {
                if let Some(intent) = self.keyboard.intent(key) {
                    self.request(intent);
                }
            },
        }
        false
    }

    /// Apply an input-driven intent. Subscribers already hear about
    /// rejections, so the caller has nothing further to do with one.
    fn request(&mut self, intent: Intent) {
        let _rejected = self.apply(intent);
    }

    fn click(&mut self, at: Point) {
        let layout = self.layout();
        let affordances = self.affordances();
        let (x, y) = self.screen_fraction(at);

        if layout.prev_button.to_bounds(self.cell).contains(at) {
            if affordances.can_retreat {
                self.effects.borrow_mut().button_sparkle(x, y);
                self.request(Intent::Retreat);
            }
            return;
        }
        if layout.next_button.to_bounds(self.cell).contains(at) {
            if affordances.can_advance {
                self.effects.borrow_mut().button_sparkle(x, y);
                self.request(Intent::Advance);
            }
            return;
        }

        let book = layout.book.to_bounds(self.cell);
        let outcome = self.pointer.click(at, &book, self.env.now());
        if outcome.double_click {
            self.effects.borrow_mut().heart_shower();
        }
        if let Some(intent) = outcome.intent {
            self.effects.borrow_mut().click_sparkle(x, y);
            self.request(intent);
        }
    }

    fn screen_fraction(&self, at: Point) -> (f64, f64) {
        let width = f64::from(self.terminal_size.0.max(1)) * self.cell.width;
        let height = f64::from(self.terminal_size.1.max(1)) * self.cell.height;
        ((at.x / width).clamp(0.0, 1.0), (at.y / height).clamp(0.0, 1.0))
    }

    fn finish(&mut self, changed: bool) -> Vec<AppAction> {
        let (cues_changed, has_cues, sounds) = {
            let mut effects = self.effects.borrow_mut();
            let cues_changed = effects.tick();
            (cues_changed, !effects.live().is_empty(), effects.take_sounds())
        };

        let mut actions = Vec::new();
        if self.bell && sounds > 0 {
            actions.push(AppAction::Bell);
        }
        if changed || cues_changed || has_cues {
            actions.push(AppAction::Render);
        }
        actions
    }
}
