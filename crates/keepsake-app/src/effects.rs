//! Decorative effects driven by navigation events.
//!
//! [`Effects`] subscribes to the navigator and turns lifecycle notifications
//! into [`Cue`]s: floating hearts, sparkles, a page glow, and banners. Cues
//! may be delayed; delayed cues wait in a [`TimerQueue`] until
//! [`Effects::tick`] moves them onto the live list, and live cues drop off
//! once their lifetime has passed. The renderer reads [`Effects::live`].
//!
//! Particles and sounds only appear while effects are active: enabled by the
//! user and the host surface visible. Banners carry information and are shown
//! regardless.

use std::time::Duration;

use keepsake_core::{
    Environment, HandlerResult, NavigationEvent, NavigatorView, PageLabel, TimerQueue,
};

const HEARTS: [char; 5] = ['♥', '❤', '♡', '❥', 'ღ'];
const SPARKLES: [char; 4] = ['✦', '✧', '⋆', '*'];

const HEART_LIFETIME: Duration = Duration::from_secs(6);
const ENHANCED_HEART_LIFETIME: Duration = Duration::from_secs(4);
const SPARKLE_LIFETIME: Duration = Duration::from_secs(2);
const CLICK_SPARKLE_LIFETIME: Duration = Duration::from_secs(1);
const GLOW_LIFETIME: Duration = Duration::from_secs(2);

const FLIP_SPARKLES: u32 = 8;
const FLIP_SPARKLE_SPACING: Duration = Duration::from_millis(80);
const FLIP_HEART_DELAYS: [Duration; 2] = [Duration::from_millis(200), Duration::from_millis(400)];
const MILESTONE_DELAY: Duration = Duration::from_millis(300);
const MILESTONE_HEARTS: u32 = 6;
const MILESTONE_HEART_SPACING: Duration = Duration::from_millis(150);
const SHOWER_HEARTS: u32 = 15;
const SHOWER_SPACING: Duration = Duration::from_millis(100);
const ARRIVAL_DELAY: Duration = Duration::from_millis(500);
const WELCOME_HEARTS: u32 = 8;
const WELCOME_HEART_SPACING: Duration = Duration::from_millis(200);
const WELCOME_BANNER_DELAY: Duration = Duration::from_secs(1);
const WELCOME_BACK_DELAY: Duration = Duration::from_millis(500);
const BUTTON_SPARKLES: u32 = 4;
const BUTTON_SPARKLE_SPACING: Duration = Duration::from_millis(50);

/// Effects tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectsConfig {
    /// Whether effects start enabled.
    pub enabled: bool,
    /// Pages that get a special shower when a flip settles on them.
    pub milestones: Vec<usize>,
    /// Interval between ambient hearts.
    pub ambient_heart_every: Duration,
    /// Interval between ambient sparkle rolls.
    pub ambient_sparkle_every: Duration,
    /// Probability that an ambient sparkle roll spawns one.
    pub ambient_sparkle_chance: f64,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            milestones: vec![1, 8, 9, 15, 24],
            ambient_heart_every: Duration::from_secs(4),
            ambient_sparkle_every: Duration::from_secs(3),
            ambient_sparkle_chance: 0.3,
        }
    }
}

/// Text overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    /// Shown shortly after startup.
    Welcome(String),
    /// A navigation request was rejected.
    Boundary {
        /// The reader was on the cover.
        at_beginning: bool,
    },
    /// A jump finished.
    Arrival(PageLabel),
    /// The secret word was typed.
    SecretMessage,
}

impl Banner {
    /// Lines of text, top to bottom.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Welcome(title) => vec![format!("✦ Welcome to {title} ✦")],
            Self::Boundary { at_beginning: true } => vec!["This is the beginning!".to_string()],
            Self::Boundary { at_beginning: false } => {
                vec!["This is our story so far...".to_string()]
            },
            Self::Arrival(label) => {
                let place = match label {
                    PageLabel::Cover => "the beginning".to_string(),
                    PageLabel::End => "the end".to_string(),
                    PageLabel::Memory(i) => format!("memory {i}"),
                };
                vec![format!("Arrived at {place}!")]
            },
            Self::SecretMessage => vec![
                "♥ A Secret, Just For You ♥".to_string(),
                "Every page of this book is filled with love".to_string(),
                "Every memory is a treasure".to_string(),
                "You make every moment magical ✦".to_string(),
            ],
        }
    }

    /// How long the banner stays up.
    pub fn lifetime(&self) -> Duration {
        match self {
            Self::Welcome(_) => Duration::from_secs(4),
            Self::Boundary { .. } | Self::Arrival(_) => Duration::from_secs(2),
            Self::SecretMessage => Duration::from_secs(6),
        }
    }
}

/// What a cue draws.
#[derive(Debug, Clone, PartialEq)]
pub enum CueKind {
    /// Heart floating up from the bottom edge.
    Heart {
        /// Glyph to draw.
        glyph: char,
        /// Larger, faster heart used by showers.
        enhanced: bool,
    },
    /// Sparkle fading in place.
    Sparkle {
        /// Glyph to draw.
        glyph: char,
    },
    /// Highlight around the book.
    Glow,
    /// Text overlay.
    Banner(Banner),
}

/// A live decorative effect.
///
/// Positions are fractions of the screen in `[0.0, 1.0)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue<I> {
    /// What to draw.
    pub kind: CueKind,
    /// Horizontal position.
    pub x: f64,
    /// Vertical position at birth.
    pub y: f64,
    /// When the cue appeared.
    pub born: I,
    /// How long the cue lives.
    pub lifetime: Duration,
}

impl<I> Cue<I>
where
    I: Copy + Ord + std::ops::Sub<Output = Duration>,
{
    /// Fraction of the lifetime elapsed at `now`, in `[0.0, 1.0]`.
    pub fn progress(&self, now: I) -> f64 {
        if now <= self.born || self.lifetime.is_zero() {
            return 0.0;
        }
        ((now - self.born).as_secs_f64() / self.lifetime.as_secs_f64()).min(1.0)
    }

    /// Whether the cue has outlived its lifetime.
    pub fn is_expired(&self, now: I) -> bool {
        now > self.born && now - self.born >= self.lifetime
    }

    /// Whether this is a banner.
    pub fn is_banner(&self) -> bool {
        matches!(self.kind, CueKind::Banner(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Scheduled {
    Heart { enhanced: bool },
    Sparkle { at: Option<(f64, f64)>, lifetime: Duration },
    Banner(Banner),
    Milestone,
}

impl Scheduled {
    fn is_decorative(&self) -> bool {
        !matches!(self, Self::Banner(_))
    }
}

/// Effects collaborator.
#[derive(Debug)]
pub struct Effects<E: Environment> {
    env: E,
    config: EffectsConfig,
    enabled: bool,
    visible: bool,
    pending: TimerQueue<E::Instant, Scheduled>,
    live: Vec<Cue<E::Instant>>,
    sounds: usize,
    last_heart: Option<E::Instant>,
    last_sparkle: Option<E::Instant>,
}

impl<E: Environment> Effects<E> {
    /// Create the collaborator.
    pub fn new(env: E, config: EffectsConfig) -> Self {
        Self {
            env,
            enabled: config.enabled,
            config,
            visible: true,
            pending: TimerQueue::new(),
            live: Vec::new(),
            sounds: 0,
            last_heart: None,
            last_sparkle: None,
        }
    }

    /// Welcome sequence: a stream of hearts, then the banner.
    pub fn start(&mut self, title: &str) {
        let now = self.env.now();
        self.last_heart = Some(now);
        self.last_sparkle = Some(now);
        for i in 0..WELCOME_HEARTS {
            self.schedule(now, WELCOME_HEART_SPACING * i, Scheduled::Heart { enhanced: false });
        }
        self.schedule(now, WELCOME_BANNER_DELAY, Scheduled::Banner(Banner::Welcome(title.into())));
    }

    /// Navigator subscriber entry point.
    pub fn on_navigation(
        &mut self,
        event: &NavigationEvent,
        view: &NavigatorView,
    ) -> HandlerResult {
        let now = self.env.now();
        match *event {
            NavigationEvent::Started { .. } => {
                if self.is_active() {
                    self.sounds += 1;
                }
                for i in 0..FLIP_SPARKLES {
                    let sparkle = Scheduled::Sparkle { at: None, lifetime: SPARKLE_LIFETIME };
                    self.schedule(now, FLIP_SPARKLE_SPACING * i, sparkle);
                }
                for delay in FLIP_HEART_DELAYS {
                    self.schedule(now, delay, Scheduled::Heart { enhanced: false });
                }
            },
            NavigationEvent::Settled { index, animated: true } => {
                if self.config.milestones.contains(&index) {
                    tracing::debug!(index, "milestone page");
                    self.schedule(now, MILESTONE_DELAY, Scheduled::Milestone);
                }
            },
            NavigationEvent::Settled { animated: false, .. } => {
                self.heart_shower();
                self.schedule(now, ARRIVAL_DELAY, Scheduled::Banner(Banner::Arrival(view.label())));
            },
            NavigationEvent::Rejected { .. } => {
                let banner = Banner::Boundary { at_beginning: view.current_index == 0 };
                self.show_banner(now, banner);
            },
        }
        Ok(())
    }

    /// Fifteen enhanced hearts, 100 ms apart.
    pub fn heart_shower(&mut self) {
        let now = self.env.now();
        for i in 0..SHOWER_HEARTS {
            self.schedule(now, SHOWER_SPACING * i, Scheduled::Heart { enhanced: true });
        }
    }

    /// Secret word reward: the secret banner plus a shower.
    pub fn secret_message(&mut self) {
        let now = self.env.now();
        self.show_banner(now, Banner::SecretMessage);
        self.heart_shower();
    }

    /// Short sparkle at a screen position (fractions of width and height).
    pub fn click_sparkle(&mut self, x: f64, y: f64) {
        let now = self.env.now();
        let sparkle = Scheduled::Sparkle { at: Some((x, y)), lifetime: CLICK_SPARKLE_LIFETIME };
        self.schedule(now, Duration::ZERO, sparkle);
    }

    /// Burst of click sparkles around a pressed button.
    pub fn button_sparkle(&mut self, x: f64, y: f64) {
        let now = self.env.now();
        for i in 0..BUTTON_SPARKLES {
            let sparkle = Scheduled::Sparkle { at: Some((x, y)), lifetime: CLICK_SPARKLE_LIFETIME };
            self.schedule(now, BUTTON_SPARKLE_SPACING * i, sparkle);
        }
    }

    /// Flip the user toggle. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.set_enabled(!self.enabled);
        self.enabled
    }

    /// Set the user toggle.
    ///
    /// Turning effects off drops pending particles; turning them back on
    /// celebrates with a shower.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;
        tracing::debug!(enabled, "effects toggled");
        if enabled {
            self.heart_shower();
        } else {
            self.drop_pending();
        }
    }

    /// Host surface became visible or hidden.
    ///
    /// Hiding suspends effects and drops everything pending; coming back
    /// schedules a single heart.
    pub fn set_visible(&mut self, visible: bool) {
        if visible == self.visible {
            return;
        }
        self.visible = visible;
        tracing::debug!(visible, "visibility changed");
        if visible {
            let now = self.env.now();
            self.schedule(now, WELCOME_BACK_DELAY, Scheduled::Heart { enhanced: false });
        } else {
            self.drop_pending();
        }
    }

    /// Fire due cues, spawn ambient ones, and drop expired ones.
    ///
    /// Returns `true` if the live list changed.
    pub fn tick(&mut self) -> bool {
        let now = self.env.now();
        let before = self.live.len();

        let fired = self.pending.expire(now);
        let spawned = !fired.is_empty();
        for (_, scheduled) in fired {
            self.spawn(now, scheduled);
        }
        let ambient = self.ambient(now);

        self.live.retain(|cue| !cue.is_expired(now));
        spawned || ambient || self.live.len() != before
    }

    /// Live cues, oldest first.
    pub fn live(&self) -> &[Cue<E::Instant>] {
        &self.live
    }

    /// Live cues that have not expired at `now`.
    pub fn live_cues(&self, now: E::Instant) -> impl Iterator<Item = &Cue<E::Instant>> {
        self.live.iter().filter(move |cue| !cue.is_expired(now))
    }

    /// The banner currently shown, if any.
    pub fn banner(&self) -> Option<&Banner> {
        self.live.iter().rev().find_map(|cue| match &cue.kind {
            CueKind::Banner(banner) => Some(banner),
            _ => None,
        })
    }

    /// Whether a page glow is live.
    pub fn is_glowing(&self) -> bool {
        self.live.iter().any(|cue| cue.kind == CueKind::Glow)
    }

    /// Flip sounds requested since the last call.
    pub fn take_sounds(&mut self) -> usize {
        std::mem::take(&mut self.sounds)
    }

    /// Time until the next delayed cue is due.
    pub fn next_due_in(&self) -> Option<Duration> {
        self.pending.next_due_in(self.env.now())
    }

    /// Number of delayed cues waiting.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// User toggle state.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether particles and sounds are currently produced.
    pub fn is_active(&self) -> bool {
        self.enabled && self.visible
    }

    fn schedule(&mut self, now: E::Instant, delay: Duration, scheduled: Scheduled) {
        if scheduled.is_decorative() && !self.is_active() {
            return;
        }
        self.pending.schedule(now, delay, scheduled);
    }

    fn drop_pending(&mut self) {
        let dropped = self.pending.clear().len();
        self.live.retain(Cue::is_banner);
        if dropped > 0 {
            tracing::debug!(dropped, "pending cues dropped");
        }
    }

    fn show_banner(&mut self, now: E::Instant, banner: Banner) {
        self.live.retain(|cue| !cue.is_banner());
        let lifetime = banner.lifetime();
        self.live.push(Cue { kind: CueKind::Banner(banner), x: 0.5, y: 0.5, born: now, lifetime });
    }

    fn spawn(&mut self, now: E::Instant, scheduled: Scheduled) {
        match scheduled {
            Scheduled::Heart { enhanced } => self.spawn_heart(now, enhanced),
            Scheduled::Sparkle { at, lifetime } => {
                let (x, y) = at.unwrap_or_else(|| (self.env.random_unit(), self.env.random_unit()));
                let glyph = SPARKLES[self.env.random_index(SPARKLES.len())];
                self.live.push(Cue { kind: CueKind::Sparkle { glyph }, x, y, born: now, lifetime });
            },
            Scheduled::Banner(banner) => self.show_banner(now, banner),
            Scheduled::Milestone => {
                self.live.push(Cue {
                    kind: CueKind::Glow,
                    x: 0.5,
                    y: 0.5,
                    born: now,
                    lifetime: GLOW_LIFETIME,
                });
                for i in 0..MILESTONE_HEARTS {
                    self.schedule(
                        now,
                        MILESTONE_HEART_SPACING * i,
                        Scheduled::Heart { enhanced: true },
                    );
                }
            },
        }
    }

    fn spawn_heart(&mut self, now: E::Instant, enhanced: bool) {
        let glyph = HEARTS[self.env.random_index(HEARTS.len())];
        let lifetime = if enhanced { ENHANCED_HEART_LIFETIME } else { HEART_LIFETIME };
        let x = self.env.random_unit();
        let kind = CueKind::Heart { glyph, enhanced };
        self.live.push(Cue { kind, x, y: 1.0, born: now, lifetime });
    }

    fn ambient(&mut self, now: E::Instant) -> bool {
        let mut spawned = false;

        let last_heart = *self.last_heart.get_or_insert(now);
        if now - last_heart >= self.config.ambient_heart_every {
            self.last_heart = Some(now);
            if self.is_active() {
                self.spawn_heart(now, false);
                spawned = true;
            }
        }

        let last_sparkle = *self.last_sparkle.get_or_insert(now);
        if now - last_sparkle >= self.config.ambient_sparkle_every {
            self.last_sparkle = Some(now);
            if self.is_active() && self.env.chance(self.config.ambient_sparkle_chance) {
                self.spawn(now, Scheduled::Sparkle { at: None, lifetime: SPARKLE_LIFETIME });
                spawned = true;
            }
        }

        spawned
    }
}
