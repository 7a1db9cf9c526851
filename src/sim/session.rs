//! Game session: owns every entity plus score, lives and phase
//!
//! A session is created from a validated `Config` and is the only writer of
//! its paddle, ball and target field. Renderers read it through `snapshot()`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::geom::Rect;
use super::state::{Ball, ColorTag, GameEvent, Paddle, SessionState, TargetField};
use crate::config::{Config, ConfigError};

/// Ball as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallView {
    /// Top-left of the ball's bounding square
    pub pos: Vec2,
    pub diameter: f32,
}

/// Target as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetView {
    pub rect: Rect,
    pub color: ColorTag,
    pub destroyed: bool,
}

/// Immutable view of a session for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub paddle: Rect,
    pub ball: BallView,
    pub targets: Vec<TargetView>,
    pub score: u64,
    pub lives: u8,
    pub state: SessionState,
    /// Targets not yet destroyed
    pub remaining: usize,
    /// Ticks simulated since the last reset
    pub time_ticks: u64,
}

/// One play-through, from reset to GameOver or Victory
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) config: Config,
    /// Seed the RNG was created from
    seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) paddle: Paddle,
    pub(crate) ball: Ball,
    pub(crate) targets: TargetField,
    pub(crate) score: u64,
    pub(crate) lives: u8,
    pub(crate) state: SessionState,
    pub(crate) time_ticks: u64,
    pub(crate) quit: bool,
    pub(crate) events: Vec<GameEvent>,
}

impl Session {
    /// Create a session with a random seed
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        Self::with_seed(config, rand::random())
    }

    /// Create a reproducible session; rejects malformed configuration
    pub fn with_seed(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let ball = Ball::new(&config, &mut rng);
        let session = Self {
            seed,
            rng,
            paddle: Paddle::new(&config),
            ball,
            targets: TargetField::new(&config),
            score: 0,
            lives: config.starting_lives,
            state: SessionState::Playing,
            time_ticks: 0,
            quit: false,
            events: Vec::new(),
            config,
        };

        log::info!(
            "Session created (seed {}, {} targets, {} lives)",
            seed,
            session.targets.len(),
            session.lives
        );
        Ok(session)
    }

    /// Start over from the canonical layout. Callable in any state.
    pub fn reset(&mut self) {
        self.paddle = Paddle::new(&self.config);
        self.ball = Ball::new(&self.config, &mut self.rng);
        self.targets = TargetField::new(&self.config);
        self.score = 0;
        self.lives = self.config.starting_lives;
        self.state = SessionState::Playing;
        self.time_ticks = 0;
        self.events.clear();
        log::info!("Session reset");
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            paddle: self.paddle.rect(),
            ball: BallView {
                pos: self.ball.pos,
                diameter: self.ball.diameter,
            },
            targets: self
                .targets
                .targets()
                .iter()
                .map(|t| TargetView {
                    rect: t.rect,
                    color: t.color,
                    destroyed: t.destroyed,
                })
                .collect(),
            score: self.score,
            lives: self.lives,
            state: self.state,
            remaining: self.targets.remaining(),
            time_ticks: self.time_ticks,
        }
    }

    /// Take the events recorded during the latest tick
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    /// Current ball velocity (not part of the snapshot)
    pub fn ball_velocity(&self) -> Vec2 {
        self.ball.vel
    }

    /// Set once any tick carried `quit_requested`; the driving loop should stop
    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}
