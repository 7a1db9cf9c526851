//! Simulation entities and session phases
//!
//! Paddle, ball and target field each own exactly one position/size pair;
//! bounding rectangles are derived through `rect()`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::config::Config;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Active gameplay
    Playing,
    /// All lives lost
    GameOver,
    /// All targets destroyed
    Victory,
}

impl SessionState {
    /// GameOver and Victory are only left through a reset
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::GameOver | SessionState::Victory)
    }
}

/// Something notable that happened during a tick (for audio/HUD hooks)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    /// Ball bounced off the paddle with the given deflection in [-1, 1]
    PaddleHit { angle: f32 },
    /// Target at `index` (row-major) was destroyed
    TargetDestroyed { index: usize, color: ColorTag },
    /// Ball fell past the bottom edge
    LifeLost { lives_left: u8 },
    GameOver,
    Victory,
}

/// The player's paddle
#[derive(Debug, Clone, Serialize)]
pub struct Paddle {
    /// Top-left corner; y never changes
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// Largest legal x (`field_width - width`, never negative)
    max_x: f32,
}

impl Paddle {
    pub fn new(config: &Config) -> Self {
        Self {
            pos: config.paddle_start(),
            size: Vec2::new(config.paddle_width, config.paddle_height),
            speed: config.paddle_speed,
            max_x: (config.field_width - config.paddle_width).max(0.0),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn move_left(&mut self) {
        self.pos.x = (self.pos.x - self.speed).clamp(0.0, self.max_x);
    }

    pub fn move_right(&mut self) {
        self.pos.x = (self.pos.x + self.speed).clamp(0.0, self.max_x);
    }
}

/// The ball, tracked by the top-left corner of its bounding square
#[derive(Debug, Clone, Serialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub diameter: f32,
    /// Per-axis speed magnitude used when velocity is rebuilt
    pub base_speed: f32,
    field_width: f32,
}

impl Ball {
    /// Spawn at the canonical start with a random horizontal direction
    pub fn new<R: Rng>(config: &Config, rng: &mut R) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            diameter: config.ball_diameter,
            base_speed: config.ball_speed,
            field_width: config.field_width,
        };
        ball.reset(config.ball_start(), rng);
        ball
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::splat(self.diameter),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.diameter / 2.0)
    }

    /// Move one tick and bounce off the left, right and top walls.
    /// The bottom edge never reflects; falling out is a lost life.
    pub fn advance(&mut self) {
        self.pos += self.vel;

        if self.pos.x <= 0.0 || self.pos.x >= self.field_width - self.diameter {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y <= 0.0 {
            self.vel.y = -self.vel.y;
        }
    }

    /// Reposition and relaunch upward with a coin-flip horizontal direction
    pub fn reset<R: Rng>(&mut self, pos: Vec2, rng: &mut R) {
        self.pos = pos;
        let vx = if rng.random_bool(0.5) {
            self.base_speed
        } else {
            -self.base_speed
        };
        self.vel = Vec2::new(vx, -self.base_speed);
    }
}

/// Semantic color label for a target row (renderer picks the pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorTag {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
}

impl ColorTag {
    const CYCLE: [ColorTag; 5] = [
        ColorTag::Red,
        ColorTag::Orange,
        ColorTag::Yellow,
        ColorTag::Green,
        ColorTag::Blue,
    ];

    /// Row colors cycle from the top of the grid
    pub fn for_row(row: u32) -> Self {
        Self::CYCLE[row as usize % Self::CYCLE.len()]
    }
}

/// A destructible target
#[derive(Debug, Clone, Serialize)]
pub struct Target {
    pub rect: Rect,
    pub color: ColorTag,
    /// One-way flag: once set, the target is out of play
    pub destroyed: bool,
}

/// The fixed grid of targets, stored row-major
#[derive(Debug, Clone, Serialize)]
pub struct TargetField {
    targets: Vec<Target>,
}

impl TargetField {
    /// Lay out a horizontally centered grid starting at `target_top`
    pub fn new(config: &Config) -> Self {
        let start_x = (config.field_width - config.grid_size().x) / 2.0;
        let step = Vec2::new(
            config.target_width + config.target_gap,
            config.target_height + config.target_gap,
        );

        let mut targets = Vec::with_capacity(config.target_count());
        for row in 0..config.target_rows {
            let color = ColorTag::for_row(row);
            for col in 0..config.target_cols {
                let x = start_x + col as f32 * step.x;
                let y = config.target_top + row as f32 * step.y;
                targets.push(Target {
                    rect: Rect::new(x, y, config.target_width, config.target_height),
                    color,
                    destroyed: false,
                });
            }
        }

        Self { targets }
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub(crate) fn targets_mut(&mut self) -> &mut [Target] {
        &mut self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Targets still in play
    pub fn remaining(&self) -> usize {
        self.targets.iter().filter(|t| !t.destroyed).count()
    }

    pub fn all_destroyed(&self) -> bool {
        self.targets.iter().all(|t| t.destroyed)
    }
}
