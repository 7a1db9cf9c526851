//! Brickfall - a deterministic Breakout simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddle, ball, targets, collisions, session)
//! - `config`: Injected field/actor configuration with validation

pub mod config;
pub mod sim;

pub use config::{Config, ConfigError};
pub use sim::{GameEvent, Session, SessionState, Snapshot, TickInput};

/// Default configuration constants
pub mod consts {
    /// Nominal rate the external loop is expected to tick at
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_SPEED: f32 = 8.0;
    /// Distance from the field bottom to the paddle's top edge
    pub const PADDLE_BOTTOM_OFFSET: f32 = 50.0;

    /// Ball defaults
    pub const BALL_DIAMETER: f32 = 15.0;
    /// Per-axis base speed (pixels per tick)
    pub const BALL_SPEED: f32 = 5.0;
    /// Distance from the field bottom to the ball's spawn y
    pub const BALL_START_OFFSET: f32 = 100.0;

    /// Target grid defaults
    pub const TARGET_WIDTH: f32 = 75.0;
    pub const TARGET_HEIGHT: f32 = 30.0;
    pub const TARGET_ROWS: u32 = 5;
    pub const TARGET_COLS: u32 = 10;
    pub const TARGET_GAP: f32 = 5.0;
    pub const TARGET_TOP: f32 = 50.0;

    /// Points per destroyed target
    pub const TARGET_SCORE: u64 = 10;
    pub const STARTING_LIVES: u8 = 3;
}
