//! Session configuration
//!
//! Every tunable the simulation reads lives here, so several sessions with
//! different field sizes can coexist without shared process state.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Why a configuration was rejected
#[derive(Debug)]
pub enum ConfigError {
    /// JSON could not be parsed into a `Config`
    Parse(serde_json::Error),
    /// A dimension, speed or size that must be positive and finite is not
    NonPositive { field: &'static str, value: f32 },
    /// Paddle does not fit inside the field
    PaddleTooWide { paddle_width: f32, field_width: f32 },
    /// Ball does not fit inside the field
    BallTooLarge { diameter: f32, field_width: f32 },
    /// Paddle row lies (partly) outside the field
    PaddleOutOfField { paddle_y: f32, field_height: f32 },
    /// Ball spawn lies above the top edge
    BallOutOfField { ball_y: f32 },
    /// Ball spawn reaches down into the paddle row
    BallBelowPaddle { ball_bottom: f32, paddle_y: f32 },
    /// Grid has zero rows or zero columns
    EmptyGrid { rows: u32, cols: u32 },
    /// Grid is wider than the field
    GridTooWide { grid_width: f32, field_width: f32 },
    /// Grid reaches down into the paddle row
    GridOverlapsPaddle { grid_bottom: f32, paddle_y: f32 },
    /// Session would start already lost
    NoLives,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(err) => write!(f, "config parse error: {err}"),
            ConfigError::NonPositive { field, value } => {
                write!(f, "{field} must be positive and finite, got {value}")
            }
            ConfigError::PaddleTooWide {
                paddle_width,
                field_width,
            } => write!(
                f,
                "paddle width {paddle_width} exceeds field width {field_width}"
            ),
            ConfigError::BallTooLarge {
                diameter,
                field_width,
            } => write!(
                f,
                "ball diameter {diameter} does not fit in field width {field_width}"
            ),
            ConfigError::PaddleOutOfField {
                paddle_y,
                field_height,
            } => write!(
                f,
                "paddle row at y={paddle_y} lies outside field height {field_height}"
            ),
            ConfigError::BallOutOfField { ball_y } => {
                write!(f, "ball spawn at y={ball_y} lies above the field")
            }
            ConfigError::BallBelowPaddle {
                ball_bottom,
                paddle_y,
            } => write!(
                f,
                "ball spawn bottom {ball_bottom} reaches paddle row at y={paddle_y}"
            ),
            ConfigError::EmptyGrid { rows, cols } => {
                write!(f, "target grid is empty ({rows} rows x {cols} cols)")
            }
            ConfigError::GridTooWide {
                grid_width,
                field_width,
            } => write!(
                f,
                "target grid width {grid_width} exceeds field width {field_width}"
            ),
            ConfigError::GridOverlapsPaddle {
                grid_bottom,
                paddle_y,
            } => write!(
                f,
                "target grid bottom {grid_bottom} reaches paddle row at y={paddle_y}"
            ),
            ConfigError::NoLives => write!(f, "starting lives must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

/// Field, actor and scoring configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Horizontal distance covered per move command
    pub paddle_speed: f32,
    /// Distance from the field bottom to the paddle's top edge
    pub paddle_bottom_offset: f32,

    // === Ball ===
    pub ball_diameter: f32,
    /// Per-axis speed magnitude used to rebuild velocity after reflections
    pub ball_speed: f32,
    /// Distance from the field bottom to the ball's spawn y
    pub ball_start_offset: f32,

    // === Targets ===
    pub target_rows: u32,
    pub target_cols: u32,
    pub target_width: f32,
    pub target_height: f32,
    pub target_gap: f32,
    /// y of the first target row
    pub target_top: f32,

    // === Scoring ===
    pub target_score: u64,
    pub starting_lives: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_bottom_offset: PADDLE_BOTTOM_OFFSET,

            ball_diameter: BALL_DIAMETER,
            ball_speed: BALL_SPEED,
            ball_start_offset: BALL_START_OFFSET,

            target_rows: TARGET_ROWS,
            target_cols: TARGET_COLS,
            target_width: TARGET_WIDTH,
            target_height: TARGET_HEIGHT,
            target_gap: TARGET_GAP,
            target_top: TARGET_TOP,

            target_score: TARGET_SCORE,
            starting_lives: STARTING_LIVES,
        }
    }
}

impl Config {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject geometry the simulation cannot represent
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("paddle_bottom_offset", self.paddle_bottom_offset),
            ("ball_diameter", self.ball_diameter),
            ("ball_speed", self.ball_speed),
            ("target_width", self.target_width),
            ("target_height", self.target_height),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        // Gaps, top offset and spawn offset may be zero
        let non_negative = [
            ("ball_start_offset", self.ball_start_offset),
            ("target_gap", self.target_gap),
            ("target_top", self.target_top),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.paddle_width > self.field_width {
            return Err(ConfigError::PaddleTooWide {
                paddle_width: self.paddle_width,
                field_width: self.field_width,
            });
        }
        if self.ball_diameter >= self.field_width {
            return Err(ConfigError::BallTooLarge {
                diameter: self.ball_diameter,
                field_width: self.field_width,
            });
        }

        let paddle_y = self.paddle_y();
        if paddle_y < 0.0 || paddle_y + self.paddle_height > self.field_height {
            return Err(ConfigError::PaddleOutOfField {
                paddle_y,
                field_height: self.field_height,
            });
        }

        let ball_y = self.ball_start().y;
        if ball_y < 0.0 {
            return Err(ConfigError::BallOutOfField { ball_y });
        }
        let ball_bottom = ball_y + self.ball_diameter;
        if ball_bottom > paddle_y {
            return Err(ConfigError::BallBelowPaddle {
                ball_bottom,
                paddle_y,
            });
        }

        if self.target_rows == 0 || self.target_cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.target_rows,
                cols: self.target_cols,
            });
        }
        let grid = self.grid_size();
        if grid.x > self.field_width {
            return Err(ConfigError::GridTooWide {
                grid_width: grid.x,
                field_width: self.field_width,
            });
        }
        let grid_bottom = self.target_top + grid.y;
        if grid_bottom > paddle_y {
            return Err(ConfigError::GridOverlapsPaddle {
                grid_bottom,
                paddle_y,
            });
        }

        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }

        Ok(())
    }

    /// y of the paddle's top edge
    pub fn paddle_y(&self) -> f32 {
        self.field_height - self.paddle_bottom_offset
    }

    /// Canonical paddle position (horizontally centered)
    pub fn paddle_start(&self) -> Vec2 {
        Vec2::new((self.field_width - self.paddle_width) / 2.0, self.paddle_y())
    }

    /// Canonical ball spawn (top-left of its bounding square)
    pub fn ball_start(&self) -> Vec2 {
        Vec2::new(
            (self.field_width - self.ball_diameter) / 2.0,
            self.field_height - self.ball_start_offset,
        )
    }

    /// Overall extent of the target grid, gaps between cells only
    pub fn grid_size(&self) -> Vec2 {
        let cols = self.target_cols as f32;
        let rows = self.target_rows as f32;
        Vec2::new(
            cols * (self.target_width + self.target_gap) - self.target_gap,
            rows * (self.target_height + self.target_gap) - self.target_gap,
        )
    }

    /// Total number of targets in the grid
    pub fn target_count(&self) -> usize {
        self.target_rows as usize * self.target_cols as usize
    }
}
