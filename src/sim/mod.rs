//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per `tick()`
//! - Seeded RNG only
//! - Stable iteration order (row-major targets)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geom;
pub mod session;
pub mod state;
pub mod tick;

pub use collision::{PaddleHit, TargetHit, paddle_angle, resolve_paddle, resolve_targets};
pub use geom::Rect;
pub use session::{BallView, Session, Snapshot, TargetView};
pub use state::{Ball, ColorTag, GameEvent, Paddle, SessionState, Target, TargetField};
pub use tick::TickInput;
