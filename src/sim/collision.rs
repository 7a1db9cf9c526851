//! Collision detection and response
//!
//! Ball vs paddle and ball vs target field. Both checks are plain
//! axis-aligned box overlaps; the responses rebuild velocity from the ball's
//! base speed instead of computing true contact normals.

use glam::Vec2;

use super::state::{Ball, Paddle, Target, TargetField};

/// Result of the paddle check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleHit {
    /// Where along the paddle the ball center was, remapped to [-1, 1]
    pub angle: f32,
}

/// Result of the target scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetHit {
    /// Row-major index of the destroyed target
    pub index: usize,
}

/// Deflection for a ball center at `center_x` over a paddle spanning
/// `[paddle_x, paddle_x + width]`: -1 at the left edge, +1 at the right.
#[inline]
pub fn paddle_angle(center_x: f32, paddle_x: f32, width: f32) -> f32 {
    let normalized = (center_x - paddle_x) / width;
    normalized * 2.0 - 1.0
}

/// Bounce the ball off the paddle if their boxes overlap.
///
/// The ball always leaves upward and is lifted so its bottom edge rests on
/// the paddle top, so it cannot register a second hit next tick.
pub fn resolve_paddle(ball: &mut Ball, paddle: &Paddle) -> Option<PaddleHit> {
    let paddle_rect = paddle.rect();
    if !ball.rect().intersects(&paddle_rect) {
        return None;
    }

    let angle = paddle_angle(ball.center().x, paddle_rect.pos.x, paddle_rect.size.x);
    ball.vel.x = angle * ball.base_speed;
    ball.vel.y = -ball.vel.y.abs();
    ball.pos.y = paddle_rect.pos.y - ball.diameter;

    Some(PaddleHit { angle })
}

/// Pick the reflected velocity after striking `target`.
///
/// Whichever center offset dominates decides the axis; ties go vertical.
/// Only that axis is rebuilt, pointing away from the target.
pub fn target_bounce(ball_center: Vec2, target: &Target, vel: Vec2, base_speed: f32) -> Vec2 {
    let offset = ball_center - target.rect.center();
    let away = |d: f32| if d > 0.0 { base_speed } else { -base_speed };

    if offset.x.abs() > offset.y.abs() {
        Vec2::new(away(offset.x), vel.y)
    } else {
        Vec2::new(vel.x, away(offset.y))
    }
}

/// Destroy at most one target per call.
///
/// Scans in row-major order and stops at the first live target the ball
/// overlaps, so one ball position can never clear two targets at once.
pub fn resolve_targets(ball: &mut Ball, field: &mut TargetField) -> Option<TargetHit> {
    let ball_rect = ball.rect();
    let (index, target) = field
        .targets_mut()
        .iter_mut()
        .enumerate()
        .find(|(_, t)| !t.destroyed && t.rect.intersects(&ball_rect))?;

    target.destroyed = true;
    ball.vel = target_bounce(ball.center(), target, ball.vel, ball.base_speed);

    Some(TargetHit { index })
}
