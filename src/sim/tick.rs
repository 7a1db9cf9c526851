//! Fixed timestep simulation tick
//!
//! One call is one atomic step: paddle, ball, life loss, collisions, then
//! terminal checks. The caller owns the loop and its timing.

use super::collision::{resolve_paddle, resolve_targets};
use super::session::Session;
use super::state::{GameEvent, SessionState};

/// Input flags for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Start over; honored only once the session has ended
    pub restart_requested: bool,
    /// Ask the driving loop to stop
    pub quit_requested: bool,
}

impl Session {
    /// Advance the session by one tick.
    ///
    /// Events left over from the previous tick are discarded, whether or not
    /// they were drained.
    ///
    /// While the session is in GameOver or Victory this does nothing except
    /// honor `restart_requested` and `quit_requested`.
    pub fn tick(&mut self, input: &TickInput) {
        // Events only describe the latest tick
        self.events.clear();

        if input.quit_requested && !self.quit {
            log::info!("Quit requested at tick {}", self.time_ticks);
            self.quit = true;
        }

        if input.restart_requested && self.state.is_terminal() {
            self.reset();
        }

        if self.state != SessionState::Playing {
            return;
        }

        self.time_ticks += 1;

        if input.move_left {
            self.paddle.move_left();
        }
        if input.move_right {
            self.paddle.move_right();
        }

        self.ball.advance();

        if self.ball.pos.y > self.config.field_height {
            self.lose_life();
            if self.state != SessionState::Playing {
                return;
            }
        }

        self.resolve_collisions();
    }

    /// Ball fell out the bottom
    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::LifeLost {
            lives_left: self.lives,
        });

        if self.lives == 0 {
            // Ball stays where it fell
            self.state = SessionState::GameOver;
            self.events.push(GameEvent::GameOver);
            log::info!("Game over with score {}", self.score);
        } else {
            log::debug!("Life lost, {} remaining", self.lives);
            let start = self.config.ball_start();
            self.ball.reset(start, &mut self.rng);
        }
    }

    /// Paddle first, then at most one target, then the victory check
    fn resolve_collisions(&mut self) {
        if let Some(hit) = resolve_paddle(&mut self.ball, &self.paddle) {
            self.events.push(GameEvent::PaddleHit { angle: hit.angle });
        }

        if let Some(hit) = resolve_targets(&mut self.ball, &mut self.targets) {
            self.score = self.score.saturating_add(self.config.target_score);
            let color = self.targets.targets()[hit.index].color;
            self.events.push(GameEvent::TargetDestroyed {
                index: hit.index,
                color,
            });
            log::debug!("Target {} destroyed, score {}", hit.index, self.score);
        }

        if self.targets.all_destroyed() {
            self.state = SessionState::Victory;
            self.events.push(GameEvent::Victory);
            log::info!("Victory with score {}", self.score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use glam::Vec2;
    use proptest::prelude::*;

    fn session() -> Session {
        Session::with_seed(Config::default(), 12345).expect("valid config")
    }

    /// Put the ball just above the bottom edge, away from the paddle, falling
    fn drop_ball(session: &mut Session) {
        session.ball.pos = Vec2::new(100.0, 599.0);
        session.ball.vel = Vec2::new(5.0, 5.0);
    }

    /// Center the ball inside target `index`, at rest
    fn park_in_target(session: &mut Session, index: usize) {
        let center = session.targets.targets()[index].rect.center();
        session.ball.pos = center - Vec2::splat(session.ball.diameter / 2.0);
        session.ball.vel = Vec2::ZERO;
    }

    #[test]
    fn test_paddle_bounce_end_to_end() {
        let mut session = session();
        assert_eq!(session.paddle.pos, Vec2::new(350.0, 550.0));
        // After this tick's advance the ball sits at (390, 560)
        session.ball.pos = Vec2::new(385.0, 555.0);
        session.ball.vel = Vec2::new(5.0, 5.0);

        session.tick(&TickInput::default());

        assert_eq!(session.ball.vel.y, -5.0);
        assert_eq!(session.ball.pos.y, 535.0);
        assert!((session.ball.vel.x - -0.25).abs() < 1e-5);
        let events = session.drain_events();
        assert!(matches!(
            events.as_slice(),
            [GameEvent::PaddleHit { angle }] if (angle - -0.05).abs() < 1e-6
        ));
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_paddle_moves_from_input() {
        let mut session = session();
        session.tick(&TickInput {
            move_left: true,
            ..Default::default()
        });
        assert_eq!(session.paddle.pos.x, 342.0);

        session.tick(&TickInput {
            move_right: true,
            ..Default::default()
        });
        assert_eq!(session.paddle.pos.x, 350.0);

        // Both held: net zero
        session.tick(&TickInput {
            move_left: true,
            move_right: true,
            ..Default::default()
        });
        assert_eq!(session.paddle.pos.x, 350.0);
    }

    #[test]
    fn test_life_lost_resets_ball() {
        let mut session = session();
        drop_ball(&mut session);
        session.tick(&TickInput::default());

        assert_eq!(session.lives, 2);
        assert_eq!(session.state, SessionState::Playing);
        // Reset then moved by nothing else this tick (no collisions at spawn)
        assert_eq!(session.ball.pos, session.config.ball_start());
        assert_eq!(session.ball.vel.y, -5.0);
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::LifeLost { lives_left: 2 }]
        );
    }

    #[test]
    fn test_three_falls_game_over() {
        let mut session = session();
        for expected in [2, 1] {
            drop_ball(&mut session);
            session.tick(&TickInput::default());
            assert_eq!(session.lives, expected);
            assert_eq!(session.state, SessionState::Playing);
        }

        drop_ball(&mut session);
        session.tick(&TickInput::default());
        assert_eq!(session.lives, 0);
        assert_eq!(session.state, SessionState::GameOver);
        // The final fall leaves the ball where it fell
        assert_eq!(session.ball.pos, Vec2::new(105.0, 604.0));

        let events = session.drain_events();
        assert_eq!(events.last(), Some(&GameEvent::GameOver));

        // Further ticks are no-ops
        let before = session.snapshot();
        session.tick(&TickInput {
            move_left: true,
            ..Default::default()
        });
        assert_eq!(session.snapshot(), before);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_events_last_one_tick() {
        let mut session = session();
        for _ in 0..1000 {
            // Resting on the paddle: every tick records a hit
            session.ball.pos = Vec2::new(392.5, 540.0);
            session.ball.vel = Vec2::new(0.0, 5.0);
            session.tick(&TickInput::default());
            assert_eq!(session.events.len(), 1);
        }

        // A quiet tick leaves nothing behind
        session.ball.pos = Vec2::new(392.5, 400.0);
        session.ball.vel = Vec2::new(0.0, -5.0);
        session.tick(&TickInput::default());
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_single_hit_per_tick() {
        let mut session = session();
        // Straddles targets 0 and 1 after moving up 5
        session.ball.pos = Vec2::new(72.0, 65.0);
        session.ball.vel = Vec2::new(0.0, -5.0);

        session.tick(&TickInput::default());

        assert_eq!(session.score, 10);
        assert_eq!(session.targets.remaining(), 49);
        assert!(session.targets.targets()[0].destroyed);
        assert!(!session.targets.targets()[1].destroyed);
    }

    #[test]
    fn test_victory_after_all_targets() {
        let mut session = session();
        let count = session.targets.len();
        for index in (0..count).rev() {
            assert_eq!(session.state, SessionState::Playing);
            park_in_target(&mut session, index);
            session.tick(&TickInput::default());
            assert!(session.targets.targets()[index].destroyed);
        }

        assert_eq!(session.state, SessionState::Victory);
        assert_eq!(session.score, 10 * count as u64);
        assert_eq!(session.drain_events().last(), Some(&GameEvent::Victory));

        // Stays won until reset
        for _ in 0..10 {
            session.tick(&TickInput::default());
        }
        assert_eq!(session.state, SessionState::Victory);

        session.reset();
        assert_eq!(session.state, SessionState::Playing);
        assert_eq!(session.targets.remaining(), count);
    }

    proptest! {
        #[test]
        fn prop_victory_in_any_order(order in Just((0..6usize).collect::<Vec<_>>()).prop_shuffle()) {
            let config = Config {
                target_rows: 2,
                target_cols: 3,
                ..Default::default()
            };
            let mut session = Session::with_seed(config, 77).expect("valid config");
            for (n, index) in order.iter().enumerate() {
                prop_assert_eq!(session.state, SessionState::Playing);
                park_in_target(&mut session, *index);
                session.tick(&TickInput::default());
                prop_assert_eq!(session.score, 10 * (n as u64 + 1));
            }
            prop_assert_eq!(session.state, SessionState::Victory);
        }
    }

    #[test]
    fn test_restart_only_when_ended() {
        let mut session = session();
        session.score = 30;
        session.tick(&TickInput {
            restart_requested: true,
            ..Default::default()
        });
        assert_eq!(session.score, 30);

        session.state = SessionState::GameOver;
        session.tick(&TickInput {
            restart_requested: true,
            ..Default::default()
        });
        assert_eq!(session.state, SessionState::Playing);
        assert_eq!(session.score, 0);
        assert_eq!(session.lives, 3);
        // The same tick also simulated one step
        assert_eq!(session.time_ticks, 1);
    }

    #[test]
    fn test_quit_latches() {
        let mut session = session();
        session.tick(&TickInput {
            quit_requested: true,
            ..Default::default()
        });
        assert!(session.quit_requested());
        session.tick(&TickInput::default());
        assert!(session.quit_requested());
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed produce identical results
        let mut a = Session::with_seed(Config::default(), 99999).expect("valid config");
        let mut b = Session::with_seed(Config::default(), 99999).expect("valid config");

        let inputs = [
            TickInput {
                move_left: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                move_right: true,
                ..Default::default()
            },
        ];
        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            a.tick(input);
            b.tick(input);
        }

        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.ball_velocity(), b.ball_velocity());
    }
}
