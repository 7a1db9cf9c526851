//! Brickfall headless runner
//!
//! Drives a session at a fixed nominal rate with a simple autopilot and prints
//! the final snapshot as JSON. Usage: `brickfall [config.json] [max_ticks]`

use std::process::ExitCode;

use brickfall::consts::TICKS_PER_SECOND;
use brickfall::{Config, GameEvent, Session, TickInput};

/// Five simulated minutes
const DEFAULT_MAX_TICKS: u64 = 5 * 60 * TICKS_PER_SECOND as u64;

/// Runner state: the session plus the loop's own bookkeeping
struct Game {
    session: Session,
    input: TickInput,
    max_ticks: u64,
    ticks: u64,
    paddle_hits: u32,
}

impl Game {
    fn new(session: Session, max_ticks: u64) -> Self {
        Self {
            session,
            input: TickInput::default(),
            max_ticks,
            ticks: 0,
            paddle_hits: 0,
        }
    }

    /// Steer the paddle under the ball's center
    fn autopilot(&mut self) {
        let snap = self.session.snapshot();
        let ball_center = snap.ball.pos.x + snap.ball.diameter / 2.0;
        let paddle_center = snap.paddle.center().x;
        let dead_zone = self.session.config().paddle_speed;

        self.input.move_left = ball_center < paddle_center - dead_zone;
        self.input.move_right = ball_center > paddle_center + dead_zone;
        self.input.quit_requested = self.ticks + 1 >= self.max_ticks;
    }

    fn update(&mut self) {
        self.autopilot();
        self.session.tick(&self.input);
        self.ticks += 1;

        for event in self.session.drain_events() {
            match event {
                GameEvent::PaddleHit { .. } => self.paddle_hits += 1,
                GameEvent::TargetDestroyed { index, color } => {
                    log::debug!("Tick {}: target {} ({:?}) down", self.ticks, index, color)
                }
                GameEvent::LifeLost { lives_left } => {
                    log::info!("Tick {}: ball lost, {} lives left", self.ticks, lives_left)
                }
                GameEvent::GameOver | GameEvent::Victory => {
                    log::info!("Tick {}: {:?}", self.ticks, event)
                }
            }
        }
    }

    fn run(&mut self) {
        while !self.session.state().is_terminal() && !self.session.quit_requested() {
            self.update();
        }
        log::info!(
            "Stopped after {} ticks ({} paddle hits, score {})",
            self.ticks,
            self.paddle_hits,
            self.session.score()
        );
    }
}

fn load_config(path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            let config = Config::from_json_str(&json)?;
            log::info!("Loaded config from {}", path);
            Ok(config)
        }
        None => {
            log::info!("Using default config");
            Ok(Config::default())
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(args.first().map(String::as_str))?;
    let max_ticks = match args.get(1) {
        Some(arg) => arg.parse()?,
        None => DEFAULT_MAX_TICKS,
    };

    let session = Session::new(config)?;
    log::info!("Brickfall starting (seed {})", session.seed());

    let mut game = Game::new(session, max_ticks);
    game.run();

    println!("{}", serde_json::to_string_pretty(&game.session.snapshot())?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("brickfall: {err}");
            ExitCode::FAILURE
        }
    }
}
