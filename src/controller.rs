/// Game flow.  Holds the Running/Paused state machine, runs the fixed
/// per-tick sequence, translates player commands, and exposes a render
/// snapshot for whatever presentation layer sits on top.

use std::time::Instant;

use crate::entities::{Direction, SpaceObject};
use crate::model::GameModel;

/// The discrete command alphabet accepted from the input source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Pause,
}

impl Command {
    /// Parse a single-letter code, case-insensitively.  Anything
    /// outside the alphabet is `None`.
    pub fn parse(token: &str) -> Option<Command> {
        match token.to_ascii_uppercase().as_str() {
            "W" => Some(Command::Up),
            "S" => Some(Command::Down),
            "A" => Some(Command::Left),
            "D" => Some(Command::Right),
            "F" => Some(Command::Fire),
            "P" => Some(Command::Pause),
            _ => None,
        }
    }
}

/// Named stats published alongside the entity list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameStats {
    pub score: u32,
    pub health: i32,
    pub level: u32,
    pub time_survived_secs: u64,
}

/// Everything the presentation layer needs for one frame.
pub struct Snapshot<'a> {
    pub objects: &'a [SpaceObject],
    pub stats: GameStats,
}

pub struct GameController {
    model: GameModel,
    running: bool,
    started: Instant,
}

impl GameController {
    pub fn new(model: GameModel) -> Self {
        Self {
            model,
            running: true,
            started: Instant::now(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn model(&self) -> &GameModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut GameModel {
        &mut self.model
    }

    /// Advance the simulation by one tick.  Does nothing while paused.
    ///
    /// The order is load-bearing: spawns come after collisions so a
    /// fresh object can't collide on the tick it appears, and leveling
    /// runs last so a raised spawn rate first applies next tick.
    pub fn on_tick(&mut self, tick: u64) {
        if !self.running {
            return;
        }
        self.model.update_game(tick);
        self.model.check_collisions();
        self.model.spawn_objects();
        self.model.level_up();
    }

    /// Accept one raw token from the input source.  Unrecognized
    /// tokens are logged and otherwise ignored.
    pub fn handle_input(&mut self, token: &str) {
        match Command::parse(token) {
            Some(command) => self.handle_command(command),
            None => self.model.log("Invalid input. Use W, A, S, D, F, or P."),
        }
    }

    /// Apply one command.  Pause always works; everything else is
    /// gated on the Running state.
    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::Pause => self.toggle_pause(),
            _ if !self.running => {}
            Command::Up => self.steer(Direction::Up),
            Command::Down => self.steer(Direction::Down),
            Command::Left => self.steer(Direction::Left),
            Command::Right => self.steer(Direction::Right),
            Command::Fire => self.model.fire_bullet(),
        }
    }

    fn steer(&mut self, direction: Direction) {
        // A rejected move is the player's problem, not a fault: log it
        // and carry on with the ship where it was.
        if let Err(out_of_bounds) = self.model.move_ship(direction) {
            self.model.log(&out_of_bounds.to_string());
        }
    }

    fn toggle_pause(&mut self) {
        self.running = !self.running;
        if self.running {
            self.model.log("Game resumed");
        } else {
            self.model.log("Game paused");
        }
    }

    /// The full entity list plus named stats for the render sink.
    pub fn snapshot(&self) -> Snapshot<'_> {
        let ship = self.model.ship();
        Snapshot {
            objects: self.model.space_objects(),
            stats: GameStats {
                score: ship.score(),
                health: ship.health(),
                level: self.model.level(),
                time_survived_secs: self.started.elapsed().as_secs(),
            },
        }
    }
}
