/// The game model.  Owns every object on the grid and implements the
/// per-tick rules: boundary sweep, collision resolution, probabilistic
/// spawning and score-driven leveling.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::entities::{
    Direction, Kind, ObjectId, OutOfBounds, SpaceObject, MAX_HEALTH,
};
use crate::logger::Logger;

// ── Tunables ─────────────────────────────────────────────────────────────────

pub const GAME_WIDTH: i32 = 10;
pub const GAME_HEIGHT: i32 = 20;
pub const START_LEVEL: u32 = 1;
/// Score required per level: `level * SCORE_THRESHOLD`.
pub const SCORE_THRESHOLD: u32 = 100;
/// Percentage chance per tick that an asteroid spawns.
pub const START_SPAWN_RATE: f64 = 2.0;
/// Added to the spawn rate on every level-up.
pub const SPAWN_RATE_INCREASE: f64 = 5.0;
pub const ASTEROID_DAMAGE: i32 = 10;
pub const ENEMY_DAMAGE: i32 = 20;
/// Enemy spawn chance as a fraction of the asteroid chance.
pub const ENEMY_SPAWN_RATE: f64 = 0.5;
/// Power-up spawn chance as a fraction of the asteroid chance.
pub const POWER_UP_SPAWN_RATE: f64 = 0.25;
pub const SHIP_START_X: i32 = 5;
pub const SHIP_START_Y: i32 = 10;

/// What a resolved collision does.  Computed from an immutable view of
/// the pair, then applied, so the pair scan never mutates mid-lookup.
enum Resolution {
    PowerUp,
    Damage(i32),
    DestroyPair,
    Nothing,
}

pub struct GameModel {
    objects: Vec<SpaceObject>,
    ship_id: ObjectId,
    next_id: ObjectId,
    level: u32,
    spawn_rate: f64,
    rng: StdRng,
    logger: Box<dyn Logger>,
}

impl GameModel {
    /// A fresh game: one ship at the start cell, level 1, base spawn
    /// rate, nondeterministically seeded RNG.
    pub fn new(logger: impl Logger + 'static) -> Self {
        Self::build(Box::new(logger), StdRng::from_entropy())
    }

    /// Same as [`GameModel::new`] but with a fixed RNG seed, so spawn
    /// sequences replay identically.  Meant for tests.
    pub fn with_seed(logger: impl Logger + 'static, seed: u64) -> Self {
        Self::build(Box::new(logger), StdRng::seed_from_u64(seed))
    }

    fn build(logger: Box<dyn Logger>, rng: StdRng) -> Self {
        let mut model = Self {
            objects: Vec::new(),
            ship_id: 0,
            next_id: 0,
            level: START_LEVEL,
            spawn_rate: START_SPAWN_RATE,
            rng,
            logger,
        };
        model.ship_id = model.add_object(
            SHIP_START_X,
            SHIP_START_Y,
            Kind::Ship { health: MAX_HEALTH, score: 0 },
        );
        model
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn space_objects(&self) -> &[SpaceObject] {
        &self.objects
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn spawn_rate(&self) -> f64 {
        self.spawn_rate
    }

    pub fn ship(&self) -> &SpaceObject {
        self.objects
            .iter()
            .find(|o| o.id() == self.ship_id)
            .expect("the ship is never removed from the collection")
    }

    fn ship_mut(&mut self) -> &mut SpaceObject {
        let ship_id = self.ship_id;
        self.objects
            .iter_mut()
            .find(|o| o.id() == ship_id)
            .expect("the ship is never removed from the collection")
    }

    /// Forward a line to the injected logger.
    pub fn log(&mut self, text: &str) {
        self.logger.log(text);
    }

    // ── Registration ─────────────────────────────────────────────────────────

    /// Register a new object and return its identity.
    ///
    /// Exactly one ship may ever exist; registering a second one is a
    /// contract violation.
    pub fn add_object(&mut self, x: i32, y: i32, kind: Kind) -> ObjectId {
        if matches!(kind, Kind::Ship { .. }) {
            assert!(
                self.objects.iter().all(|o| !o.is_ship()),
                "the model owns exactly one ship"
            );
        }
        let id = self.next_id;
        self.next_id += 1;
        self.objects.push(SpaceObject::new(id, x, y, kind));
        id
    }

    // ── Per-tick rules ───────────────────────────────────────────────────────

    /// Advance every object, then sweep out everything that has left
    /// the play area below (`y > GAME_HEIGHT`).
    pub fn update_game(&mut self, tick: u64) {
        for object in &mut self.objects {
            object.tick(tick);
        }
        self.objects.retain(|o| o.y <= GAME_HEIGHT);
    }

    /// Resolve every exact-cell collision.
    ///
    /// Pairs are scanned over a stable index snapshot and removals are
    /// applied afterwards, so the outcome (which objects get removed)
    /// is independent of iteration order.  A pair only resolves when
    /// exactly one member is the ship or a bullet; anything else (two
    /// asteroids, say) passes through each other.
    pub fn check_collisions(&mut self) {
        let mut removed: Vec<ObjectId> = Vec::new();

        for i in 0..self.objects.len() {
            for j in (i + 1)..self.objects.len() {
                if self.objects[i].position() != self.objects[j].position() {
                    continue;
                }
                let i_drives = self.objects[i].is_ship() || self.objects[i].is_bullet();
                let j_drives = self.objects[j].is_ship() || self.objects[j].is_bullet();
                let (subject, other) = if i_drives {
                    (i, j)
                } else if j_drives {
                    (j, i)
                } else {
                    continue;
                };
                self.resolve(subject, other, &mut removed);
            }
        }

        if !removed.is_empty() {
            self.objects.retain(|o| !removed.contains(&o.id()));
        }
    }

    /// `subject` is the ship or a bullet; `other` is whatever it hit.
    fn resolve(&mut self, subject: usize, other: usize, removed: &mut Vec<ObjectId>) {
        let outcome = if self.objects[subject].is_ship() {
            match self.objects[other].kind {
                // Power-ups stay in the collection after firing; the
                // effect re-applies every tick the ship sits on them.
                Kind::HealthPowerUp | Kind::ShieldPowerUp => Resolution::PowerUp,
                Kind::Asteroid => Resolution::Damage(ASTEROID_DAMAGE),
                Kind::Enemy => Resolution::Damage(ENEMY_DAMAGE),
                Kind::Ship { .. } | Kind::Bullet => Resolution::Nothing,
            }
        } else {
            match self.objects[other].kind {
                Kind::Enemy => Resolution::DestroyPair,
                _ => Resolution::Nothing,
            }
        };

        match outcome {
            Resolution::PowerUp => {
                let power_up = self.objects[other].clone();
                power_up.apply_effect(&mut self.objects[subject]);
            }
            Resolution::Damage(damage) => {
                self.objects[subject].take_damage(damage);
            }
            Resolution::DestroyPair => {
                let bullet = self.objects[subject].id();
                let enemy = self.objects[other].id();
                // A spent bullet (or already-destroyed enemy) cannot
                // take part in a second resolution this sweep.
                if !removed.contains(&bullet) && !removed.contains(&enemy) {
                    removed.push(bullet);
                    removed.push(enemy);
                }
            }
            Resolution::Nothing => {}
        }
    }

    /// Roll the per-tick spawn chances.  The draw order on the RNG is
    /// fixed (asteroid chance, asteroid x, enemy chance, enemy x,
    /// power-up chance, power-up x, power-up type); reordering the
    /// calls breaks seeded replays.
    pub fn spawn_objects(&mut self) {
        if f64::from(self.rng.gen_range(0..100)) < self.spawn_rate {
            let x = self.rng.gen_range(0..GAME_WIDTH);
            if !self.is_ship_at(x, 0) {
                self.add_object(x, 0, Kind::Asteroid);
            }
        }

        if f64::from(self.rng.gen_range(0..100)) < self.spawn_rate * ENEMY_SPAWN_RATE {
            let x = self.rng.gen_range(0..GAME_WIDTH);
            if !self.is_ship_at(x, 0) {
                self.add_object(x, 0, Kind::Enemy);
            }
        }

        if f64::from(self.rng.gen_range(0..100)) < self.spawn_rate * POWER_UP_SPAWN_RATE {
            let x = self.rng.gen_range(0..GAME_WIDTH);
            if !self.is_ship_at(x, 0) {
                let kind = if self.rng.gen_bool(0.5) {
                    Kind::ShieldPowerUp
                } else {
                    Kind::HealthPowerUp
                };
                self.add_object(x, 0, kind);
            }
        }
    }

    fn is_ship_at(&self, x: i32, y: i32) -> bool {
        self.ship().position() == (x, y)
    }

    /// Level up once if the ship's score has reached the next
    /// threshold.  Raises the spawn rate; at most one level per call.
    pub fn level_up(&mut self) {
        let required_score = self.level * SCORE_THRESHOLD;
        if self.ship().score() >= required_score {
            self.level += 1;
            self.spawn_rate += SPAWN_RATE_INCREASE;
            let message = format!(
                "Level Up! Welcome to Level {}. Spawn rate increased to {:.1}%.",
                self.level, self.spawn_rate
            );
            self.logger.log(&message);
        }
    }

    // ── Player actions ───────────────────────────────────────────────────────

    /// Spawn a bullet at the ship's current cell.
    pub fn fire_bullet(&mut self) {
        let (x, y) = self.ship().position();
        self.add_object(x, y, Kind::Bullet);
        self.logger.log("Bullet fired!");
    }

    /// Move the ship one cell, logging the new position.  A rejected
    /// move leaves the ship where it was and surfaces the edge that
    /// would have been crossed.
    pub fn move_ship(&mut self, direction: Direction) -> Result<(), OutOfBounds> {
        self.ship_mut().try_move(direction)?;
        let (x, y) = self.ship().position();
        self.logger.log(&format!("Ship moved to ({}, {})", x, y));
        Ok(())
    }
}
