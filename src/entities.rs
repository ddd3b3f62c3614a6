/// Everything that lives on the game grid: the object variants, their
/// per-tick behaviour, and player-directed movement with bounds checks.

use std::error::Error;
use std::fmt;

use crate::model::{GAME_HEIGHT, GAME_WIDTH};

/// Health restored by a health power-up on contact.
pub const HEALING_EFFECT: i32 = 20;
/// Score awarded by a shield power-up on contact.
pub const SHIELD_EFFECT: u32 = 50;
/// Maximum (and starting) ship health.
pub const MAX_HEALTH: i32 = 100;

/// Identity assigned by the model when an object is registered.
/// Removal is tracked by id, so a sweep can never confuse two objects
/// sitting on the same cell.
pub type ObjectId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Which grid edge a rejected move would have crossed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// A directional move would have left the grid.  The position is left
/// untouched when this is returned — never a partial update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfBounds {
    pub edge: Edge,
}

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.edge {
            Edge::Top => "up",
            Edge::Bottom => "down",
            Edge::Left => "left",
            Edge::Right => "right",
        };
        write!(f, "Cannot move {}. Out of bounds!", side)
    }
}

impl Error for OutOfBounds {}

/// Display glyph plus asset reference.  Opaque to the simulation; only
/// the presentation layer interprets it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderInfo {
    pub glyph: char,
    pub asset: &'static str,
}

/// Variant-specific state.  Shared position lives on `SpaceObject`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Kind {
    Ship { health: i32, score: u32 },
    Bullet,
    Asteroid,
    Enemy,
    ShieldPowerUp,
    HealthPowerUp,
}

/// One object on the grid.
///
/// `x` stays within `[0, GAME_WIDTH)` by construction; `y` is
/// unbounded — objects that drift past `GAME_HEIGHT` are removed by the
/// model's boundary sweep, not here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpaceObject {
    id: ObjectId,
    pub x: i32,
    pub y: i32,
    pub kind: Kind,
}

impl SpaceObject {
    pub fn new(id: ObjectId, x: i32, y: i32, kind: Kind) -> Self {
        Self { id, x, y, kind }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn is_ship(&self) -> bool {
        matches!(self.kind, Kind::Ship { .. })
    }

    pub fn is_bullet(&self) -> bool {
        matches!(self.kind, Kind::Bullet)
    }

    /// Advance one discrete time step.  Deterministic: a pure function
    /// of the prior state and the global tick counter.
    ///
    /// Bullets rise one cell every tick; asteroids and enemies descend
    /// one cell on ticks divisible by 10; the ship and power-ups never
    /// move on their own.
    pub fn tick(&mut self, tick: u64) {
        match self.kind {
            Kind::Bullet => self.y -= 1,
            Kind::Asteroid | Kind::Enemy => {
                if tick % 10 == 0 {
                    self.y += 1;
                }
            }
            Kind::Ship { .. } | Kind::ShieldPowerUp | Kind::HealthPowerUp => {}
        }
    }

    pub fn render_info(&self) -> RenderInfo {
        match self.kind {
            Kind::Ship { .. } => RenderInfo { glyph: '▲', asset: "assets/ship.png" },
            Kind::Bullet => RenderInfo { glyph: '║', asset: "assets/bullet.png" },
            Kind::Asteroid => RenderInfo { glyph: '●', asset: "assets/asteroid.png" },
            Kind::Enemy => RenderInfo { glyph: '¥', asset: "assets/enemy.png" },
            Kind::ShieldPowerUp => RenderInfo { glyph: '◆', asset: "assets/shield.png" },
            Kind::HealthPowerUp => RenderInfo { glyph: '♥', asset: "assets/health.png" },
        }
    }

    /// Move one cell in `direction`, failing without side effects when
    /// the target cell lies outside `[0, GAME_WIDTH) × [0, GAME_HEIGHT)`.
    ///
    /// Only player-directed movement goes through here; automatic
    /// per-tick movement is unconditional.
    pub fn try_move(&mut self, direction: Direction) -> Result<(), OutOfBounds> {
        let (mut moved_x, mut moved_y) = (self.x, self.y);
        match direction {
            Direction::Up => moved_y -= 1,
            Direction::Down => moved_y += 1,
            Direction::Left => moved_x -= 1,
            Direction::Right => moved_x += 1,
        }

        if moved_x >= GAME_WIDTH {
            return Err(OutOfBounds { edge: Edge::Right });
        }
        if moved_x < 0 {
            return Err(OutOfBounds { edge: Edge::Left });
        }
        if moved_y >= GAME_HEIGHT {
            return Err(OutOfBounds { edge: Edge::Bottom });
        }
        if moved_y < 0 {
            return Err(OutOfBounds { edge: Edge::Top });
        }

        self.x = moved_x;
        self.y = moved_y;
        Ok(())
    }

    // ── Ship state ───────────────────────────────────────────────────────────

    pub fn health(&self) -> i32 {
        match self.kind {
            Kind::Ship { health, .. } => health,
            _ => 0,
        }
    }

    pub fn score(&self) -> u32 {
        match self.kind {
            Kind::Ship { score, .. } => score,
            _ => 0,
        }
    }

    /// Reduce health, clamped to `[0, MAX_HEALTH]` for any magnitude.
    /// No-op on anything but the ship.
    pub fn take_damage(&mut self, damage: i32) {
        if let Kind::Ship { health, .. } = &mut self.kind {
            *health = health.saturating_sub(damage).clamp(0, MAX_HEALTH);
        }
    }

    /// Restore health, clamped to `[0, MAX_HEALTH]` for any magnitude.
    pub fn heal(&mut self, amount: i32) {
        if let Kind::Ship { health, .. } = &mut self.kind {
            *health = health.saturating_add(amount).clamp(0, MAX_HEALTH);
        }
    }

    /// Add points.  Score never decreases.
    pub fn add_score(&mut self, points: u32) {
        if let Kind::Ship { score, .. } = &mut self.kind {
            *score = score.saturating_add(points);
        }
    }

    /// Apply this power-up's effect to the ship.  Anything that is not
    /// a power-up has no effect.
    pub fn apply_effect(&self, ship: &mut SpaceObject) {
        match self.kind {
            Kind::HealthPowerUp => ship.heal(HEALING_EFFECT),
            Kind::ShieldPowerUp => ship.add_score(SHIELD_EFFECT),
            _ => {}
        }
    }
}
