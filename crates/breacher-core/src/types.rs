//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

use crate::constants::TICK_RATE;

/// Integer tile coordinate on the battle grid.
/// x = column (East), y = row (South, grows downward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

/// Continuous 2D position in tile units, used for interpolated
/// actor positions between committed grid cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

/// Stable actor identifier, assigned in spawn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

/// Stable identifier for a map interactable (door, terminal, hazard).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InteractableId(pub u32);

/// 24-bit display tint carried through to snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// The eight grid directions, clockwise from North.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dir8 {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl GridPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between tile centers, in tiles.
    pub fn distance_to(&self, other: GridPos) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Chebyshev (king-move) distance in tiles.
    pub fn chebyshev_to(&self, other: GridPos) -> i32 {
        (other.x - self.x).abs().max((other.y - self.y).abs())
    }

    pub fn offset(&self, dx: i32, dy: i32) -> GridPos {
        GridPos::new(self.x + dx, self.y + dy)
    }

    /// Bearing to another tile in radians (0 = North, clockwise).
    pub fn bearing_to(&self, other: GridPos) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        dx.atan2(-dy).rem_euclid(std::f64::consts::TAU)
    }
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Center of a grid cell in continuous coordinates.
    pub fn from_grid(pos: GridPos) -> Self {
        Self {
            x: pos.x as f64,
            y: pos.y as f64,
        }
    }

    /// Linear interpolation toward `other` by `t` in [0, 1].
    pub fn lerp(&self, other: Vec2, t: f64) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        Vec2 {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Dir8 {
    pub const ALL: [Dir8; 8] = [
        Dir8::North,
        Dir8::NorthEast,
        Dir8::East,
        Dir8::SouthEast,
        Dir8::South,
        Dir8::SouthWest,
        Dir8::West,
        Dir8::NorthWest,
    ];

    /// Unit grid offset for this direction.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Dir8::North => (0, -1),
            Dir8::NorthEast => (1, -1),
            Dir8::East => (1, 0),
            Dir8::SouthEast => (1, 1),
            Dir8::South => (0, 1),
            Dir8::SouthWest => (-1, 1),
            Dir8::West => (-1, 0),
            Dir8::NorthWest => (-1, -1),
        }
    }

    /// Index into [`Dir8::ALL`], clockwise from North.
    pub fn index(&self) -> usize {
        match self {
            Dir8::North => 0,
            Dir8::NorthEast => 1,
            Dir8::East => 2,
            Dir8::SouthEast => 3,
            Dir8::South => 4,
            Dir8::SouthWest => 5,
            Dir8::West => 6,
            Dir8::NorthWest => 7,
        }
    }

    /// Heading of this direction in radians (0 = North, clockwise).
    pub fn heading(&self) -> f64 {
        self.index() as f64 * std::f64::consts::TAU / 8.0
    }

    /// Octant classification of the direction from one tile toward another.
    /// Returns North when the tiles coincide.
    pub fn toward(from: GridPos, to: GridPos) -> Dir8 {
        if from == to {
            return Dir8::North;
        }
        let angle = from.bearing_to(to);
        let sector = (angle / (std::f64::consts::TAU / 8.0)).round() as usize % 8;
        Dir8::ALL[sector]
    }
}
