//! Static world-space layout of the three main boards and the twelve
//! attack-board docking stations.
//!
//! Everything here is a pure function of a handful of spacing constants.
//! The main boards are stacked `LEVEL_HEIGHT` apart and shifted back by two
//! squares per level; each main board has four docking stations floating half
//! a level above its corners.
//!
//! ```text
//!            back-left  back-right
//!               [ ]        [ ]
//!                 +--------+
//!                 | 4 x 4  |      level n
//!                 +--------+
//!               [ ]        [ ]
//!           front-left  front-right
//! ```

use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{IndexError, IndexKind, IndexResult};

/// Distance between neighbouring square centres.
pub const SQUARE_HOP: f32 = 2.53;

/// Vertical distance between two main boards.
pub const LEVEL_HEIGHT: f32 = 10.0;

/// Height of a docking station above its main board.
pub const ATTACK_RISE: f32 = LEVEL_HEIGHT / 2.0;

/// X coordinate of the first column of every main board.
pub const BOARD_X: f32 = -2.0 * SQUARE_HOP + SQUARE_HOP / 2.0;

/// Y coordinate of each main board, bottom to top.
pub const LEVEL_Y: [f32; 3] = [
    -LEVEL_HEIGHT * 3.0 / 2.0,
    -LEVEL_HEIGHT / 2.0,
    LEVEL_HEIGHT / 2.0,
];

/// Z coordinate of the first row of each main board, bottom to top.
pub const LEVEL_Z: [f32; 3] = [-10.0, -10.0 + SQUARE_HOP * 2.0, -10.0 + SQUARE_HOP * 4.0];

/// A point or displacement in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// Horizontal, left to right.
    pub x: f32,
    /// Vertical, bottom to top.
    pub y: f32,
    /// Horizontal, front to back.
    pub z: f32,
}

impl Vec3 {
    /// The origin.
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    /// Create a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Vector with only a vertical component.
    #[must_use]
    pub const fn up(y: f32) -> Self {
        Self::new(0.0, y, 0.0)
    }

    /// Vector with only a depth component.
    #[must_use]
    pub const fn depth(z: f32) -> Self {
        Self::new(0.0, 0.0, z)
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Distance to another point.
    #[must_use]
    pub fn distance(self, other: Vec3) -> f32 {
        (self - other).length()
    }

    /// Linear interpolation; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Vec3, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        self + (other - self) * t
    }

    /// Component-wise comparison within `eps`.
    #[must_use]
    pub fn approx_eq(self, other: Vec3, eps: f32) -> bool {
        (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
            && (self.z - other.z).abs() <= eps
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// One of the three stacked main boards, `0` at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize")]
pub struct Level(u8);

impl Level {
    /// Number of main boards.
    pub const COUNT: usize = 3;

    /// Create a level.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 3`.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!((index as usize) < Self::COUNT, "level out of range");
        Self(index)
    }

    /// Zero-based index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// All levels, bottom to top.
    pub fn all() -> impl Iterator<Item = Level> {
        (0..3).map(Level)
    }
}

impl TryFrom<usize> for Level {
    type Error = IndexError;

    fn try_from(value: usize) -> IndexResult<Self> {
        u8::try_from(value)
            .ok()
            .filter(|&v| usize::from(v) < Self::COUNT)
            .map(Level)
            .ok_or(IndexError {
                kind: IndexKind::Level,
                value,
            })
    }
}

/// Corner of a main board where an attack board can dock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    /// Right side, front edge.
    FrontRight,
    /// Left side, front edge.
    FrontLeft,
    /// Right side, back edge.
    BackRight,
    /// Left side, back edge.
    BackLeft,
}

impl Corner {
    /// All corners in station order.
    pub const ALL: [Corner; 4] = [
        Corner::FrontRight,
        Corner::FrontLeft,
        Corner::BackRight,
        Corner::BackLeft,
    ];

    /// Offset of this corner's station from the main board origin, ignoring height.
    #[must_use]
    pub const fn offset(self) -> Vec3 {
        let x = match self {
            Corner::FrontRight | Corner::BackRight => SQUARE_HOP * 3.0,
            Corner::FrontLeft | Corner::BackLeft => -SQUARE_HOP,
        };
        let z = match self {
            Corner::FrontRight | Corner::FrontLeft => -SQUARE_HOP,
            Corner::BackRight | Corner::BackLeft => SQUARE_HOP * 3.0,
        };
        Vec3::new(x, 0.0, z)
    }

    const fn index(self) -> u8 {
        match self {
            Corner::FrontRight => 0,
            Corner::FrontLeft => 1,
            Corner::BackRight => 2,
            Corner::BackLeft => 3,
        }
    }
}

/// One of the twelve docking stations, `level * 4 + corner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize")]
pub struct Station(u8);

impl Station {
    /// Number of docking stations.
    pub const COUNT: usize = 12;

    /// Create a station from its raw index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 12`.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!((index as usize) < Self::COUNT, "station out of range");
        Self(index)
    }

    /// The station at `corner` of `level`.
    #[must_use]
    pub const fn at(level: Level, corner: Corner) -> Self {
        Self(level.0 * 4 + corner.index())
    }

    /// Zero-based index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Main board this station belongs to.
    #[must_use]
    pub const fn level(self) -> Level {
        Level(self.0 / 4)
    }

    /// Corner of the main board this station sits on.
    #[must_use]
    pub const fn corner(self) -> Corner {
        Corner::ALL[(self.0 % 4) as usize]
    }

    /// All stations in index order.
    pub fn all() -> impl Iterator<Item = Station> {
        (0..12).map(Station)
    }
}

impl TryFrom<usize> for Station {
    type Error = IndexError;

    fn try_from(value: usize) -> IndexResult<Self> {
        u8::try_from(value)
            .ok()
            .filter(|&v| usize::from(v) < Self::COUNT)
            .map(Station)
            .ok_or(IndexError {
                kind: IndexKind::Station,
                value,
            })
    }
}

/// Position of the first square (row 0, column 0) of a main board.
#[must_use]
pub const fn main_board_origin(level: Level) -> Vec3 {
    Vec3::new(BOARD_X, LEVEL_Y[level.index()], LEVEL_Z[level.index()])
}

/// Offset of a cell within a 4x4 grid.
#[must_use]
pub fn square_offset(row: u8, col: u8) -> Vec3 {
    Vec3::new(f32::from(col) * SQUARE_HOP, 0.0, f32::from(row) * SQUARE_HOP)
}

/// Position of a main board square.
#[must_use]
pub fn main_square_position(level: Level, row: u8, col: u8) -> Vec3 {
    main_board_origin(level) + square_offset(row, col)
}

/// Position of the first cell of an attack board docked at `station`.
#[must_use]
pub const fn docking_station(station: Station) -> Vec3 {
    let origin = main_board_origin(station.level());
    let corner = station.corner().offset();
    Vec3::new(
        origin.x + corner.x,
        origin.y + ATTACK_RISE + corner.y,
        origin.z + corner.z,
    )
}

/// Offset of cell `cell` (`0..4`) within a 2x2 attack board.
///
/// Cells run left to right, then front to back.
#[must_use]
pub fn attack_square_offset(cell: usize) -> Vec3 {
    debug_assert!(cell < 4, "attack board cell out of range");
    // cell < 4, so row and col are 0 or 1
    let row = u8::from(cell >= 2);
    let col = u8::from(cell % 2 == 1);
    square_offset(row, col)
}

/// Position of cell `cell` of an attack board docked at `station`.
#[must_use]
pub fn attack_square_position(station: Station, cell: usize) -> Vec3 {
    docking_station(station) + attack_square_offset(cell)
}

/// Number of main levels crossed by a vertical move from `from_y` to `to_y`.
///
/// Attack boards sit half a level up, so the result can be fractional.
#[must_use]
pub fn levels_crossed(from_y: f32, to_y: f32) -> f32 {
    (from_y - to_y).abs() / LEVEL_HEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_main_board_origins_stack_upward_and_back() {
        let origins: Vec<Vec3> = Level::all().map(main_board_origin).collect();
        for pair in origins.windows(2) {
            assert!((pair[1].y - pair[0].y - LEVEL_HEIGHT).abs() < EPS);
            assert!((pair[1].z - pair[0].z - 2.0 * SQUARE_HOP).abs() < EPS);
            assert!((pair[1].x - pair[0].x).abs() < EPS);
        }
        assert!(origins[0].approx_eq(Vec3::new(-3.795, -15.0, -10.0), EPS));
    }

    #[test]
    fn test_square_offset_is_column_then_row() {
        assert!(square_offset(0, 0).approx_eq(Vec3::ZERO, EPS));
        assert!(square_offset(0, 3).approx_eq(Vec3::new(3.0 * SQUARE_HOP, 0.0, 0.0), EPS));
        assert!(square_offset(2, 1).approx_eq(Vec3::new(SQUARE_HOP, 0.0, 2.0 * SQUARE_HOP), EPS));
    }

    #[test]
    fn test_docking_stations_are_half_a_level_up() {
        for station in Station::all() {
            let base = main_board_origin(station.level());
            let dock = docking_station(station);
            assert!((dock.y - base.y - ATTACK_RISE).abs() < EPS);
        }
    }

    #[test]
    fn test_docking_station_corners() {
        let level = Level::new(0);
        let front_right = docking_station(Station::at(level, Corner::FrontRight));
        let back_left = docking_station(Station::at(level, Corner::BackLeft));

        assert!((front_right.x - (BOARD_X + 3.0 * SQUARE_HOP)).abs() < EPS);
        assert!((front_right.z - (LEVEL_Z[0] - SQUARE_HOP)).abs() < EPS);
        assert!((back_left.x - (BOARD_X - SQUARE_HOP)).abs() < EPS);
        assert!((back_left.z - (LEVEL_Z[0] + 3.0 * SQUARE_HOP)).abs() < EPS);
    }

    #[test]
    fn test_station_roundtrips_level_and_corner() {
        for station in Station::all() {
            assert_eq!(Station::at(station.level(), station.corner()), station);
        }
        assert_eq!(Station::new(10).level(), Level::new(2));
        assert_eq!(Station::new(10).corner(), Corner::BackRight);
    }

    #[test]
    fn test_stations_are_distinct() {
        let docks: Vec<Vec3> = Station::all().map(docking_station).collect();
        for (i, a) in docks.iter().enumerate() {
            for b in &docks[i + 1..] {
                assert!(a.distance(*b) > 1.0);
            }
        }
    }

    #[test]
    fn test_attack_square_offsets() {
        assert!(attack_square_offset(0).approx_eq(Vec3::ZERO, EPS));
        assert!(attack_square_offset(1).approx_eq(Vec3::new(SQUARE_HOP, 0.0, 0.0), EPS));
        assert!(attack_square_offset(2).approx_eq(Vec3::new(0.0, 0.0, SQUARE_HOP), EPS));
        assert!(attack_square_offset(3).approx_eq(Vec3::new(SQUARE_HOP, 0.0, SQUARE_HOP), EPS));
    }

    #[test]
    fn test_try_from_rejects_out_of_range() {
        assert!(Station::try_from(11).is_ok());
        let err = Station::try_from(12).unwrap_err();
        assert_eq!(err.kind, IndexKind::Station);
        assert!(Level::try_from(3).is_err());
        assert!(Level::try_from(usize::MAX).is_err());
    }

    #[test]
    #[should_panic(expected = "station out of range")]
    fn test_station_new_panics_out_of_range() {
        let _ = Station::new(12);
    }

    #[test]
    fn test_levels_crossed() {
        assert!((levels_crossed(LEVEL_Y[0], LEVEL_Y[2]) - 2.0).abs() < EPS);
        assert!(levels_crossed(LEVEL_Y[1], LEVEL_Y[1]).abs() < EPS);
        assert!((levels_crossed(LEVEL_Y[0] + ATTACK_RISE, LEVEL_Y[0]) - 0.5).abs() < EPS);
    }

    #[test]
    fn test_lerp_clamps() {
        let a = Vec3::ZERO;
        let b = Vec3::new(2.0, 4.0, -6.0);
        assert!(a.lerp(b, 0.5).approx_eq(Vec3::new(1.0, 2.0, -3.0), EPS));
        assert!(a.lerp(b, 2.0).approx_eq(b, EPS));
        assert!(a.lerp(b, -1.0).approx_eq(a, EPS));
    }
}
