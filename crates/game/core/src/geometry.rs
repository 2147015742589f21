//! Grid coordinates and displacements.
//!
//! Coordinates follow the protocol's screen convention: `x` grows to the
//! east, `y` grows to the south (row index).

use core::fmt;
use core::ops::Add;

use arrayvec::ArrayVec;

/// Discrete grid position expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance, ignoring walls.
    ///
    /// This is the "straight-line" distance of the threat rules. It is not a
    /// path cost; use [`crate::PathFinder::real_distance`] for that.
    pub fn distance_to(self, other: Point) -> u32 {
        Vector::between(self, other).length()
    }

    /// The four axis neighbours in [`CardinalDirection::ALL`] order.
    ///
    /// Neighbours may lie outside the grid; filtering is the caller's job.
    pub fn neighbors(self) -> ArrayVec<Point, 4> {
        CardinalDirection::ALL
            .iter()
            .map(|dir| self + dir.vector())
            .collect()
    }

    pub fn step(self, direction: CardinalDirection) -> Point {
        self + direction.vector()
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

/// Protocol form: `x y`.
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

/// Integer displacement between two points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Vector {
    pub dx: i32,
    pub dy: i32,
}

impl Vector {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    pub fn between(start: Point, end: Point) -> Self {
        Self::new(end.x - start.x, end.y - start.y)
    }

    /// Manhattan norm.
    pub fn length(self) -> u32 {
        self.dx.unsigned_abs() + self.dy.unsigned_abs()
    }
}

/// Axis-aligned step direction. No diagonals exist on this grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum CardinalDirection {
    West,
    East,
    North,
    South,
}

impl CardinalDirection {
    /// Fixed expansion order shared by the search and the line-of-sight rays.
    pub const ALL: [CardinalDirection; 4] = [
        CardinalDirection::West,
        CardinalDirection::East,
        CardinalDirection::North,
        CardinalDirection::South,
    ];

    pub const fn vector(self) -> Vector {
        match self {
            CardinalDirection::West => Vector::new(-1, 0),
            CardinalDirection::East => Vector::new(1, 0),
            CardinalDirection::North => Vector::new(0, -1),
            CardinalDirection::South => Vector::new(0, 1),
        }
    }
}
