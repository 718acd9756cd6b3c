//! The ground grid: square cells, each split into two triangles.
//!
//! All positions here are in tile-space, one cell edge is one unit. The
//! diagonal of a cell flips in a checkerboard pattern, so the triangle
//! edges of neighbouring cells always meet without T-junctions.

use std::ops::{Add, Mul, Sub};

/// A 2D position in tile-space. `y` is the north axis of the ground.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TilePosition {
    pub x: f64,
    pub y: f64,
}

impl TilePosition {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn distance_squared(self, other: Self) -> f64 {
        (self - other).dot(self - other)
    }

    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

impl Add for TilePosition {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for TilePosition {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for TilePosition {
    type Output = Self;

    fn mul(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

pub type TileTriangle = [TilePosition; 3];

/// Twice the signed area, positive when counter clockwise
pub fn tile_area_doubled(triangle: &TileTriangle) -> f64 {
    (triangle[1] - triangle[0]).cross(triangle[2] - triangle[0])
}

/// Twice the signed area of any simple polygon (shoelace)
pub fn polygon_area_doubled(polygon: &[TilePosition]) -> f64 {
    let count = polygon.len();
    (0..count)
        .map(|index| polygon[index].cross(polygon[(index + 1) % count]))
        .sum()
}

/// Index of one grid cell. Inside a bounded grid both parts are in `[0, segment_count)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex {
    pub y: i64,
    pub x: i64,
}

impl CellIndex {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { y, x }
    }

    /// Odd cells use the other diagonal
    pub fn is_flipped(&self) -> bool {
        (self.x + self.y).rem_euclid(2) == 1
    }

    pub fn is_inside(&self, segment_count: u32) -> bool {
        let count = segment_count as i64;
        (0..count).contains(&self.x) && (0..count).contains(&self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriangleHalf {
    First,
    Second,
}

//  3---2
//  |   |   even cells are split from 0 to 2, odd cells from 1 to 3
//  0---1
const EVEN_FIRST: [usize; 3] = [0, 2, 1];
const EVEN_SECOND: [usize; 3] = [0, 3, 2];
const ODD_FIRST: [usize; 3] = [1, 0, 3];
const ODD_SECOND: [usize; 3] = [1, 3, 2];

/// One of the two fixed ground triangles of a cell
pub fn ground_triangle(cell: CellIndex, half: TriangleHalf) -> TileTriangle {
    let x = cell.x as f64;
    let y = cell.y as f64;
    let corners = [
        TilePosition::new(x, y),
        TilePosition::new(x + 1.0, y),
        TilePosition::new(x + 1.0, y + 1.0),
        TilePosition::new(x, y + 1.0),
    ];

    let indices = match (cell.is_flipped(), half) {
        (false, TriangleHalf::First) => EVEN_FIRST,
        (false, TriangleHalf::Second) => EVEN_SECOND,
        (true, TriangleHalf::First) => ODD_FIRST,
        (true, TriangleHalf::Second) => ODD_SECOND,
    };

    indices.map(|index| corners[index])
}

pub fn ground_triangles(cell: CellIndex) -> [TileTriangle; 2] {
    [
        ground_triangle(cell, TriangleHalf::First),
        ground_triangle(cell, TriangleHalf::Second),
    ]
}
