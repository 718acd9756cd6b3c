// Internal Interface of the crate/lib between feature input and the ground projection

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A position on the ground in meters, relative to the tile origin.
/// The renderer maps `east` to X and `north` to Z; Y is the height.
// See for standard 2D features like Add: https://docs.rs/vector2/latest/vector2/struct.Vector2.html
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundPosition {
    pub north: f32,
    pub east: f32,
}

impl Add for GroundPosition {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            north: self.north + other.north,
            east: self.east + other.east,
        }
    }
}

impl Sub for GroundPosition {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            north: self.north - other.north,
            east: self.east - other.east,
        }
    }
}

impl Mul<f32> for GroundPosition {
    type Output = Self;

    fn mul(self, factor: f32) -> Self {
        Self {
            north: self.north * factor,
            east: self.east * factor,
        }
    }
}

impl GroundPosition {
    /// Shorthand for writing `GroundPosition { north: 0.0, east: 0.0 }`.
    pub const ZERO: Self = Self {
        north: 0.0,
        east: 0.0,
    };

    /// Renderer order: x is east, z is north.
    pub fn from_xz(x: f32, z: f32) -> Self {
        Self { north: z, east: x }
    }

    pub fn length(&self) -> f32 {
        f32::sqrt(self.north * self.north + self.east * self.east)
    }

    pub fn distance_angle_to_other(&self, other: &GroundPosition) -> (f32, f32) {
        let a = self.north - other.north;
        let b = self.east - other.east;
        let distance = f32::sqrt(a * a + b * b);

        // Its atan2(y,x)   NOT:x,y!
        // East = (0,1) = 0    Nord(1,0) = 1.5(Pi/2)   West(0,-1) = 3,14(Pi)   South(-1,0) = -1.5(-Pi)
        let angle: f32 = f32::atan2(other.east - self.east, other.north - self.north);

        (distance, angle)
    }

    pub fn rotate(self, angle: f32) -> GroundPosition {
        let cos = f32::cos(angle);
        let sin = f32::sin(angle);
        // Don't change this lines! They are correct and tested. If something is odd, look on your code, calling rotate()
        let north = -sin * self.east + cos * self.north;
        let east = cos * self.east + sin * self.north;

        GroundPosition { north, east }
    }

    /// Perpendicular to the left of the direction (counter clockwise in x/z).
    pub fn perpendicular(self) -> GroundPosition {
        GroundPosition {
            north: self.east,
            east: -self.north,
        }
    }

    pub fn normalize_or_zero(self) -> GroundPosition {
        let length = self.length();
        if length > f32::EPSILON {
            self * (1.0 / length)
        } else {
            GroundPosition::ZERO
        }
    }
}

impl std::fmt::Display for GroundPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.east, self.north)
    }
}

pub type GroundPositions = Vec<GroundPosition>;

/// Twice the signed area in the x/z plane. Positive = counter clockwise (x right, z up).
pub fn signed_area_doubled(a: GroundPosition, b: GroundPosition, c: GroundPosition) -> f32 {
    (b.east - a.east) * (c.north - a.north) - (c.east - a.east) * (b.north - a.north)
}

/// A triangle to be draped onto the ground, with one uv per corner
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceTriangle {
    pub positions: [GroundPosition; 3],
    pub uv: [[f32; 2]; 3],
}

impl SourceTriangle {
    /// Turns the triangle to face up (+Y), that is clockwise in x/z.
    pub fn face_up(mut self) -> Self {
        let [a, b, c] = self.positions;
        if signed_area_doubled(a, b, c) > 0.0 {
            self.positions.swap(1, 2);
            self.uv.swap(1, 2);
        }
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RingType {
    Outer,
    Inner,
}

/// One boundary ring of a feature. The nodes are kept as given, closed ways repeat the first node.
#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    pub ring_type: RingType,
    pub nodes: GroundPositions,
}

impl Ring {
    pub fn new(ring_type: RingType, nodes: GroundPositions) -> Self {
        Self { ring_type, nodes }
    }

    pub fn is_closed(&self) -> bool {
        self.nodes.len() > 1 && self.nodes.first() == self.nodes.last()
    }
}
