// outer SHAPE of a surface feature: its rings and the polygons they enclose

use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use log::warn;

use crate::kernel_in::{GroundPosition, GroundPositions, Ring, RingType};

pub const POLYGON_OUTER: usize = 0;
pub const FIRST_HOLE_INDEX: usize = 1;

/// Outer ring first, holes after it
pub type Polygon = Vec<GroundPositions>;
pub type Polygons = Vec<Polygon>;

type Contour = Vec<[f64; 2]>;

#[derive(Clone, Debug, Default)]
pub struct Footprint {
    outers: Vec<GroundPositions>,
    inners: Vec<GroundPositions>,
    pub center: GroundPosition,
    longest_distance: f32,
    pub longest_angle: f32,
}

impl Footprint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rings(rings: &[Ring]) -> Self {
        let mut footprint = Self::new();
        for ring in rings {
            footprint.push_ring(ring);
        }
        footprint
    }

    pub fn is_empty(&self) -> bool {
        self.outers.is_empty()
    }

    /// Takes a ring without its closing node and counter clockwise (x right, z up).
    /// Rings with less than 3 different nodes are dropped.
    pub fn push_ring(&mut self, ring: &Ring) {
        let mut positions = ring.nodes.clone();
        positions.dedup();
        while positions.len() > 1 && positions.first() == positions.last() {
            positions.pop();
        }
        if positions.len() < 3 {
            warn!("ring with < 3 corners dropped: {:?}", ring.ring_type);
            return;
        }

        if ring_area_doubled(&positions) < 0.0 {
            positions.reverse();
        }

        match ring.ring_type {
            RingType::Outer => {
                if self.outers.is_empty() {
                    self.close(&positions);
                }
                self.outers.push(positions);
            }
            RingType::Inner => self.inners.push(positions),
        }
    }

    // center and longest side of the first outer ring
    fn close(&mut self, positions: &GroundPositions) {
        let count = positions.len() as f32;
        let mut center = GroundPosition::ZERO;
        for (index, position) in positions.iter().enumerate() {
            center = center + *position;

            let next_position = positions[(index + 1) % positions.len()];
            let (distance, angle) = position.distance_angle_to_other(&next_position);
            if self.longest_distance < distance {
                self.longest_distance = distance;
                self.longest_angle = angle;
            }
        }
        self.center = center * (1.0 / count);
    }

    /// Rotates against the longest side, which then runs along the north axis
    pub fn rotate_to_longest_side(&self, position: GroundPosition) -> GroundPosition {
        (position - self.center).rotate(-self.longest_angle)
    }

    /// The area covered by the outer rings without the inner rings
    pub fn polygons(&self) -> Polygons {
        if self.outers.is_empty() {
            return Vec::new();
        }

        let subject: Vec<Contour> = self.outers.iter().map(|ring| to_contour(ring)).collect();
        let clip: Vec<Contour> = self.inners.iter().map(|ring| to_contour(ring)).collect();

        // All rings are counter clockwise now, so non zero is the union of each kind
        let remaining = subject.overlay(&clip, OverlayRule::Difference, FillRule::NonZero);
        if remaining.is_empty() {
            warn!("inner rings cover all outer rings");
        }

        remaining
            .iter()
            .map(|shape| shape.iter().map(|contour| from_contour(contour)).collect())
            .collect()
    }
}

/// Twice the signed area of a ring, positive when counter clockwise
pub fn ring_area_doubled(positions: &[GroundPosition]) -> f32 {
    let count = positions.len();
    (0..count)
        .map(|index| {
            let position = positions[index];
            let next_position = positions[(index + 1) % count];
            position.east * next_position.north - next_position.east * position.north
        })
        .sum()
}

fn to_contour(positions: &[GroundPosition]) -> Contour {
    positions
        .iter()
        .map(|position| [position.east as f64, position.north as f64])
        .collect()
}

fn from_contour(contour: &[[f64; 2]]) -> GroundPositions {
    contour
        .iter()
        .map(|point| GroundPosition::from_xz(point[0] as f32, point[1] as f32))
        .collect()
}
