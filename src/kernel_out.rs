// Internal Interface of the crate/lib between the geometry builder and a renderer

use serde::Serialize;

// The usual format a GPU wants its vertex position in: x = east, y = height, z = north
pub type RenderPosition = [f32; 3];

pub const NORMAL_UP: RenderPosition = [0.0, 1.0, 0.0];

/// Axis aligned bounds of rendered vertices
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoundingBox3 {
    pub min: RenderPosition,
    pub max: RenderPosition,
}

impl Default for BoundingBox3 {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundingBox3 {
    pub fn new() -> Self {
        Self {
            min: [f32::MAX; 3],
            max: [f32::MIN; 3],
        }
    }

    pub fn include(&mut self, position: RenderPosition) {
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(position[axis]);
            self.max[axis] = self.max[axis].max(position[axis]);
        }
    }

    /// Includes every vertex of a flat buffer with 3 components per vertex
    pub fn include_flat(&mut self, positions: &[f32]) {
        for position in positions.chunks_exact(3) {
            self.include([position[0], position[1], position[2]]);
        }
    }

    pub fn is_empty(&self) -> bool {
        (0..3).any(|axis| self.min[axis] > self.max[axis])
    }
}

/// The drawable buffers of one feature. The builder hands them over by value.
#[derive(Clone, Debug, Serialize)]
pub struct ProjectedGeometry {
    pub feature_id: u64,
    pub z_index: i32,
    pub bounding_box: BoundingBox3,
    pub position_buffer: Vec<f32>, // 3 per vertex, world meters
    pub normal_buffer: Vec<f32>,   // 3 per vertex
    pub uv_buffer: Vec<f32>,       // 2 per vertex
    pub texture_id_buffer: Vec<u8>,
}

impl ProjectedGeometry {
    pub fn vertex_count(&self) -> usize {
        self.position_buffer.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.position_buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_from_flat_buffer() {
        let mut bounding_box = BoundingBox3::new();
        assert!(bounding_box.is_empty());
        bounding_box.include_flat(&[0.0, 1.0, 2.0, -3.0, 4.0, 0.5]);
        assert_eq!(bounding_box.min, [-3.0, 1.0, 0.5]);
        assert_eq!(bounding_box.max, [0.0, 4.0, 2.0]);
        assert!(!bounding_box.is_empty());
    }
}
