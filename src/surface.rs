// Filled surfaces: the polygons of a footprint as up facing triangles with uv

use log::{debug, warn};

use crate::error::ProjectionError;
use crate::footprint::{FIRST_HOLE_INDEX, Footprint, POLYGON_OUTER};
use crate::kernel_in::{GroundPosition, SourceTriangle};
use crate::triangulate::triangulate_rings;

pub struct SurfaceBuilder<'a> {
    footprint: &'a Footprint,
    uv_scale: f32,
    is_oriented: bool,
}

impl<'a> SurfaceBuilder<'a> {
    /// `uv_scale` is meters per texture repeat. With `is_oriented` the texture
    /// follows the longest side of the first outer ring.
    pub fn new(footprint: &'a Footprint, uv_scale: f32, is_oriented: bool) -> Self {
        let uv_scale = if uv_scale.is_finite() && uv_scale > 0.0 {
            uv_scale
        } else {
            warn!("uv scale {uv_scale} replaced by 1");
            1.0
        };
        Self {
            footprint,
            uv_scale,
            is_oriented,
        }
    }

    fn uv(&self, position: GroundPosition) -> [f32; 2] {
        let position = if self.is_oriented {
            self.footprint.rotate_to_longest_side(position)
        } else {
            position
        };
        [position.east / self.uv_scale, position.north / self.uv_scale]
    }

    pub fn build(&self) -> Result<Vec<SourceTriangle>, ProjectionError> {
        let mut triangles = Vec::new();

        for polygon in self.footprint.polygons() {
            if polygon.is_empty() {
                continue;
            }
            let (indices, positions) = triangulate_rings(
                &polygon[POLYGON_OUTER],
                &polygon[FIRST_HOLE_INDEX..],
            )?;

            for corners in indices.chunks_exact(3) {
                let positions = [
                    positions[corners[0]],
                    positions[corners[1]],
                    positions[corners[2]],
                ];
                let triangle = SourceTriangle {
                    positions,
                    uv: positions.map(|position| self.uv(position)),
                };
                triangles.push(triangle.face_up());
            }
        }

        debug!("surface triangles: {}", triangles.len());
        Ok(triangles)
    }
}
