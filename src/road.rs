// Road ribbons: a strip of given width along a polyline

use log::warn;

use crate::kernel_in::{GroundPosition, SourceTriangle};

/// Miters are limited to this multiple of the half width at sharp turns
const MITER_LIMIT: f32 = 4.0;

pub struct RoadBuilder<'a> {
    vertices: &'a [GroundPosition],
    width: f32,
}

impl<'a> RoadBuilder<'a> {
    pub fn new(vertices: &'a [GroundPosition], width: f32) -> Self {
        Self { vertices, width }
    }

    /// Two up facing triangles per polyline segment. The uv `u` is 0 on the
    /// left and 1 on the right side, `v` is the travelled distance in widths.
    pub fn build(&self) -> Vec<SourceTriangle> {
        if !(self.width.is_finite() && self.width > 0.0) {
            warn!("road with width {} skipped", self.width);
            return Vec::new();
        }

        let mut vertices = self.vertices.to_vec();
        vertices.dedup();
        if vertices.len() < 2 {
            return Vec::new();
        }

        let half_width = self.width / 2.0;
        let mut triangles = Vec::with_capacity((vertices.len() - 1) * 2);
        let mut distance = 0.0;
        let mut last_left = vertices[0] + offset(&vertices, 0) * half_width;
        let mut last_right = vertices[0] - offset(&vertices, 0) * half_width;
        let mut last_v = 0.0;

        for index in 1..vertices.len() {
            distance += (vertices[index] - vertices[index - 1]).length();
            let left = vertices[index] + offset(&vertices, index) * half_width;
            let right = vertices[index] - offset(&vertices, index) * half_width;
            let v = distance / self.width;

            // last_left-----left
            //     |    \      |
            // last_right----right
            triangles.push(
                SourceTriangle {
                    positions: [last_left, last_right, left],
                    uv: [[0.0, last_v], [1.0, last_v], [0.0, v]],
                }
                .face_up(),
            );
            triangles.push(
                SourceTriangle {
                    positions: [last_right, right, left],
                    uv: [[1.0, last_v], [1.0, v], [0.0, v]],
                }
                .face_up(),
            );

            last_left = left;
            last_right = right;
            last_v = v;
        }

        triangles
    }
}

fn direction(from: GroundPosition, to: GroundPosition) -> GroundPosition {
    (to - from).normalize_or_zero()
}

/// The left side offset at a vertex for a half width of 1, mitered at inner vertices
fn offset(vertices: &[GroundPosition], index: usize) -> GroundPosition {
    let incoming = if index > 0 {
        direction(vertices[index - 1], vertices[index])
    } else {
        GroundPosition::ZERO
    };
    let outgoing = if index + 1 < vertices.len() {
        direction(vertices[index], vertices[index + 1])
    } else {
        GroundPosition::ZERO
    };

    let side = (incoming + outgoing).normalize_or_zero().perpendicular();
    if side == GroundPosition::ZERO {
        // turning back on itself
        return incoming.perpendicular();
    }

    let segment_side = if incoming == GroundPosition::ZERO {
        outgoing.perpendicular()
    } else {
        incoming.perpendicular()
    };
    let cos = side.north * segment_side.north + side.east * segment_side.east;
    let scale = (1.0 / cos.max(f32::EPSILON)).min(MITER_LIMIT);
    side * scale
}
