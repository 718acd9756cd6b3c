// Walls: vertical quads rising from a polyline on the ground

use crate::kernel_in::GroundPosition;
use crate::kernel_out::RenderPosition;

pub struct WallsParams<'a> {
    pub vertices: &'a [GroundPosition],
    pub height: f32,
    pub min_height: f32,
    pub levels: f32,
    pub window_width: f32,
}

/// Flat, non indexed triangle list with one normal per triangle corner
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WallsGeometry {
    pub position: Vec<f32>,
    pub uv: Vec<f32>,
    pub normal: Vec<f32>,
}

impl WallsGeometry {
    pub fn vertex_count(&self) -> usize {
        self.position.len() / 3
    }
}

pub struct WallsBuilder {
    geometry: WallsGeometry,
}

impl WallsBuilder {
    pub fn new() -> Self {
        Self {
            geometry: WallsGeometry::default(),
        }
    }

    pub fn build(mut self, params: &WallsParams) -> WallsGeometry {
        if params.vertices.len() < 2 || !(params.height > params.min_height) {
            return self.geometry;
        }
        let window_width = if params.window_width > 0.0 {
            params.window_width
        } else {
            1.0
        };

        let mut distance = 0.0;
        for edge in params.vertices.windows(2) {
            let (last, this) = (edge[0], edge[1]);
            let length = (this - last).length();
            if length <= f32::EPSILON {
                continue;
            }

            let u_left = distance / window_width;
            distance += length;
            let u_right = distance / window_width;

            self.push_square(
                [
                    to_render_position(last, params.min_height),
                    to_render_position(this, params.min_height),
                    to_render_position(last, params.height),
                    to_render_position(this, params.height),
                ],
                [
                    [u_left, 0.0],
                    [u_right, 0.0],
                    [u_left, params.levels],
                    [u_right, params.levels],
                ],
            );
        }

        self.geometry
    }

    //     2---3
    //     |   |
    //     0---1
    fn push_square(&mut self, corners: [RenderPosition; 4], uvs: [[f32; 2]; 4]) {
        self.push_triangle([0, 1, 2], &corners, &uvs);
        self.push_triangle([1, 3, 2], &corners, &uvs);
    }

    fn push_triangle(
        &mut self,
        indices: [usize; 3],
        corners: &[RenderPosition; 4],
        uvs: &[[f32; 2]; 4],
    ) {
        let normal = triangle_normal(corners[indices[0]], corners[indices[1]], corners[indices[2]]);
        for index in indices {
            self.geometry.position.extend_from_slice(&corners[index]);
            self.geometry.uv.extend_from_slice(&uvs[index]);
            self.geometry.normal.extend_from_slice(&normal);
        }
    }
}

impl Default for WallsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn to_render_position(position: GroundPosition, height: f32) -> RenderPosition {
    [position.east, height, position.north]
}

fn triangle_normal(a: RenderPosition, b: RenderPosition, c: RenderPosition) -> RenderPosition {
    let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let normal = [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ];
    let length = (normal[0] * normal[0] + normal[1] * normal[1] + normal[2] * normal[2]).sqrt();
    if length > 0.0 {
        normal.map(|component| component / length)
    } else {
        [0.0, 0.0, 0.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, z: f32) -> GroundPosition {
        GroundPosition::from_xz(x, z)
    }

    fn wall(vertices: &[GroundPosition], height: f32) -> WallsGeometry {
        WallsBuilder::new().build(&WallsParams {
            vertices,
            height,
            min_height: 0.0,
            levels: 1.0,
            window_width: height * 2.0,
        })
    }

    #[test]
    fn one_edge_gives_one_quad() {
        let geometry = wall(&[p(0.0, 0.0), p(4.0, 0.0)], 1.0);
        assert_eq!(geometry.vertex_count(), 6);
        assert_eq!(geometry.uv.len(), 12);
        assert_eq!(geometry.normal.len(), 18);

        for normal in geometry.normal.chunks_exact(3) {
            assert!(normal[0].abs() < 1e-6);
            assert!(normal[1].abs() < 1e-6);
            assert!((normal[2].abs() - 1.0).abs() < 1e-6);
        }
        let heights: Vec<f32> = geometry.position.chunks_exact(3).map(|v| v[1]).collect();
        assert!(heights.iter().all(|height| *height == 0.0 || *height == 1.0));
    }

    #[test]
    fn u_runs_along_the_wall_in_window_widths() {
        let geometry = wall(&[p(0.0, 0.0), p(2.0, 0.0), p(2.0, 6.0)], 2.0);
        assert_eq!(geometry.vertex_count(), 12);
        let max_u = geometry.uv.chunks_exact(2).map(|uv| uv[0]).fold(0.0, f32::max);
        let max_v = geometry.uv.chunks_exact(2).map(|uv| uv[1]).fold(0.0, f32::max);
        assert!((max_u - 2.0).abs() < 1e-6);
        assert_eq!(max_v, 1.0);
    }

    #[test]
    fn zero_length_edges_and_flat_walls_are_skipped() {
        assert_eq!(wall(&[p(1.0, 1.0), p(1.0, 1.0)], 1.0).vertex_count(), 0);
        assert_eq!(wall(&[p(0.0, 0.0), p(1.0, 0.0)], 0.0).vertex_count(), 0);
        assert_eq!(wall(&[p(0.0, 0.0)], 1.0).vertex_count(), 0);
    }
}
