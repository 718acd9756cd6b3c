//! Drapes triangles and line segments onto the triangulated ground grid.
//!
//! A tile of `tile_size` meters is split into `segment_count` × `segment_count`
//! cells, each cell into two triangles (see [`crate::grid`]). A projected
//! triangle comes back cut at every ground triangle edge, so each output
//! triangle lies on exactly one ground triangle. A projected line segment
//! comes back as the points where it crosses ground triangle edges.
//!
//! The projector holds only its two configuration values. Every call
//! allocates its own buffers, so one projector can be shared by any number
//! of threads.

use log::debug;

use crate::clip::{AREA_EPSILON, EDGE_EPSILON, intersect_triangles};
use crate::error::ProjectionError;
use crate::grid::{TilePosition, TileTriangle, ground_triangles, tile_area_doubled};
use crate::interpolate::{AttributeChannel, TriangleAttribute, barycentric, interpolate_into};
use crate::kernel_in::GroundPosition;
use crate::raster::{cells_on_line_in_grid, cells_under_triangle};
use crate::triangulate::triangulate_convex;

/// Progress values closer than this count as the same point
const PROGRESS_EPSILON: f64 = 1e-9;

/// One interpolated channel of a projection, `width` values per vertex
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeBuffer {
    pub channel: AttributeChannel,
    pub values: Vec<f32>,
}

/// Flat, non indexed triangle list: 3 position values per vertex
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectedTriangle {
    pub position: Vec<f32>,
    pub attributes: Vec<AttributeBuffer>,
}

impl ProjectedTriangle {
    pub fn vertex_count(&self) -> usize {
        self.position.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    pub fn attribute(&self, name: &str) -> Option<&[f32]> {
        self.attributes
            .iter()
            .find(|buffer| buffer.channel.name == name)
            .map(|buffer| buffer.values.as_slice())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundProjector {
    tile_size: f32,
    segment_count: u32,
}

impl GroundProjector {
    pub fn new(tile_size: f32, segment_count: u32) -> Result<Self, ProjectionError> {
        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err(ProjectionError::InvalidTileSize(tile_size));
        }
        if segment_count == 0 {
            return Err(ProjectionError::InvalidSegmentCount(segment_count));
        }
        Ok(Self {
            tile_size,
            segment_count,
        })
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn segment_count(&self) -> u32 {
        self.segment_count
    }

    /// Meters per grid cell
    pub fn cell_size(&self) -> f64 {
        self.tile_size as f64 / self.segment_count as f64
    }

    fn to_tile_space(&self, position: GroundPosition) -> TilePosition {
        let cell_size = self.cell_size();
        TilePosition::new(
            position.east as f64 / cell_size,
            position.north as f64 / cell_size,
        )
    }

    /// Cuts the triangle at the ground triangle edges. Positions get the fixed
    /// `height`, every attribute is interpolated from the original triangle.
    ///
    /// A degenerate triangle or one outside the grid gives empty buffers.
    pub fn project_triangle(
        &self,
        triangle: &[GroundPosition],
        attributes: &[TriangleAttribute],
        height: f32,
    ) -> Result<ProjectedTriangle, ProjectionError> {
        if triangle.len() != 3 {
            return Err(ProjectionError::TriangleVertexCount(triangle.len()));
        }
        for attribute in attributes {
            attribute.validate()?;
        }

        let mut projected = ProjectedTriangle {
            position: Vec::new(),
            attributes: attributes
                .iter()
                .map(|attribute| AttributeBuffer {
                    channel: attribute.channel.clone(),
                    values: Vec::new(),
                })
                .collect(),
        };

        let source: TileTriangle = [
            self.to_tile_space(triangle[0]),
            self.to_tile_space(triangle[1]),
            self.to_tile_space(triangle[2]),
        ];
        if !(tile_area_doubled(&source).abs() > AREA_EPSILON) {
            return Ok(projected);
        }

        let cell_size = self.cell_size();
        let cells = cells_under_triangle(&source, self.segment_count);

        for cell in &cells {
            for ground in ground_triangles(*cell) {
                let polygon = intersect_triangles(&ground, &source);
                if polygon.is_empty() {
                    continue;
                }

                // Always against the original triangle, so attributes are seamless across cells
                let weights: Option<Vec<[f64; 3]>> = polygon
                    .iter()
                    .map(|point| barycentric(*point, &source))
                    .collect();
                let Some(weights) = weights else {
                    continue;
                };

                for indices in triangulate_convex(polygon.len()) {
                    for index in indices {
                        let point = polygon[index];
                        projected.position.extend([
                            (point.x * cell_size) as f32,
                            height,
                            (point.y * cell_size) as f32,
                        ]);
                        for (attribute, buffer) in
                            attributes.iter().zip(projected.attributes.iter_mut())
                        {
                            interpolate_into(weights[index], attribute, &mut buffer.values);
                        }
                    }
                }
            }
        }

        debug!(
            "project_triangle: {} candidate cells, {} vertices",
            cells.len(),
            projected.vertex_count()
        );
        Ok(projected)
    }

    /// Splits the segment wherever it crosses a ground triangle edge.
    ///
    /// The result starts with `start`, ends with `end` and lies on the
    /// segment, ordered by progress along it.
    pub fn project_line_segment(
        &self,
        start: GroundPosition,
        end: GroundPosition,
    ) -> Vec<GroundPosition> {
        let line_start = self.to_tile_space(start);
        let line_end = self.to_tile_space(end);
        let direction = line_end - line_start;
        if !(direction.dot(direction) > EDGE_EPSILON * EDGE_EPSILON) {
            return vec![start, end];
        }

        let mut progress = Vec::new();
        let cells = cells_on_line_in_grid(line_start, line_end, self.segment_count);
        for cell in &cells {
            for ground in ground_triangles(*cell) {
                for index in 0..3 {
                    segment_intersections(
                        line_start,
                        line_end,
                        ground[index],
                        ground[(index + 1) % 3],
                        &mut progress,
                    );
                }
            }
        }

        progress.retain(|t| *t > PROGRESS_EPSILON && *t < 1.0 - PROGRESS_EPSILON);
        progress.sort_by(f64::total_cmp);
        progress.dedup_by(|a, b| (*a - *b).abs() <= PROGRESS_EPSILON);

        let mut points = Vec::with_capacity(progress.len() + 2);
        points.push(start);
        points.extend(progress.iter().map(|t| lerp_ground(start, end, *t)));
        points.push(end);

        debug!(
            "project_line_segment: {} candidate cells, {} points",
            cells.len(),
            points.len()
        );
        points
    }
}

fn lerp_ground(start: GroundPosition, end: GroundPosition, t: f64) -> GroundPosition {
    let mix = |a: f32, b: f32| (a as f64 * (1.0 - t) + b as f64 * t) as f32;
    GroundPosition {
        north: mix(start.north, end.north),
        east: mix(start.east, end.east),
    }
}

/// Adds the progress along `line_start`→`line_end` of every point it shares with
/// the edge `edge_start`→`edge_end`. Collinear overlaps add the edge's end points.
fn segment_intersections(
    line_start: TilePosition,
    line_end: TilePosition,
    edge_start: TilePosition,
    edge_end: TilePosition,
    progress: &mut Vec<f64>,
) {
    let r = line_end - line_start;
    let s = edge_end - edge_start;
    let offset = edge_start - line_start;
    let denominator = r.cross(s);
    let r_length_squared = r.dot(r);

    if denominator.abs() <= EDGE_EPSILON * r_length_squared.sqrt() * s.dot(s).sqrt() {
        // parallel, only collinear edges touch
        if offset.cross(r).abs() > EDGE_EPSILON * r_length_squared.sqrt() {
            return;
        }
        for point in [edge_start, edge_end] {
            let t = (point - line_start).dot(r) / r_length_squared;
            if (0.0..=1.0).contains(&t) {
                progress.push(t);
            }
        }
        return;
    }

    let t = offset.cross(s) / denominator;
    let u = offset.cross(r) / denominator;
    let inside = |value: f64| value >= -PROGRESS_EPSILON && value <= 1.0 + PROGRESS_EPSILON;
    if inside(t) && inside(u) {
        progress.push(t.clamp(0.0, 1.0));
    }
}
