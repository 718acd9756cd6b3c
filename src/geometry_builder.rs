//! Assembles the drawable buffers of one feature.
//!
//! The builder collects the feature's rings, then each `add_*` call turns
//! them into source geometry (surface, road ribbon or fence wall), drapes it
//! onto the ground grid and appends the result. After every call the
//! position, normal, uv and texture id buffers describe the same number of
//! vertices. One builder belongs to one feature build; `get_geometry` hands
//! the buffers over.

use log::debug;

use crate::error::ProjectionError;
use crate::footprint::Footprint;
use crate::interpolate::{AttributeChannel, TriangleAttribute};
use crate::kernel_in::{GroundPosition, GroundPositions, Ring, RingType, SourceTriangle};
use crate::kernel_out::{BoundingBox3, NORMAL_UP, ProjectedGeometry};
use crate::projector::GroundProjector;
use crate::road::RoadBuilder;
use crate::surface::SurfaceBuilder;
use crate::walls::{WallsBuilder, WallsParams};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolygonParams {
    pub texture_id: u8,
    pub height: f32,
    pub uv_scale: f32,
    pub is_oriented: bool,
}

impl Default for PolygonParams {
    fn default() -> Self {
        Self {
            texture_id: 0,
            height: 0.0,
            uv_scale: 1.0,
            is_oriented: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PathParams {
    pub width: f32,
    pub texture_id: u8,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FenceParams {
    pub texture_id: u8,
    pub height: f32,
    pub min_height: f32,
}

pub struct ProjectedGeometryBuilder {
    feature_id: u64,
    projector: GroundProjector,
    rings: Vec<Ring>,
    z_index: i32,
    position: Vec<f32>,
    uv: Vec<f32>,
    normal: Vec<f32>,
    texture_id: Vec<u8>,
    bounding_box: BoundingBox3,
}

impl ProjectedGeometryBuilder {
    pub fn new(feature_id: u64, projector: GroundProjector) -> Self {
        Self {
            feature_id,
            projector,
            rings: Vec::new(),
            z_index: 0,
            position: Vec::new(),
            uv: Vec::new(),
            normal: Vec::new(),
            texture_id: Vec::new(),
            bounding_box: BoundingBox3::new(),
        }
    }

    pub fn add_ring(&mut self, ring_type: RingType, nodes: GroundPositions) {
        self.rings.push(Ring::new(ring_type, nodes));
    }

    pub fn set_z_index(&mut self, value: i32) {
        self.z_index = value;
    }

    pub fn vertex_count(&self) -> usize {
        self.position.len() / 3
    }

    /// Fills the area of the outer rings minus the inner rings
    pub fn add_polygon(&mut self, params: PolygonParams) -> Result<(), ProjectionError> {
        let footprint = Footprint::from_rings(&self.rings);
        let triangles =
            SurfaceBuilder::new(&footprint, params.uv_scale, params.is_oriented).build()?;
        self.project_and_add(&triangles, params.texture_id, params.height)
    }

    /// A ribbon along the nodes of the first ring
    pub fn add_path(&mut self, params: PathParams) -> Result<(), ProjectionError> {
        let ring = self.rings.first().ok_or(ProjectionError::MissingRing)?;
        let triangles = RoadBuilder::new(&ring.nodes, params.width).build();
        self.project_and_add(&triangles, params.texture_id, params.height)
    }

    /// A wall along the first ring, broken at every ground triangle edge.
    /// The wall itself is not draped, it stands on the projected line.
    pub fn add_fence(&mut self, params: FenceParams) -> Result<(), ProjectionError> {
        let ring = self.rings.first().ok_or(ProjectionError::MissingRing)?;

        let mut vertices: Vec<GroundPosition> = Vec::new();
        for edge in ring.nodes.windows(2) {
            for position in self.projector.project_line_segment(edge[0], edge[1]) {
                if vertices.last() != Some(&position) {
                    vertices.push(position);
                }
            }
        }

        let wall = WallsBuilder::new().build(&WallsParams {
            vertices: &vertices,
            height: params.height,
            min_height: params.min_height,
            levels: 1.0,
            window_width: params.height * 2.0,
        });

        let vertex_count = wall.vertex_count();
        debug!(
            "feature {}: fence of {} vertices from {} line points",
            self.feature_id,
            vertex_count,
            vertices.len()
        );

        self.bounding_box.include_flat(&wall.position);
        self.position.extend(wall.position);
        self.uv.extend(wall.uv);
        self.normal.extend(wall.normal);
        self.texture_id
            .extend(std::iter::repeat_n(params.texture_id, vertex_count));
        Ok(())
    }

    fn project_and_add(
        &mut self,
        triangles: &[SourceTriangle],
        texture_id: u8,
        height: f32,
    ) -> Result<(), ProjectionError> {
        let channel = AttributeChannel::uv();
        let vertex_count_before = self.vertex_count();

        for triangle in triangles {
            let projected = self.projector.project_triangle(
                &triangle.positions,
                &[TriangleAttribute::uv(triangle.uv)],
                height,
            )?;
            if projected.is_empty() {
                continue;
            }

            let vertex_count = projected.vertex_count();
            self.bounding_box.include_flat(&projected.position);
            self.position.extend(projected.position);
            for buffer in projected.attributes {
                if buffer.channel == channel {
                    self.uv.extend(buffer.values);
                }
            }
            for _ in 0..vertex_count {
                self.normal.extend_from_slice(&NORMAL_UP);
                self.texture_id.push(texture_id);
            }
        }

        debug!(
            "feature {}: {} source triangles projected to {} vertices",
            self.feature_id,
            triangles.len(),
            self.vertex_count() - vertex_count_before
        );
        Ok(())
    }

    pub fn get_geometry(self) -> ProjectedGeometry {
        ProjectedGeometry {
            feature_id: self.feature_id,
            z_index: self.z_index,
            bounding_box: self.bounding_box,
            position_buffer: self.position,
            normal_buffer: self.normal,
            uv_buffer: self.uv,
            texture_id_buffer: self.texture_id,
        }
    }
}
