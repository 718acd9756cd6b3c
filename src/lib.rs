//// Drapes map features onto the triangulated ground grid of a terrain tile
//// Input are rings in meters, output are flat vertex buffers for a renderer

// Interface from the feature input to the projection
mod kernel_in;
mod tagticks;

// The ground grid and the projection onto it
mod clip;
mod error;
mod grid;
mod interpolate;
mod projector;
mod raster;
mod triangulate;

// Source geometry of a feature
mod footprint;
mod road;
mod surface;
mod walls;

mod config;
mod feature;
mod geometry_builder;

// Interface from the builder to a renderer
mod kernel_out;

pub use clip::{AREA_EPSILON, EDGE_EPSILON, intersect_triangles};
pub use config::*;
pub use error::ProjectionError;
pub use feature::*;
pub use footprint::{Footprint, Polygon, Polygons};
pub use geometry_builder::*;
pub use grid::*;
pub use interpolate::*;
pub use kernel_in::*;
pub use kernel_out::*;
pub use projector::*;
pub use raster::{cells_on_line_in_grid, cells_under_triangle};
pub use road::RoadBuilder;
pub use surface::SurfaceBuilder;
pub use tagticks::*;
pub use triangulate::*;
pub use walls::*;
