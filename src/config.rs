// Terrain settings the projector grid is derived from

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ProjectionError;
use crate::projector::GroundProjector;

/// Edge of a web mercator tile at zoom 16 in meters
pub const TILE_SIZE: f32 = 611.4962;
pub const TERRAIN_RING_SIZE: f32 = TILE_SIZE * 4.0;
pub const TERRAIN_RING_SEGMENT_COUNT: u32 = 64;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainConfig {
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,
    #[serde(default = "default_terrain_ring_size")]
    pub terrain_ring_size: f32,
    #[serde(default = "default_terrain_ring_segment_count")]
    pub terrain_ring_segment_count: u32,
}

fn default_tile_size() -> f32 {
    TILE_SIZE
}

fn default_terrain_ring_size() -> f32 {
    TERRAIN_RING_SIZE
}

fn default_terrain_ring_segment_count() -> u32 {
    TERRAIN_RING_SEGMENT_COUNT
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            terrain_ring_size: TERRAIN_RING_SIZE,
            terrain_ring_segment_count: TERRAIN_RING_SEGMENT_COUNT,
        }
    }
}

impl TerrainConfig {
    pub fn from_json(text: &str) -> Result<Self, ProjectionError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProjectionError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Twice as many cells per tile as the terrain ring mesh has segments per tile
    pub fn projector_segment_count(&self) -> u32 {
        let per_tile =
            self.tile_size / self.terrain_ring_size * self.terrain_ring_segment_count as f32;
        if per_tile.is_finite() && per_tile > 0.0 {
            per_tile.round() as u32 * 2
        } else {
            0
        }
    }

    pub fn projector(&self) -> Result<GroundProjector, ProjectionError> {
        GroundProjector::new(self.tile_size, self.projector_segment_count())
    }
}
