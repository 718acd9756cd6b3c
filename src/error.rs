//! Errors reported at the boundary of the projection engine.
//!
//! An empty intersection is never an error. These variants only cover
//! structural input a caller should not have passed in the first place.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("tile size must be positive and finite, got {0}")]
    InvalidTileSize(f32),

    #[error("segment count must be at least 1, got {0}")]
    InvalidSegmentCount(u32),

    #[error("a triangle needs 3 vertices, got {0}")]
    TriangleVertexCount(usize),

    #[error("attribute `{name}` needs {expected} values, got {actual}")]
    AttributeLength {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("attribute `{name}` has width 0")]
    AttributeWidth { name: String },

    #[error("the feature has no ring to build from")]
    MissingRing,

    #[error("triangulation failed: {0}")]
    Triangulation(String),

    #[error("invalid config or feature file: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
