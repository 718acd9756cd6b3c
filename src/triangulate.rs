// Triangulation of convex clip polygons and of rings with holes

extern crate earcutr;

use crate::error::ProjectionError;
use crate::kernel_in::{GroundPosition, GroundPositions};

/// Fans a convex polygon from vertex 0. The triples keep the polygon's winding.
/// Less than 3 vertices give no triangles, that is not an error.
pub fn triangulate_convex(vertex_count: usize) -> Vec<[usize; 3]> {
    if vertex_count < 3 {
        return Vec::new();
    }
    (2..vertex_count).map(|index| [0, index - 1, index]).collect()
}

/// Triangulates an outer ring with holes. The returned indices point into the
/// returned positions: outer first, then the holes in the given order.
pub fn triangulate_rings(
    outer: &[GroundPosition],
    holes: &[GroundPositions],
) -> Result<(Vec<usize>, GroundPositions), ProjectionError> {
    let mut vertices = Vec::<f64>::new();
    let mut holes_starts = Vec::<usize>::new();
    let mut positions = GroundPositions::new();

    for position in outer {
        vertices.push(position.east as f64);
        vertices.push(position.north as f64);
        positions.push(*position);
    }

    for hole in holes {
        holes_starts.push(vertices.len() / 2);
        for position in hole {
            vertices.push(position.east as f64);
            vertices.push(position.north as f64);
            positions.push(*position);
        }
    }

    let indices = earcutr::earcut(&vertices, &holes_starts, 2)
        .map_err(|error| ProjectionError::Triangulation(format!("{error:?}")))?;

    Ok((indices, positions))
}
