//! Exact intersection of two triangles in tile-space.
//!
//! The input triangle is clipped against the three edges of the (convex)
//! ground triangle, one edge after the other (Sutherland-Hodgman). The result
//! keeps the winding of the input triangle.
//!
//! Containment is closed: points on a ground triangle edge, within
//! [`EDGE_EPSILON`], count as inside. Neighbouring ground triangles therefore
//! both see a shared boundary vertex, while a result that only touches the
//! ground triangle along an edge or in a corner has no area and is dropped.
//! No region is ever claimed by two clips.

use crate::grid::{TilePosition, TileTriangle, polygon_area_doubled, tile_area_doubled};

/// Distance tolerance in tile-space (one unit = one cell)
pub const EDGE_EPSILON: f64 = 1e-9;

/// Doubled polygon area below this is treated as "touching only"
pub const AREA_EPSILON: f64 = 1e-12;

/// Clips the convex `subject` polygon against the half plane left (or right,
/// for clockwise clip polygons) of the edge `edge_start`→`edge_end`.
fn clip_against_edge(
    subject: &[TilePosition],
    edge_start: TilePosition,
    edge_end: TilePosition,
    orientation: f64,
) -> Vec<TilePosition> {
    let edge = edge_end - edge_start;
    let length = edge.dot(edge).sqrt();
    let signed_distance =
        |point: TilePosition| orientation * edge.cross(point - edge_start) / length;

    let mut out = Vec::with_capacity(subject.len() + 1);
    let count = subject.len();

    for index in 0..count {
        let current = subject[index];
        let next = subject[(index + 1) % count];
        let d_current = signed_distance(current);
        let d_next = signed_distance(next);
        let current_inside = d_current >= -EDGE_EPSILON;
        let next_inside = d_next >= -EDGE_EPSILON;

        if current_inside {
            out.push(current);
        }
        if current_inside != next_inside {
            // Edge crosses the clip line. Interpolated from the nearer end point,
            // a far away vertex would cancel out the digits of the near one.
            let denominator = d_current - d_next;
            if denominator.abs() > f64::EPSILON {
                if d_current.abs() <= d_next.abs() {
                    out.push(current.lerp(next, d_current / denominator));
                } else {
                    out.push(next.lerp(current, -d_next / denominator));
                }
            }
        }
    }

    out
}

/// Removes consecutive (and first/last) points closer than the edge tolerance
fn remove_duplicates(polygon: &mut Vec<TilePosition>) {
    let tolerance = EDGE_EPSILON * EDGE_EPSILON;
    polygon.dedup_by(|a, b| a.distance_squared(*b) <= tolerance);
    while polygon.len() > 1 {
        let first = polygon[0];
        let last = polygon[polygon.len() - 1];
        if first.distance_squared(last) <= tolerance {
            polygon.pop();
        } else {
            break;
        }
    }
}

/// The convex intersection polygon of `ground` and `triangle`, empty if they do not overlap.
pub fn intersect_triangles(ground: &TileTriangle, triangle: &TileTriangle) -> Vec<TilePosition> {
    let ground_area = tile_area_doubled(ground);
    if ground_area.abs() <= AREA_EPSILON || tile_area_doubled(triangle).abs() <= AREA_EPSILON {
        return Vec::new();
    }
    let orientation = ground_area.signum();

    let mut polygon = triangle.to_vec();
    for index in 0..3 {
        polygon = clip_against_edge(&polygon, ground[index], ground[(index + 1) % 3], orientation);
        if polygon.len() < 3 {
            return Vec::new();
        }
    }

    remove_duplicates(&mut polygon);
    if polygon.len() < 3 || polygon_area_doubled(&polygon).abs() <= AREA_EPSILON {
        return Vec::new();
    }
    polygon
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CellIndex, TriangleHalf, ground_triangle};

    fn p(x: f64, y: f64) -> TilePosition {
        TilePosition::new(x, y)
    }

    fn area(polygon: &[TilePosition]) -> f64 {
        polygon_area_doubled(polygon).abs() / 2.0
    }

    #[test]
    fn triangle_inside_is_returned_unchanged() {
        let ground = [p(0.0, 0.0), p(0.0, 4.0), p(4.0, 0.0)];
        let triangle = [p(0.5, 0.5), p(1.5, 0.5), p(0.5, 1.5)];
        let polygon = intersect_triangles(&ground, &triangle);
        assert_eq!(polygon, triangle.to_vec());
    }

    #[test]
    fn disjoint_triangles_give_nothing() {
        let ground = ground_triangle(CellIndex::new(0, 0), TriangleHalf::First);
        let triangle = [p(5.0, 5.0), p(6.0, 5.0), p(5.0, 6.0)];
        assert!(intersect_triangles(&ground, &triangle).is_empty());
    }

    #[test]
    fn touching_along_an_edge_gives_nothing() {
        // Cell (0,0) first half lies below the diagonal, this one above it
        let ground = ground_triangle(CellIndex::new(0, 0), TriangleHalf::First);
        let triangle = [p(0.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
        assert!(intersect_triangles(&ground, &triangle).is_empty());
    }

    #[test]
    fn cell_halves_split_a_covering_triangle() {
        let cell = CellIndex::new(0, 0);
        let triangle = [p(-1.0, -1.0), p(3.0, -1.0), p(-1.0, 3.0)];
        let first = intersect_triangles(&ground_triangle(cell, TriangleHalf::First), &triangle);
        let second = intersect_triangles(&ground_triangle(cell, TriangleHalf::Second), &triangle);
        assert!((area(&first) - 0.5).abs() < 1e-9);
        assert!((area(&second) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn partial_overlap_is_convex_with_source_winding() {
        let ground = ground_triangle(CellIndex::new(1, 0), TriangleHalf::First);
        let counter_clockwise = [p(0.5, 0.25), p(2.5, 0.25), p(1.5, 0.9)];
        let clockwise = [counter_clockwise[0], counter_clockwise[2], counter_clockwise[1]];

        let polygon = intersect_triangles(&ground, &counter_clockwise);
        assert!(polygon.len() >= 3);
        assert!(polygon_area_doubled(&polygon) > 0.0);

        let polygon_reversed = intersect_triangles(&ground, &clockwise);
        assert!(polygon_area_doubled(&polygon_reversed) < 0.0);
        assert!((area(&polygon) - area(&polygon_reversed)).abs() < 1e-12);
    }

    #[test]
    fn far_away_vertex_keeps_the_near_crossings_exact() {
        // lower half of cell (0,0), below the diagonal (0,0)-(1,1)
        let ground = ground_triangle(CellIndex::new(0, 0), TriangleHalf::First);
        let triangle = [p(-1e30, 0.5), p(1.0, 0.5), p(0.5, 1.0)];
        let polygon = intersect_triangles(&ground, &triangle);

        // (0.5,0.5) (1,0.5) (0.75,0.75)
        assert_eq!(polygon.len(), 3);
        assert!(polygon.iter().all(|point| point.x >= point.y - 1e-9));
        assert!((area(&polygon) - 0.0625).abs() < 1e-12);
    }

    #[test]
    fn degenerate_input_gives_nothing() {
        let ground = ground_triangle(CellIndex::new(0, 0), TriangleHalf::Second);
        let line = [p(0.0, 0.0), p(0.5, 0.5), p(1.0, 1.0)];
        assert!(intersect_triangles(&ground, &line).is_empty());
    }
}
