//! Grid cells under lines and triangles.
//!
//! A line touches a cell when the closed square of the cell and the segment
//! have a point in common (supercover). Cells only grazed at a corner or along
//! a grid line are reported as well. The traversal walks row by row and takes
//! the column span of the segment inside each closed row strip, so near
//! vertical and near horizontal segments need no special stepping and the
//! direction of the segment does not matter.

use crate::grid::{CellIndex, TilePosition, TileTriangle};
use std::ops::RangeInclusive;

/// Sorts the end points, so a segment and its reverse compute bit identical spans
fn canonical(start: TilePosition, end: TilePosition) -> (TilePosition, TilePosition) {
    if (start.y, start.x) <= (end.y, end.x) {
        (start, end)
    } else {
        (end, start)
    }
}

fn is_finite(position: &TilePosition) -> bool {
    position.x.is_finite() && position.y.is_finite()
}

/// Row or column index of a coordinate. Clamped before the cast, so coordinates
/// far outside the grid land just beyond its border instead of overflowing.
fn grid_index(value: f64, segment_count: u32) -> i64 {
    value.clamp(-1.0, segment_count as f64 + 1.0) as i64
}

/// First and last index whose closed unit interval touches `[low, high]`
fn index_span(low: f64, high: f64, segment_count: u32) -> RangeInclusive<i64> {
    (grid_index(low.ceil(), segment_count) - 1)..=grid_index(high.floor(), segment_count)
}

/// All rows the closed supercover of the segment reaches
fn row_range(start: TilePosition, end: TilePosition, segment_count: u32) -> RangeInclusive<i64> {
    index_span(start.y.min(end.y), start.y.max(end.y), segment_count)
}

/// First and last column the segment touches inside the closed strip `[row, row + 1]`
fn row_span(
    start: TilePosition,
    end: TilePosition,
    row: i64,
    segment_count: u32,
) -> Option<RangeInclusive<i64>> {
    let low = row as f64;
    let high = low + 1.0;

    let (x_a, x_b) = if start.y == end.y {
        if start.y < low || start.y > high {
            return None;
        }
        (start.x, end.x)
    } else {
        let delta_y = end.y - start.y;
        let t_low = (low - start.y) / delta_y;
        let t_high = (high - start.y) / delta_y;
        let t_min = t_low.min(t_high).max(0.0);
        let t_max = t_low.max(t_high).min(1.0);
        if t_min > t_max {
            return None;
        }
        let delta_x = end.x - start.x;
        (start.x + delta_x * t_min, start.x + delta_x * t_max)
    };

    Some(index_span(x_a.min(x_b), x_a.max(x_b), segment_count))
}

fn clamp_range(range: RangeInclusive<i64>, segment_count: u32) -> RangeInclusive<i64> {
    let last = segment_count as i64 - 1;
    (*range.start()).max(0)..=(*range.end()).min(last)
}

/// The cells the segment touches inside a `segment_count` × `segment_count` grid
pub fn cells_on_line_in_grid(
    start: TilePosition,
    end: TilePosition,
    segment_count: u32,
) -> Vec<CellIndex> {
    if !is_finite(&start) || !is_finite(&end) {
        return Vec::new();
    }
    let (start, end) = canonical(start, end);

    let mut cells = Vec::new();
    for row in clamp_range(row_range(start, end, segment_count), segment_count) {
        if let Some(columns) = row_span(start, end, row, segment_count) {
            let columns = clamp_range(columns, segment_count);
            cells.extend(columns.map(|column| CellIndex::new(column, row)));
        }
    }
    cells
}

/// The cells a triangle may overlap inside a `segment_count` × `segment_count` grid.
///
/// Per row, the span from the leftmost to the rightmost edge cell is taken,
/// which also covers the interior. The result is a superset: cells which only
/// touch the triangle's bounding span come out empty in the exact clip later.
pub fn cells_under_triangle(triangle: &TileTriangle, segment_count: u32) -> Vec<CellIndex> {
    if !triangle.iter().all(is_finite) {
        return Vec::new();
    }

    let edges = [
        canonical(triangle[0], triangle[1]),
        canonical(triangle[1], triangle[2]),
        canonical(triangle[2], triangle[0]),
    ];

    let low = triangle.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let high = triangle.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

    let mut cells = Vec::new();
    for row in clamp_range(index_span(low, high, segment_count), segment_count) {
        let span = edges
            .iter()
            .filter_map(|(start, end)| row_span(*start, *end, row, segment_count))
            .reduce(|a, b| (*a.start()).min(*b.start())..=(*a.end()).max(*b.end()));

        if let Some(columns) = span {
            let columns = clamp_range(columns, segment_count);
            cells.extend(columns.map(|column| CellIndex::new(column, row)));
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> TilePosition {
        TilePosition::new(x, y)
    }

    #[test]
    fn horizontal_line_inside_a_row() {
        let cells = cells_on_line_in_grid(p(0.5, 0.5), p(2.5, 0.5), 4);
        assert_eq!(
            cells,
            vec![
                CellIndex::new(0, 0),
                CellIndex::new(1, 0),
                CellIndex::new(2, 0)
            ]
        );
    }

    #[test]
    fn vertical_line_needs_no_division() {
        let cells = cells_on_line_in_grid(p(1.5, 0.2), p(1.5, 2.7), 4);
        assert_eq!(
            cells,
            vec![
                CellIndex::new(1, 0),
                CellIndex::new(1, 1),
                CellIndex::new(1, 2)
            ]
        );
    }

    #[test]
    fn line_on_a_grid_line_grazes_both_sides() {
        let cells = cells_on_line_in_grid(p(0.5, 1.0), p(1.5, 1.0), 4);
        assert_eq!(cells.len(), 4);
        assert!(cells.contains(&CellIndex::new(0, 0)));
        assert!(cells.contains(&CellIndex::new(1, 1)));
    }

    #[test]
    fn diagonal_through_corners_includes_grazed_cells() {
        let cells = cells_on_line_in_grid(p(0.5, 0.5), p(1.5, 1.5), 4);
        // (0,0) and (1,1) are crossed, (1,0) and (0,1) touched at the corner
        assert_eq!(cells.len(), 4);
    }

    #[test]
    fn forward_and_backward_are_identical() {
        let start = p(0.3, 3.7);
        let end = p(5.1, 0.2);
        assert_eq!(
            cells_on_line_in_grid(start, end, 6),
            cells_on_line_in_grid(end, start, 6)
        );
        assert_eq!(
            cells_on_line_in_grid(start, end, 4),
            cells_on_line_in_grid(end, start, 4)
        );
    }

    #[test]
    fn grid_line_cells_stay_inside_the_grid() {
        let cells = cells_on_line_in_grid(p(-3.0, 0.5), p(9.0, 0.5), 4);
        assert_eq!(cells.len(), 4);
        assert!(cells.iter().all(|cell| cell.is_inside(4)));
    }

    #[test]
    fn triangle_rows_cover_the_interior() {
        let triangle = [p(0.2, 0.2), p(3.8, 0.2), p(0.2, 3.8)];
        let cells = cells_under_triangle(&triangle, 4);
        // Every cell whose lower left corner is inside the triangle
        for y in 0..4 {
            for x in 0..4 {
                if (x as f64 + 0.2) + (y as f64 + 0.2) < 3.9 {
                    assert!(cells.contains(&CellIndex::new(x, y)), "missing {x} {y}");
                }
            }
        }
    }

    #[test]
    fn triangle_around_the_grid_covers_all_cells() {
        let triangle = [p(-100.0, -100.0), p(100.0, -100.0), p(0.0, 100.0)];
        let cells = cells_under_triangle(&triangle, 3);
        assert_eq!(cells.len(), 9);
    }

    #[test]
    fn triangle_outside_the_grid_is_empty() {
        let triangle = [p(10.0, 10.0), p(12.0, 10.0), p(10.0, 12.0)];
        assert!(cells_under_triangle(&triangle, 4).is_empty());
        let triangle = [p(-5.0, 1.0), p(-2.0, 1.0), p(-3.0, 2.0)];
        assert!(cells_under_triangle(&triangle, 4).is_empty());
    }

    #[test]
    fn not_finite_input_gives_no_cells() {
        assert!(cells_on_line_in_grid(p(f64::NAN, 0.0), p(1.0, 1.0), 4).is_empty());
        let triangle = [p(0.0, 0.0), p(f64::INFINITY, 0.0), p(0.0, 1.0)];
        assert!(cells_under_triangle(&triangle, 4).is_empty());
    }

    #[test]
    fn far_away_vertices_are_clamped_to_the_grid() {
        let triangle = [p(-1e300, 0.5), p(1.0, 0.5), p(0.5, 1.0)];
        let cells = cells_under_triangle(&triangle, 4);
        assert!(cells.contains(&CellIndex::new(0, 0)));
        assert!(cells.iter().all(|cell| cell.is_inside(4)));

        let triangle = [p(0.5, -1e300), p(1e300, 1e300), p(0.5, 1e300)];
        let cells = cells_under_triangle(&triangle, 4);
        assert!(cells.contains(&CellIndex::new(0, 0)));
        assert!(cells.contains(&CellIndex::new(3, 3)));
        assert!(cells.iter().all(|cell| cell.is_inside(4)));

        let triangle = [p(1e300, 1e300), p(2e300, 1e300), p(1e300, 2e300)];
        assert!(cells_under_triangle(&triangle, 4).is_empty());
    }

    #[test]
    fn far_away_line_ends_are_clamped_to_the_grid() {
        let cells = cells_on_line_in_grid(p(0.5, -1e30), p(0.5, 1.5), 4);
        assert_eq!(cells, vec![CellIndex::new(0, 0), CellIndex::new(0, 1)]);

        // a long line visits only the cells of the grid
        let cells = cells_on_line_in_grid(p(0.0, 0.5), p(1e12, 0.5), 4);
        assert_eq!(cells.len(), 4);

        let cells = cells_on_line_in_grid(p(-1e300, 2.5), p(1e300, 2.5), 4);
        assert_eq!(cells.len(), 4);
        assert!(cells.iter().all(|cell| cell.y == 2));
    }
}
