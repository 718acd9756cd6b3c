//! Per vertex attributes and their barycentric interpolation.
//!
//! Attributes are declared as channels with a fixed width. A triangle
//! carries, per channel, `3 * width` values: one vector per source vertex.

use crate::clip::AREA_EPSILON;
use crate::error::ProjectionError;
use crate::grid::{TilePosition, TileTriangle};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttributeChannel {
    pub name: String,
    pub width: usize,
}

impl AttributeChannel {
    pub fn new(name: impl Into<String>, width: usize) -> Self {
        Self {
            name: name.into(),
            width,
        }
    }

    /// The texture coordinate channel every drawable feature has
    pub fn uv() -> Self {
        Self::new("uv", 2)
    }
}

/// The values of one channel at the three vertices of a source triangle
#[derive(Clone, Debug, PartialEq)]
pub struct TriangleAttribute {
    pub channel: AttributeChannel,
    pub values: Vec<f32>,
}

impl TriangleAttribute {
    pub fn new(channel: AttributeChannel, values: Vec<f32>) -> Self {
        Self { channel, values }
    }

    pub fn uv(uvs: [[f32; 2]; 3]) -> Self {
        Self::new(AttributeChannel::uv(), uvs.concat())
    }

    pub fn validate(&self) -> Result<(), ProjectionError> {
        if self.channel.width == 0 {
            return Err(ProjectionError::AttributeWidth {
                name: self.channel.name.clone(),
            });
        }
        let expected = self.channel.width * 3;
        if self.values.len() != expected {
            return Err(ProjectionError::AttributeLength {
                name: self.channel.name.clone(),
                expected,
                actual: self.values.len(),
            });
        }
        Ok(())
    }

    fn vertex(&self, index: usize) -> &[f32] {
        let width = self.channel.width;
        &self.values[index * width..(index + 1) * width]
    }
}

/// Barycentric weights of `point` against `triangle`, `None` for a degenerate triangle.
///
/// The weights are clamped to be non-negative and renormalised, so a point
/// a rounding error outside the triangle still interpolates inside the
/// convex hull of the vertex values.
pub fn barycentric(point: TilePosition, triangle: &TileTriangle) -> Option<[f64; 3]> {
    let v0 = triangle[1] - triangle[0];
    let v1 = triangle[2] - triangle[0];
    let v2 = point - triangle[0];

    let denominator = v0.cross(v1);
    if denominator.abs() <= AREA_EPSILON {
        return None;
    }

    let w1 = v2.cross(v1) / denominator;
    let w2 = v0.cross(v2) / denominator;
    let weights = [1.0 - w1 - w2, w1, w2].map(|weight| weight.max(0.0));

    let sum: f64 = weights.iter().sum();
    if sum <= 0.0 {
        return None;
    }
    Some(weights.map(|weight| weight / sum))
}

/// Appends the interpolated vector of `attribute` for the given weights
pub fn interpolate_into(weights: [f64; 3], attribute: &TriangleAttribute, out: &mut Vec<f32>) {
    let (a, b, c) = (attribute.vertex(0), attribute.vertex(1), attribute.vertex(2));
    for component in 0..attribute.channel.width {
        let value = a[component] as f64 * weights[0]
            + b[component] as f64 * weights[1]
            + c[component] as f64 * weights[2];
        out.push(value as f32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> TilePosition {
        TilePosition::new(x, y)
    }

    #[test]
    fn weights_sum_to_one() {
        let triangle = [p(0.0, 0.0), p(4.0, 0.0), p(0.0, 3.0)];
        for point in [p(1.0, 1.0), p(0.0, 0.0), p(2.0, 1.5), p(0.1, 2.8)] {
            let weights = barycentric(point, &triangle).unwrap();
            assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-12);
            assert!(weights.iter().all(|weight| *weight >= 0.0));
        }
    }

    #[test]
    fn vertices_reproduce_their_values() {
        let triangle = [p(0.0, 0.0), p(2.0, 0.0), p(0.0, 2.0)];
        let attribute = TriangleAttribute::uv([[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
        let weights = barycentric(triangle[1], &triangle).unwrap();
        let mut out = Vec::new();
        interpolate_into(weights, &attribute, &mut out);
        assert_eq!(out, vec![1.0, 0.0]);
    }

    #[test]
    fn centroid_is_the_mean() {
        let triangle = [p(0.0, 0.0), p(3.0, 0.0), p(0.0, 3.0)];
        let attribute = TriangleAttribute::new(
            AttributeChannel::new("color", 3),
            vec![3.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 3.0],
        );
        let weights = barycentric(p(1.0, 1.0), &triangle).unwrap();
        let mut out = Vec::new();
        interpolate_into(weights, &attribute, &mut out);
        for value in out {
            assert!((value - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn point_slightly_outside_is_clamped() {
        let triangle = [p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)];
        let weights = barycentric(p(0.5, -1e-12), &triangle).unwrap();
        assert!(weights.iter().all(|weight| *weight >= 0.0));
    }

    #[test]
    fn degenerate_triangle_has_no_weights() {
        let line = [p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0)];
        assert!(barycentric(p(0.5, 0.5), &line).is_none());
    }

    #[test]
    fn attribute_length_is_checked() {
        let attribute = TriangleAttribute::new(AttributeChannel::uv(), vec![0.0; 5]);
        assert!(matches!(
            attribute.validate(),
            Err(ProjectionError::AttributeLength {
                expected: 6,
                actual: 5,
                ..
            })
        ));
        let attribute = TriangleAttribute::new(AttributeChannel::new("empty", 0), vec![]);
        assert!(matches!(
            attribute.validate(),
            Err(ProjectionError::AttributeWidth { .. })
        ));
    }
}
