// Map features as read from a JSON file, and how they turn into geometry

use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ProjectionError;
use crate::geometry_builder::{FenceParams, PathParams, PolygonParams, ProjectedGeometryBuilder};
use crate::kernel_in::{GroundPosition, RingType};
use crate::kernel_out::ProjectedGeometry;
use crate::projector::GroundProjector;
use crate::tagticks::{
    DEFAULT_SURFACE_HEIGHT, FeatureKind, Tags, fence_height, feature_kind, parse_height,
    parse_layer, parse_width, texture_id,
};

/// Nodes are `[x, z]` in meters relative to the tile origin
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RingDescription {
    #[serde(rename = "type")]
    pub ring_type: RingType,
    pub nodes: Vec<[f32; 2]>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureDescription {
    pub id: u64,
    #[serde(default)]
    pub tags: Tags,
    #[serde(default)]
    pub rings: Vec<RingDescription>,
    /// Overrides the `layer` tag
    #[serde(default)]
    pub z_index: Option<i32>,
}

impl FeatureDescription {
    pub fn kind(&self) -> FeatureKind {
        feature_kind(&self.tags)
    }

    pub fn build(&self, projector: GroundProjector) -> Result<ProjectedGeometry, ProjectionError> {
        let mut builder = ProjectedGeometryBuilder::new(self.id, projector);
        for ring in &self.rings {
            let nodes = ring
                .nodes
                .iter()
                .map(|node| GroundPosition::from_xz(node[0], node[1]))
                .collect();
            builder.add_ring(ring.ring_type, nodes);
        }
        builder.set_z_index(self.z_index.unwrap_or_else(|| parse_layer(&self.tags)));

        let texture_id = texture_id(&self.tags);
        match self.kind() {
            FeatureKind::Surface => builder.add_polygon(PolygonParams {
                texture_id,
                height: parse_height(&self.tags, DEFAULT_SURFACE_HEIGHT),
                ..Default::default()
            })?,
            FeatureKind::Path => builder.add_path(PathParams {
                width: parse_width(&self.tags),
                texture_id,
                height: 0.0,
            })?,
            FeatureKind::Fence => builder.add_fence(FenceParams {
                texture_id,
                height: fence_height(&self.tags),
                min_height: 0.0,
            })?,
        }

        let geometry = builder.get_geometry();
        info!(
            "feature {} ({:?}): {} vertices",
            self.id,
            self.kind(),
            geometry.vertex_count()
        );
        Ok(geometry)
    }
}

pub fn features_from_json(text: &str) -> Result<Vec<FeatureDescription>, ProjectionError> {
    Ok(serde_json::from_str(text)?)
}

pub fn load_features(path: impl AsRef<Path>) -> Result<Vec<FeatureDescription>, ProjectionError> {
    let text = std::fs::read_to_string(path)?;
    features_from_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_feature_list() {
        let features = features_from_json(
            r#"[
                { "id": 1, "tags": { "highway": "footway" },
                  "rings": [ { "type": "outer", "nodes": [[0, 0], [10, 0]] } ] },
                { "id": 2 }
            ]"#,
        )
        .unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].kind(), FeatureKind::Path);
        assert_eq!(features[0].rings[0].ring_type, RingType::Outer);
        assert_eq!(features[0].rings[0].nodes[1], [10.0, 0.0]);
        assert_eq!(features[1].kind(), FeatureKind::Surface);
        assert!(features[1].rings.is_empty());
    }

    #[test]
    fn unknown_ring_type_is_rejected() {
        let result = features_from_json(
            r#"[{ "id": 1, "rings": [ { "type": "middle", "nodes": [] } ] }]"#,
        );
        assert!(matches!(result, Err(ProjectionError::Config(_))));
    }

    #[test]
    fn layer_tag_sets_z_index() {
        let projector = GroundProjector::new(100.0, 10).unwrap();
        let mut feature = FeatureDescription {
            id: 5,
            tags: [("layer".to_string(), "2".to_string())].into_iter().collect(),
            rings: Vec::new(),
            z_index: None,
        };
        assert_eq!(feature.build(projector).unwrap().z_index, 2);
        feature.z_index = Some(-1);
        assert_eq!(feature.build(projector).unwrap().z_index, -1);
    }
}
