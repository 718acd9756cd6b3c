use osm_ground::{FeatureKind, ProjectedGeometry, TerrainConfig, features_from_json};
use rayon::prelude::*;

const FEATURES: &str = r#"[
    {
        "id": 100,
        "tags": { "landuse": "grass" },
        "rings": [
            { "type": "outer", "nodes": [[10, 10], [60, 10], [60, 40], [10, 40], [10, 10]] },
            { "type": "inner", "nodes": [[20, 20], [30, 20], [30, 30], [20, 30], [20, 20]] }
        ]
    },
    {
        "id": 101,
        "tags": { "highway": "footway", "surface": "asphalt", "layer": "1" },
        "rings": [ { "type": "outer", "nodes": [[5, 50], [80, 50], [80, 90]] } ]
    },
    {
        "id": 102,
        "tags": { "barrier": "fence", "height": "1.2 m" },
        "rings": [ { "type": "outer", "nodes": [[100, 100], [140, 130]] } ],
        "z_index": 4
    },
    {
        "id": 103,
        "tags": { "highway": "service" }
    }
]"#;

#[test]
fn each_kind_builds_its_geometry() {
    let projector = TerrainConfig::default().projector().unwrap();
    let features = features_from_json(FEATURES).unwrap();
    assert_eq!(features.len(), 4);
    assert_eq!(features[0].kind(), FeatureKind::Surface);
    assert_eq!(features[1].kind(), FeatureKind::Path);
    assert_eq!(features[2].kind(), FeatureKind::Fence);

    let grass = features[0].build(projector).unwrap();
    assert!(!grass.is_empty());
    assert!(grass.texture_id_buffer.iter().all(|id| *id == 4));
    assert!(grass.position_buffer.chunks_exact(3).all(|v| v[1] == 0.0));

    let footway = features[1].build(projector).unwrap();
    assert_eq!(footway.z_index, 1);
    assert!(footway.texture_id_buffer.iter().all(|id| *id == 1));
    // a 2 m footway
    assert!((footway.bounding_box.min[2] - 49.0).abs() < 1e-3);

    let fence = features[2].build(projector).unwrap();
    assert_eq!(fence.z_index, 4);
    assert!((fence.bounding_box.max[1] - 1.2).abs() < 1e-6);
    assert!(fence.vertex_count() > 6);

    assert!(features[3].build(projector).is_err());
}

#[test]
fn parallel_build_keeps_the_order() {
    let projector = TerrainConfig::default().projector().unwrap();
    let features = features_from_json(FEATURES).unwrap();

    let geometries: Vec<ProjectedGeometry> = features
        .par_iter()
        .filter_map(|feature| feature.build(projector).ok())
        .collect();
    let ids: Vec<u64> = geometries.iter().map(|geometry| geometry.feature_id).collect();
    assert_eq!(ids, vec![100, 101, 102]);

    for (geometry, feature) in geometries.iter().zip(&features) {
        let sequential = feature.build(projector).unwrap();
        assert_eq!(geometry.position_buffer, sequential.position_buffer);
    }
}

#[test]
fn geometry_serializes_to_json() {
    let projector = TerrainConfig::default().projector().unwrap();
    let features = features_from_json(FEATURES).unwrap();
    let geometry = features[2].build(projector).unwrap();

    let json = serde_json::to_value(&geometry).unwrap();
    assert_eq!(json["feature_id"], 102);
    assert_eq!(json["z_index"], 4);
    for key in [
        "bounding_box",
        "position_buffer",
        "normal_buffer",
        "uv_buffer",
        "texture_id_buffer",
    ] {
        assert!(json.get(key).is_some(), "{key} missing");
    }
    assert_eq!(
        json["texture_id_buffer"].as_array().unwrap().len(),
        geometry.vertex_count()
    );
}
