///////////////////////////////////////
// The tactics to handle OSM tagging //
///////////////////////////////////////

use log::warn;
use std::collections::HashMap;

pub type Tags = HashMap<String, String>;

// This constands may come from a (3D-)render shema
pub static DEFAULT_FENCE_HEIGHT: f32 = 1.5;
pub static DEFAULT_WALL_HEIGHT: f32 = 2.0;
pub static DEFAULT_PATH_WIDTH: f32 = 4.0;
pub static DEFAULT_SURFACE_HEIGHT: f32 = 0.0;
pub static UNKNOWN_TEXTURE_ID: u8 = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeatureKind {
    Surface,
    Path,
    Fence,
}

pub fn feature_kind(tags: &Tags) -> FeatureKind {
    if let Some(barrier) = tags.get("barrier") {
        if barrier == "fence" || barrier == "wall" {
            return FeatureKind::Fence;
        }
    }
    if tags.contains_key("highway") {
        return FeatureKind::Path;
    }
    FeatureKind::Surface
}

pub fn tags_get2<'a>(tags: &'a Tags, option1: &str, option2: &str) -> Option<&'a String> {
    if let Some(tag) = tags.get(option1) {
        Some(tag)
    } else {
        tags.get(option2)
    }
}

pub fn tags_get3<'a>(
    tags: &'a Tags,
    option1: &str,
    option2: &str,
    option3: &str,
) -> Option<&'a String> {
    tags_get2(tags, option1, option2).or_else(|| tags.get(option3))
}

/// Meters from values like "3", "1.5 m" or "2m". Anything else gives the default.
pub fn parse_meters(value: Option<&String>, default: f32) -> f32 {
    let Some(value) = value else {
        return default;
    };

    let number = value.trim();
    let number = number.strip_suffix('m').unwrap_or(number).trim();

    match number.parse::<f32>() {
        Ok(meters) if meters.is_finite() && meters >= 0.0 => meters,
        Ok(meters) => {
            warn!("parse_meters: {meters} out of range, {default} used");
            default
        }
        Err(error) => {
            warn!("parse_meters: {error} for:{value}:, {default} used");
            default
        }
    }
}

pub fn parse_height(tags: &Tags, default: f32) -> f32 {
    parse_meters(tags_get2(tags, "height", "est_height"), default)
}

pub fn parse_width(tags: &Tags) -> f32 {
    let default = match tags.get("highway").map(String::as_str) {
        Some("motorway" | "trunk") => 12.0,
        Some("primary" | "secondary") => 8.0,
        Some("tertiary" | "residential" | "unclassified") => 6.0,
        Some("service") => 4.0,
        Some("footway" | "path" | "cycleway" | "steps" | "pedestrian") => 2.0,
        Some("track") => 3.0,
        _ => DEFAULT_PATH_WIDTH,
    };
    parse_meters(tags_get2(tags, "width", "est_width"), default)
}

pub fn fence_height(tags: &Tags) -> f32 {
    let default = match tags.get("barrier").map(String::as_str) {
        Some("wall") => DEFAULT_WALL_HEIGHT,
        _ => DEFAULT_FENCE_HEIGHT,
    };
    parse_height(tags, default)
}

/// The renderer's texture slot for a surface, landuse or barrier value
pub fn texture_id(tags: &Tags) -> u8 {
    let Some(value) = tags_get3(tags, "surface", "landuse", "barrier") else {
        return UNKNOWN_TEXTURE_ID;
    };
    match value.as_str() {
        "asphalt" => 1,
        "concrete" => 2,
        "paving_stones" | "sett" => 3,
        "grass" | "meadow" | "village_green" => 4,
        "sand" => 5,
        "gravel" | "fine_gravel" => 6,
        "dirt" | "ground" | "earth" => 7,
        "wood" => 8,
        "forest" => 9,
        "farmland" => 10,
        "basin" | "reservoir" => 11,
        "fence" => 12,
        "wall" => 13,
        "hedge" => 14,
        _ => UNKNOWN_TEXTURE_ID,
    }
}

/// Draw order from the `layer` tag
pub fn parse_layer(tags: &Tags) -> i32 {
    let Some(layer) = tags.get("layer") else {
        return 0;
    };
    match layer.trim().parse() {
        Ok(layer) => layer,
        Err(error) => {
            warn!("parse_layer: {error} for:{layer}:");
            0
        }
    }
}
