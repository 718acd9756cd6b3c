// Command line: map features in, ground projected geometry out

use clap::Parser;
use log::{error, info};
use rayon::prelude::*;
use std::error::Error;
use std::path::PathBuf;

use osm_ground::{ProjectedGeometry, TerrainConfig, load_features};

/**** Project patterns ****************************************************************************
 * Don't use abbreviations, as Rust does
 * GroundPosition stores north before east, render order is x = east, z = north (see from_xz)
 * One builder per feature, never shared between threads
 */

#[derive(Parser, Debug, Clone)]
#[command(about = "drapes OSM like features onto the triangulated ground grid", version, long_about = None)]
struct Args {
    /// JSON list of features
    #[arg(short, long)]
    input: PathBuf,

    /// Geometry JSON file, stdout if not given
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Terrain config JSON, defaults for missing fields
    #[arg(short, long)]
    config: Option<PathBuf>,
}

///////////////////////////////////////////////////////////////////////////////////////////////////
// MAIN ///////////////////////////////////////////////////////////////////////////////////////////

fn main() -> Result<(), Box<dyn Error>> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => TerrainConfig::load(path)?,
        None => TerrainConfig::default(),
    };
    let projector = config.projector()?;
    info!(
        "tile size {} m, {} segments per tile",
        projector.tile_size(),
        projector.segment_count()
    );

    let features = load_features(&args.input)?;
    info!("{} features from {}", features.len(), args.input.display());

    // par_iter keeps the input order in collect
    let geometries: Vec<ProjectedGeometry> = features
        .par_iter()
        .filter_map(|feature| match feature.build(projector) {
            Ok(geometry) => Some(geometry),
            Err(build_error) => {
                error!("feature {} skipped: {build_error}", feature.id);
                None
            }
        })
        .collect();

    let vertex_count: usize = geometries.iter().map(|geometry| geometry.vertex_count()).sum();
    info!("{} geometries, {} vertices", geometries.len(), vertex_count);

    let json = serde_json::to_string(&geometries)?;
    match &args.output {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
