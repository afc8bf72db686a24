use anyhow::{Context, Result};
use geojson::{FeatureCollection, GeoJson};
use std::path::Path;
use worldle_core::{Game, GameSession};

/// Write the mystery outline to a GeoJSON file (as single unlabelled feature)
pub fn write_outline_geojson(game: &Game, session: &GameSession, output_path: &Path) -> Result<()> {
    let feature_collection = FeatureCollection {
        bbox: None,
        features: vec![game.mystery_outline_geojson(session)],
        foreign_members: None,
    };

    write_feature_collection(feature_collection, output_path)?;
    tracing::info!("Wrote outline to {}", output_path.display());
    Ok(())
}

/// Write the outlines of every guess so far, plus the mystery when `reveal` is set.
///
/// Returns the number of features written.
pub fn write_guesses_geojson(
    game: &Game,
    session: &GameSession,
    reveal: bool,
    output_path: &Path,
) -> Result<usize> {
    let feature_collection = game.guesses_geojson(session, reveal);
    let count = feature_collection.features.len();

    write_feature_collection(feature_collection, output_path)?;
    tracing::info!(count, reveal, "Wrote guess outlines to {}", output_path.display());
    Ok(count)
}

fn write_feature_collection(feature_collection: FeatureCollection, output_path: &Path) -> Result<()> {
    let geojson = GeoJson::from(feature_collection);
    let json_string = serde_json::to_string_pretty(&geojson)
        .context("Failed to serialize GeoJSON")?;

    std::fs::write(output_path, json_string)
        .with_context(|| format!("Failed to write GeoJSON to {}", output_path.display()))
}
