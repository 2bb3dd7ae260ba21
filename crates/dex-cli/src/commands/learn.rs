use std::path::Path;

use dex_core::{check_learnset, split_query, LearnOptions};

use crate::build_catalog;

pub fn run_learn(
    input_path: &Path,
    species: &str,
    moves: &[String],
    level: Option<u8>,
    all_sources: bool,
    format: &str,
) -> Result<String, String> {
    let catalog = build_catalog(input_path)?;
    let options = LearnOptions {
        max_level: level,
        all_sources,
    };

    // moves may be separate arguments or comma-separated
    let moves = split_query(&moves.join(","));
    let report =
        check_learnset(&catalog, species, &moves, &options).map_err(|e| e.to_string())?;

    match format {
        "json" => serde_json::to_string_pretty(&report)
            .map_err(|e| format!("JSON serialization error: {e}")),
        _ => Ok(report.display_text(&options)),
    }
}
