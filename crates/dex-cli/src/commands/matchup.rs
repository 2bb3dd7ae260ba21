use std::path::Path;

use dex_core::{effectiveness, weakness};

use crate::build_catalog;

pub fn run_weakness(input_path: &Path, query: &str, format: &str) -> Result<String, String> {
    let catalog = build_catalog(input_path)?;
    let matchups = weakness(&catalog, query).map_err(|e| e.to_string())?;

    match format {
        "json" => serde_json::to_string_pretty(&matchups)
            .map_err(|e| format!("JSON serialization error: {e}")),
        _ => Ok(matchups.display_text()),
    }
}

pub fn run_eff(
    input_path: &Path,
    attacker: &str,
    defender: &str,
    format: &str,
) -> Result<String, String> {
    let catalog = build_catalog(input_path)?;
    let result = effectiveness(&catalog, attacker, defender).map_err(|e| e.to_string())?;

    match format {
        "json" => serde_json::to_string_pretty(&result)
            .map_err(|e| format!("JSON serialization error: {e}")),
        _ => Ok(result.display_text()),
    }
}
