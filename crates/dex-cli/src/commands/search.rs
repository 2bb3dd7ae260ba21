use std::path::Path;

use dex_core::{filter_catalog, split_query};

use crate::{build_catalog, search_options};

pub fn run_search(
    input_path: &Path,
    query: &[String],
    seed: Option<u64>,
    broadcast: bool,
    format: &str,
) -> Result<String, String> {
    let catalog = build_catalog(input_path)?;
    let options = search_options(input_path, seed, broadcast);

    let tokens = split_query(&query.join(","));
    let result = filter_catalog(&catalog, &tokens, &options).map_err(|e| e.to_string())?;

    match format {
        "json" => {
            let names: Vec<&str> = result.records.iter().map(|s| s.name.as_str()).collect();
            serde_json::to_string_pretty(&serde_json::json!({
                "results": names,
                "count": names.len(),
                "truncated": result.truncated,
                "showAll": result.show_all,
                "text": result.display_text,
            }))
            .map_err(|e| format!("JSON serialization error: {e}"))
        }
        _ => Ok(result.display_text),
    }
}
