use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use dex_core::CatalogData;

pub const CONFIG_FILE: &str = "dexsearch.config.yaml";

/// Data file extensions picked up when scanning a directory.
const DATA_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// A parsed catalog file with its path.
pub struct CatalogFile {
    pub path: String,
    pub data: CatalogData,
}

/// Project configuration from dexsearch.config.yaml.
#[derive(Debug, Default, Deserialize)]
pub struct DexConfig {
    pub name: Option<String>,
    pub version: Option<String>,
    pub sources: Option<Vec<String>>,
    pub preview_limit: Option<usize>,
    pub sample_seed: Option<u64>,
}

/// Read catalog files from a path (file or directory).
pub fn read_catalog_files(input_path: &Path) -> Result<Vec<CatalogFile>, String> {
    if !input_path.exists() {
        return Err(format!("Path does not exist: {}", input_path.display()));
    }

    if input_path.is_file() {
        return Ok(vec![read_catalog_file(input_path)?]);
    }

    if input_path.is_dir() {
        let config_path = input_path.join(CONFIG_FILE);
        if config_path.exists() {
            return read_from_config(&config_path, input_path);
        }

        // Default: every data file under the directory
        return scan_directory(input_path);
    }

    Err(format!(
        "Path is neither a file nor a directory: {}",
        input_path.display()
    ))
}

/// Read project config from dexsearch.config.yaml if it exists.
pub fn read_project_config(dir_path: &Path) -> Option<DexConfig> {
    let config_path = dir_path.join(CONFIG_FILE);
    if !config_path.exists() {
        return None;
    }

    let content = fs::read_to_string(&config_path).ok()?;
    serde_yaml::from_str(&content).ok()
}

fn read_catalog_file(path: &Path) -> Result<CatalogFile, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let data: CatalogData = match ext.as_str() {
        "json" => serde_json::from_str(&content)
            .map_err(|e| format!("Invalid JSON in {}: {}", path.display(), e))?,
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .map_err(|e| format!("Invalid YAML in {}: {}", path.display(), e))?,
        _ => {
            return Err(format!(
                "Unsupported catalog file (expected .yaml, .yml or .json): {}",
                path.display()
            ))
        }
    };
    debug!(path = %path.display(), species = data.species.len(), "catalog file read");

    Ok(CatalogFile {
        path: path.to_string_lossy().to_string(),
        data,
    })
}

fn scan_directory(dir_path: &Path) -> Result<Vec<CatalogFile>, String> {
    let mut paths: Vec<PathBuf> = Vec::new();

    for ext in DATA_EXTENSIONS {
        let pattern = dir_path.join(format!("**/*.{ext}"));
        let pattern_str = pattern.to_string_lossy().replace('\\', "/");
        let entries =
            glob::glob(&pattern_str).map_err(|e| format!("Invalid glob pattern: {}", e))?;

        for entry in entries {
            match entry {
                Ok(path) => {
                    if path.file_name().is_some_and(|n| n == CONFIG_FILE) {
                        continue;
                    }
                    if !paths.contains(&path) {
                        paths.push(path);
                    }
                }
                Err(e) => {
                    return Err(format!("Glob error: {}", e));
                }
            }
        }
    }

    paths.sort();
    paths.iter().map(|p| read_catalog_file(p)).collect()
}

fn read_from_config(config_path: &Path, base_dir: &Path) -> Result<Vec<CatalogFile>, String> {
    let yaml_content =
        fs::read_to_string(config_path).map_err(|e| format!("Failed to read config: {}", e))?;

    let config: DexConfig =
        serde_yaml::from_str(&yaml_content).map_err(|e| format!("Invalid YAML config: {}", e))?;

    let source_patterns = match config.sources {
        Some(ref s) if !s.is_empty() => s.clone(),
        _ => return scan_directory(base_dir),
    };

    let mut files: Vec<CatalogFile> = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for pattern in &source_patterns {
        let full_pattern = base_dir.join(pattern);
        let pattern_str = full_pattern.to_string_lossy().replace('\\', "/");
        let entries = glob::glob(&pattern_str)
            .map_err(|e| format!("Invalid glob pattern '{}': {}", pattern, e))?;

        let mut matched: Vec<PathBuf> = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) => {
                    if seen.insert(path.clone()) {
                        matched.push(path);
                    }
                }
                Err(e) => return Err(format!("Glob error: {}", e)),
            }
        }
        matched.sort();

        for path in matched {
            files.push(read_catalog_file(&path)?);
        }
    }

    Ok(files)
}
