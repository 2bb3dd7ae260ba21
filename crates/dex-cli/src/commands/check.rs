use std::path::Path;

use dex_core::{validate, CatalogData, Diagnostic, DiagnosticSeverity, ValidateOptions};

use crate::reader::{read_catalog_files, read_project_config};

/// Validate the catalog at `input_path`. Returns the report and the error count.
pub fn run_check(input_path: &Path, strict: bool, format: &str) -> Result<(String, usize), String> {
    let files = read_catalog_files(input_path)?;

    if files.is_empty() {
        return Err(format!(
            "No catalog files (.yaml, .yml, .json) found at: {}",
            input_path.display()
        ));
    }

    let file_count = files.len();
    let mut data = CatalogData::default();
    for file in files {
        data.merge(file.data);
    }
    let species_count = data.species.len();

    let result = validate(&data, &ValidateOptions { strict });
    let error_count = result.errors.len();
    let warning_count = result.warnings.len();

    let project = if input_path.is_dir() {
        read_project_config(input_path).and_then(|c| match (c.name, c.version) {
            (Some(name), Some(version)) => Some(format!("{name} {version}")),
            (Some(name), None) => Some(name),
            _ => None,
        })
    } else {
        None
    };

    if format == "json" {
        let diagnostics: Vec<&Diagnostic> =
            result.errors.iter().chain(result.warnings.iter()).collect();
        let output = serde_json::json!({
            "project": project,
            "diagnostics": diagnostics,
            "summary": {
                "errors": error_count,
                "warnings": warning_count,
                "files": file_count,
                "species": species_count,
            }
        });
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        return Ok((json, error_count));
    }

    // Human-readable format
    let mut lines: Vec<String> = Vec::new();

    for d in result.errors.iter().chain(result.warnings.iter()) {
        let severity = match d.severity {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
        };
        lines.push(format!("{}[{}] {}: {}", severity, d.code, d.subject, d.message));
    }

    let error_word = if error_count == 1 { "error" } else { "errors" };
    let warning_word = if warning_count == 1 {
        "warning"
    } else {
        "warnings"
    };
    let file_word = if file_count == 1 { "file" } else { "files" };
    let prefix = project.map(|p| format!("{p}: ")).unwrap_or_default();
    lines.push(format!(
        "{prefix}{error_count} {error_word}, {warning_count} {warning_word} in {file_count} {file_word} ({species_count} species)."
    ));

    Ok((lines.join("\n"), error_count))
}
