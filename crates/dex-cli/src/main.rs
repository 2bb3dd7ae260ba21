mod commands;
mod reader;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use dex_core::{validate, Catalog, CatalogData, SearchOptions, ValidateOptions};
use reader::{read_catalog_files, read_project_config};

#[derive(Parser)]
#[command(
    name = "dexsearch",
    version,
    about = "Creature catalog search — filter by type, tier, ability, move and more"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog with comma-separated terms ("water type, !uber, 4")
    Search {
        /// Search terms. Each argument is one term, so quote terms with
        /// spaces ("water type"); commas inside an argument also split terms
        #[arg(required = true)]
        query: Vec<String>,

        /// Catalog path (file or directory, defaults to current directory)
        #[arg(long, default_value = ".")]
        data: PathBuf,

        /// Seed for the order of a truncated preview
        #[arg(long)]
        seed: Option<u64>,

        /// Search on behalf of a whole room ('all' is refused)
        #[arg(long)]
        broadcast: bool,

        /// Output format: human (default) or json
        #[arg(long, default_value = "human")]
        format: String,
    },

    /// Check whether a species can learn one or more moves
    Learn {
        /// Species name
        species: String,

        /// Move names
        #[arg(required = true)]
        moves: Vec<String>,

        #[arg(long, default_value = ".")]
        data: PathBuf,

        /// Ignore level-up moves above this level
        #[arg(long)]
        level: Option<u8>,

        /// List every event source instead of the first few
        #[arg(long)]
        all_sources: bool,

        #[arg(long, default_value = "human")]
        format: String,
    },

    /// Show weaknesses and resistances of a species or of one or two types
    Weakness {
        /// Species name, or types separated by '/', ',' or spaces
        #[arg(required = true)]
        query: Vec<String>,

        #[arg(long, default_value = ".")]
        data: PathBuf,

        #[arg(long, default_value = "human")]
        format: String,
    },

    /// Show how effective a type or move is against a type or species
    Eff {
        attacker: String,
        defender: String,

        #[arg(long, default_value = ".")]
        data: PathBuf,

        #[arg(long, default_value = "human")]
        format: String,
    },

    /// Validate catalog data and report diagnostics
    Check {
        #[arg(long, default_value = ".")]
        data: PathBuf,

        /// Also check learnset entries
        #[arg(long)]
        strict: bool,

        #[arg(long, default_value = "human")]
        format: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            query,
            data,
            seed,
            broadcast,
            format,
        } => print_or_exit(commands::search::run_search(
            &data, &query, seed, broadcast, &format,
        )),
        Commands::Learn {
            species,
            moves,
            data,
            level,
            all_sources,
            format,
        } => print_or_exit(commands::learn::run_learn(
            &data,
            &species,
            &moves,
            level,
            all_sources,
            &format,
        )),
        Commands::Weakness {
            query,
            data,
            format,
        } => print_or_exit(commands::matchup::run_weakness(
            &data,
            &query.join(" "),
            &format,
        )),
        Commands::Eff {
            attacker,
            defender,
            data,
            format,
        } => print_or_exit(commands::matchup::run_eff(
            &data, &attacker, &defender, &format,
        )),
        Commands::Check {
            data,
            strict,
            format,
        } => match commands::check::run_check(&data, strict, &format) {
            Ok((output, error_count)) => {
                println!("{output}");
                if error_count > 0 {
                    process::exit(1);
                }
            }
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        },
    }
}

fn print_or_exit(result: Result<String, String>) {
    match result {
        Ok(output) => {
            println!("{output}");
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Read and merge every catalog file at `input_path`.
pub fn load_data(input_path: &Path) -> Result<CatalogData, String> {
    let files = read_catalog_files(input_path)?;

    if files.is_empty() {
        return Err(format!(
            "No catalog files (.yaml, .yml, .json) found at: {}",
            input_path.display()
        ));
    }

    let mut data = CatalogData::default();
    for file in files {
        tracing::debug!(path = %file.path, "merging catalog file");
        data.merge(file.data);
    }
    Ok(data)
}

/// Load, validate and index the catalog at `input_path`.
pub fn build_catalog(input_path: &Path) -> Result<Catalog, String> {
    let data = load_data(input_path)?;

    let result = validate(&data, &ValidateOptions::default());
    for w in &result.warnings {
        warn!(code = %w.code, subject = %w.subject, "{}", w.message);
    }
    if let Some(first) = result.errors.first() {
        return Err(format!(
            "Catalog has {} error(s), first: [{}] {}. Run `dexsearch check` for details.",
            result.errors.len(),
            first.code,
            first.message
        ));
    }

    Catalog::from_data(data).map_err(|e| format!("Invalid catalog: {e}"))
}

/// Search options with defaults taken from the project config, if any.
pub fn search_options(input_path: &Path, seed: Option<u64>, broadcast: bool) -> SearchOptions {
    let config = if input_path.is_dir() {
        read_project_config(input_path).unwrap_or_default()
    } else {
        Default::default()
    };
    let defaults = SearchOptions::default();

    SearchOptions {
        broadcast,
        preview_limit: preview_limit(config.preview_limit, defaults.preview_limit),
        sample_seed: seed.or(config.sample_seed),
    }
}

/// Configured preview size; values below 1 fall back to the default.
fn preview_limit(configured: Option<usize>, default: usize) -> usize {
    match configured {
        Some(0) => {
            warn!(default, "preview_limit must be at least 1, using the default");
            default
        }
        Some(limit) => limit,
        None => default,
    }
}
