use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info_span};

use crate::catalog::Catalog;
use crate::constraints::build_constraints;
use crate::error::SearchError;
use crate::evaluator::evaluate;
use crate::types::{SearchOptions, SearchResult, Species};

pub const NO_RESULTS: &str = "No Pokémon found.";

/// Split a comma-separated query into trimmed, non-empty search tokens.
pub fn split_query(query: &str) -> Vec<String> {
    query
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Search the catalog with a list of raw tokens (`"water type"`, `"!uber"`, `"4"` ...).
///
/// Every token must be recognized and the tokens must not contradict each
/// other; the records matching all of them are returned sorted by name,
/// together with the text to show the user.
pub fn filter_catalog<'a, S: AsRef<str>>(
    catalog: &'a Catalog,
    tokens: &[S],
    options: &SearchOptions,
) -> Result<SearchResult<'a>, SearchError> {
    let _span = info_span!("dexsearch", tokens = tokens.len()).entered();

    let constraints = build_constraints(catalog, tokens, options.broadcast)?;
    let mut records = evaluate(catalog, &constraints)?;
    records.sort_by(|a, b| a.name.cmp(&b.name));
    debug!(results = records.len(), show_all = constraints.show_all, "search finished");

    let (display_text, truncated) = render(&records, constraints.show_all, options);
    Ok(SearchResult {
        records,
        display_text,
        truncated,
        show_all: constraints.show_all,
    })
}

/// Full sorted list when it is short or "all" was asked for; otherwise a
/// random sample with a count of what was left out.
fn render(records: &[&Species], show_all: bool, options: &SearchOptions) -> (String, bool) {
    if records.is_empty() {
        return (NO_RESULTS.to_string(), false);
    }

    let mut names: Vec<&str> = records.iter().map(|s| s.name.as_str()).collect();
    let limit = options.preview_limit.max(1);
    if show_all || names.len() <= limit {
        return (names.join(", "), false);
    }

    match options.sample_seed {
        Some(seed) => names.shuffle(&mut StdRng::seed_from_u64(seed)),
        None => names.shuffle(&mut rand::thread_rng()),
    }
    let hidden = names.len() - limit;
    let text = format!(
        "{}, and {} more. Redo the search with 'all' as a search parameter to show all results.",
        names[..limit].join(", "),
        hidden
    );
    (text, true)
}
