use regex::Regex;
use std::sync::LazyLock;

use crate::catalog::{to_id, Catalog};
use crate::catalogs::*;
use crate::error::SearchError;

static RE_TYPE_TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+)\s+type$").unwrap());
static RE_GENERATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());

/// What a single search token asks for. Values are normalized ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Ability(String),
    Tier(String),
    Color(String),
    Generation(u8),
    ShowAll,
    Mega,
    FullyEvolved,
    Move(String),
    Type(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedTerm {
    pub term: Term,
    /// `false` when the token asks to exclude matches.
    pub include: bool,
}

type Classifier = fn(&str, &Catalog) -> Option<Term>;

/// Tried in order; the first classifier that recognizes a token wins.
const CLASSIFIERS: &[Classifier] = &[
    classify_ability,
    classify_tier,
    classify_color,
    classify_generation,
    classify_show_all,
    classify_mega,
    classify_evolution,
    classify_move,
    classify_type,
];

/// Split a raw token into its normalized text and whether it carried the `!` marker.
pub fn normalize_token(raw: &str) -> (String, bool) {
    let token = raw.trim().to_lowercase();
    match token.strip_prefix('!') {
        Some(rest) => (rest.trim_start().to_string(), true),
        None => (token, false),
    }
}

/// Classify a normalized token into exactly one search category.
pub fn classify(
    token: &str,
    is_exclusion: bool,
    catalog: &Catalog,
) -> Result<ClassifiedTerm, SearchError> {
    let term = CLASSIFIERS
        .iter()
        .find_map(|classifier| classifier(token, catalog))
        .ok_or_else(|| SearchError::UnrecognizedTerm(token.to_string()))?;

    // "nfe" is stored as an excluded fully-evolved term
    let negated = term == Term::FullyEvolved && NOT_FULLY_EVOLVED_TERMS.contains(&token);
    Ok(ClassifiedTerm {
        term,
        include: is_exclusion == negated,
    })
}

fn classify_ability(token: &str, catalog: &Catalog) -> Option<Term> {
    catalog
        .get_ability(token)
        .map(|ability| Term::Ability(ability.id.clone()))
}

fn classify_tier(token: &str, _catalog: &Catalog) -> Option<Term> {
    SEARCH_TIERS
        .contains(token)
        .then(|| Term::Tier(token.to_string()))
}

fn classify_color(token: &str, _catalog: &Catalog) -> Option<Term> {
    SEARCH_COLORS
        .contains(token)
        .then(|| Term::Color(token.to_string()))
}

fn classify_generation(token: &str, _catalog: &Catalog) -> Option<Term> {
    if !RE_GENERATION.is_match(token) {
        return None;
    }
    let gen: u8 = token.parse().ok()?;
    (0 < gen && gen < MAX_GENERATION + 1).then_some(Term::Generation(gen))
}

fn classify_show_all(token: &str, _catalog: &Catalog) -> Option<Term> {
    (token == SHOW_ALL_TERM).then_some(Term::ShowAll)
}

fn classify_mega(token: &str, _catalog: &Catalog) -> Option<Term> {
    MEGA_TERMS.contains(&token).then_some(Term::Mega)
}

fn classify_evolution(token: &str, _catalog: &Catalog) -> Option<Term> {
    (FULLY_EVOLVED_TERMS.contains(&token) || NOT_FULLY_EVOLVED_TERMS.contains(&token))
        .then_some(Term::FullyEvolved)
}

fn classify_move(token: &str, catalog: &Catalog) -> Option<Term> {
    catalog.get_move(token).map(|m| Term::Move(m.id.clone()))
}

fn classify_type(token: &str, catalog: &Catalog) -> Option<Term> {
    let caps = RE_TYPE_TERM.captures(token)?;
    catalog
        .get_type(&caps[1])
        .map(|t| Term::Type(to_id(&t.name)))
}
