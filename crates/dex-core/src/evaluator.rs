use std::collections::HashSet;

use tracing::debug;

use crate::catalog::{to_id, Catalog};
use crate::catalogs::{EXPERIMENTAL_TIER, HIDDEN_TIERS, LC_TIER};
use crate::constraints::{ConstraintMap, ConstraintSet};
use crate::error::SearchError;
use crate::types::Species;

/// Apply a constraint set to every record of the catalog.
///
/// Records come back in catalog order, with alternate formes folded into
/// their base forme when both match.
pub fn evaluate<'a>(
    catalog: &'a Catalog,
    constraints: &ConstraintSet,
) -> Result<Vec<&'a Species>, SearchError> {
    for (move_id, _) in constraints.moves.iter() {
        if catalog.get_move(move_id).is_none() {
            return Err(SearchError::UnknownMove(move_id.clone()));
        }
    }

    let mut pool: Vec<&Species> = catalog
        .species()
        .iter()
        .filter(|s| is_eligible(s, constraints))
        .collect();
    debug!(eligible = pool.len(), "baseline filter applied");

    if !constraints.types.is_empty() {
        pool.retain(|s| matches_types(s, &constraints.types));
    }
    if !constraints.tiers.is_empty() {
        pool.retain(|s| matches_tier(catalog, s, &constraints.tiers));
    }
    if !constraints.colors.is_empty() {
        pool.retain(|s| constraints.colors.admits([&to_id(&s.color)]));
    }
    if !constraints.generations.is_empty() {
        pool.retain(|s| constraints.generations.admits([&s.gen]));
    }
    if !constraints.abilities.is_empty() {
        pool.retain(|s| matches_abilities(s, &constraints.abilities));
    }
    if !constraints.moves.is_empty() {
        let mut learners = Vec::with_capacity(pool.len());
        for s in pool {
            if matches_moves(catalog, s, &constraints.moves)? {
                learners.push(s);
            }
        }
        pool = learners;
    }
    debug!(matched = pool.len(), "category filters applied");

    Ok(collapse_formes(pool))
}

/// Baseline rules applied to every search: hidden tiers, the experimental
/// tier unless asked for, and the mega / fully-evolved flags.
fn is_eligible(species: &Species, constraints: &ConstraintSet) -> bool {
    let tier = to_id(&species.tier);
    if HIDDEN_TIERS.contains(&tier.as_str()) {
        return false;
    }
    if tier == EXPERIMENTAL_TIER
        && constraints.tiers.polarity(&EXPERIMENTAL_TIER.to_string()) != Some(true)
    {
        return false;
    }
    if let Some(mega) = constraints.mega {
        if species.is_mega != mega {
            return false;
        }
    }
    if let Some(fully_evolved) = constraints.fully_evolved {
        if species.has_further_evolution() == fully_evolved {
            return false;
        }
    }
    true
}

fn matches_types(species: &Species, types: &ConstraintMap<String>) -> bool {
    let tags: Vec<String> = species.types.iter().map(|t| to_id(t)).collect();
    let required: Vec<&String> = types.required().collect();
    if required.len() == 2 {
        return required.iter().all(|t| tags.contains(t));
    }
    types.admits(&tags)
}

/// Tier membership is the literal tier label, except that Little Cup is
/// judged by the evolution line whenever an `lc` term is present.
fn matches_tier(catalog: &Catalog, species: &Species, tiers: &ConstraintMap<String>) -> bool {
    let lc = LC_TIER.to_string();
    let literal = to_id(&species.tier);
    let mut memberships: Vec<String> = Vec::with_capacity(2);
    if tiers.polarity(&lc).is_some() {
        if literal != LC_TIER {
            memberships.push(literal);
        }
        if catalog.is_lc_eligible(species) {
            memberships.push(lc);
        }
    } else {
        memberships.push(literal);
    }
    tiers.admits(&memberships)
}

fn matches_abilities(species: &Species, abilities: &ConstraintMap<String>) -> bool {
    abilities.iter().all(|(ability, include)| {
        let has = species.abilities.iter().any(|a| to_id(a) == *ability);
        has == include
    })
}

fn matches_moves(
    catalog: &Catalog,
    species: &Species,
    moves: &ConstraintMap<String>,
) -> Result<bool, SearchError> {
    for (move_id, include) in moves.iter() {
        if catalog.can_learn(species, move_id)? != include {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Drop alternate formes whose base forme is also among the results.
fn collapse_formes<'a>(pool: Vec<&'a Species>) -> Vec<&'a Species> {
    let present: HashSet<&'a str> = pool.iter().map(|s| s.id.as_str()).collect();
    pool.into_iter()
        .filter(|s| !(s.is_alternate_forme() && present.contains(s.base_species_id())))
        .collect()
}
