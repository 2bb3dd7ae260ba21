use std::collections::{HashMap, HashSet};

use crate::catalog::{normalized_id, to_id};
use crate::catalogs::{MAX_GENERATION, SKETCH};
use crate::types::*;

/// Check raw catalog data for structural errors and suspicious entries.
///
/// Unlike [`Catalog::from_data`](crate::Catalog::from_data), which stops at
/// the first problem, this reports everything it finds.
pub fn validate(data: &CatalogData, options: &ValidateOptions) -> ValidateResult {
    let mut errors: Vec<Diagnostic> = Vec::new();
    let mut warnings: Vec<Diagnostic> = Vec::new();

    let species_ids: Vec<String> = data
        .species
        .iter()
        .map(|s| normalized_id(&s.id, &s.name))
        .collect();

    // DEX-E001: duplicate species id
    let mut seen: HashSet<&str> = HashSet::new();
    for id in &species_ids {
        if !seen.insert(id) {
            errors.push(error("DEX-E001", id, format!("Duplicate species id \"{id}\"")));
        }
    }
    let by_id: HashMap<&str, &Species> = species_ids
        .iter()
        .map(String::as_str)
        .zip(data.species.iter())
        .collect();

    // DEX-E009: duplicate move / ability / type id
    check_table_ids(
        "move",
        data.moves.iter().map(|m| normalized_id(&m.id, &m.name)),
        &mut errors,
    );
    check_table_ids(
        "ability",
        data.abilities.iter().map(|a| normalized_id(&a.id, &a.name)),
        &mut errors,
    );
    check_table_ids("type", data.types.iter().map(|t| to_id(&t.name)), &mut errors);

    let type_ids: HashSet<String> = data.types.iter().map(|t| to_id(&t.name)).collect();
    let move_ids: HashSet<String> = data
        .moves
        .iter()
        .map(|m| normalized_id(&m.id, &m.name))
        .collect();

    for (id, species) in species_ids.iter().zip(&data.species) {
        // DEX-E002 / E003 / E004: dangling references
        if let Some(base) = &species.base_species {
            if !by_id.contains_key(to_id(base).as_str()) {
                errors.push(error(
                    "DEX-E002",
                    id,
                    format!("Species \"{id}\" has base species \"{base}\" which is not defined"),
                ));
            }
        }
        if let Some(prevo) = &species.prevo {
            if !by_id.contains_key(to_id(prevo).as_str()) {
                errors.push(error(
                    "DEX-E003",
                    id,
                    format!("Species \"{id}\" has prevo \"{prevo}\" which is not defined"),
                ));
            }
        }
        for evo in &species.evos {
            match by_id.get(to_id(evo).as_str()) {
                None => errors.push(error(
                    "DEX-E004",
                    id,
                    format!("Species \"{id}\" has evo \"{evo}\" which is not defined"),
                )),
                // DEX-W001: evo link not mirrored
                Some(target) if target.prevo.as_deref().map(to_id).as_ref() != Some(id) => {
                    warnings.push(warning(
                        "DEX-W001",
                        id,
                        format!("Species \"{id}\" lists evo \"{evo}\" whose prevo is not \"{id}\""),
                    ))
                }
                Some(_) => {}
            }
        }

        // DEX-E006: unknown type tag (only when a type chart is present)
        if !type_ids.is_empty() {
            for t in &species.types {
                if !type_ids.contains(&to_id(t)) {
                    errors.push(error(
                        "DEX-E006",
                        id,
                        format!("Species \"{id}\" has unknown type \"{t}\""),
                    ));
                }
            }
        }

        // DEX-E007: type count
        if !(1..=2).contains(&species.types.len()) {
            errors.push(error(
                "DEX-E007",
                id,
                format!(
                    "Species \"{id}\" has {} types, expected one or two",
                    species.types.len()
                ),
            ));
        }

        // DEX-E008: generation range
        if !(1..=MAX_GENERATION).contains(&species.gen) {
            errors.push(error(
                "DEX-E008",
                id,
                format!(
                    "Species \"{id}\" has generation {} outside 1..={MAX_GENERATION}",
                    species.gen
                ),
            ));
        }

        if options.strict {
            if let Some(learnset) = &species.learnset {
                check_learnset_entries(id, learnset, &move_ids, &mut warnings);
            }
        }
    }

    // DEX-E005: cyclic prevo chain
    for id in &species_ids {
        if let Some(cycle_member) = find_prevo_cycle(id, &by_id) {
            if cycle_member == *id {
                errors.push(error(
                    "DEX-E005",
                    id,
                    format!("Prevo chain of \"{id}\" loops back on itself"),
                ));
            }
        }
    }

    // DEX-W002: LC banlist entry matching no species
    for name in &data.lc_banlist {
        let id = to_id(name);
        if !by_id.contains_key(id.as_str()) {
            warnings.push(warning(
                "DEX-W002",
                &id,
                format!("LC banlist entry \"{name}\" matches no species"),
            ));
        }
    }

    ValidateResult { errors, warnings }
}

fn error(code: &str, subject: &str, message: String) -> Diagnostic {
    Diagnostic {
        code: code.into(),
        severity: DiagnosticSeverity::Error,
        subject: subject.into(),
        message,
    }
}

fn warning(code: &str, subject: &str, message: String) -> Diagnostic {
    Diagnostic {
        code: code.into(),
        severity: DiagnosticSeverity::Warning,
        subject: subject.into(),
        message,
    }
}

fn check_table_ids(
    table: &str,
    ids: impl Iterator<Item = String>,
    errors: &mut Vec<Diagnostic>,
) {
    let mut seen: HashSet<String> = HashSet::new();
    for id in ids {
        if seen.contains(&id) {
            errors.push(error(
                "DEX-E009",
                &id,
                format!("Duplicate {table} id \"{id}\""),
            ));
        }
        seen.insert(id);
    }
}

/// Walk prevo links from `start`. Returns the first id visited twice, if any.
fn find_prevo_cycle(start: &str, by_id: &HashMap<&str, &Species>) -> Option<String> {
    let mut visited: HashSet<String> = HashSet::new();
    let mut current = start.to_string();
    loop {
        if !visited.insert(current.clone()) {
            return Some(current);
        }
        let prevo = by_id.get(current.as_str())?.prevo.as_deref()?;
        current = to_id(prevo);
    }
}

// DEX-W003 / W004: strict learnset checks
fn check_learnset_entries(
    id: &str,
    learnset: &Learnset,
    move_ids: &HashSet<String>,
    warnings: &mut Vec<Diagnostic>,
) {
    for (move_id, sources) in learnset {
        if move_id != SKETCH && !move_ids.contains(&to_id(move_id)) {
            warnings.push(warning(
                "DEX-W003",
                id,
                format!("Learnset of \"{id}\" names unknown move \"{move_id}\""),
            ));
        }
        for source in sources {
            if LearnSource::parse(source).is_none() {
                warnings.push(warning(
                    "DEX-W004",
                    id,
                    format!("Learnset of \"{id}\" has unreadable source \"{source}\" for \"{move_id}\""),
                ));
            }
        }
    }
}
