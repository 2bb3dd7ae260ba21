//! Type matchups: weakness summaries and attack effectiveness.

use regex::Regex;
use std::sync::LazyLock;

use crate::catalog::Catalog;
use crate::error::LookupError;
use crate::types::*;

static RE_TYPE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ ,/]+").unwrap());

/// Sum of weak (+1) and resist (-1) steps, and whether any defending type is immune.
fn modifier(catalog: &Catalog, attacking: &str, defending: &[String]) -> (i32, bool) {
    let mut steps = 0;
    let mut immune = false;
    for def in defending {
        match catalog.damage_taken(def, attacking) {
            Effect::Weak => steps += 1,
            Effect::Resist => steps -= 1,
            Effect::Immune => immune = true,
            Effect::Normal => {}
        }
    }
    (steps, immune)
}

/// Weaknesses, resistances and immunities of a species or of one or two types.
///
/// Species matchups ignore abilities. When only the first of two type names
/// is known the query is treated as a single type.
pub fn weakness(catalog: &Catalog, query: &str) -> Result<Matchups, LookupError> {
    let query = query.trim();
    let (subject, defending, is_species) = if let Some(species) = catalog.get_species(query) {
        (species.name.clone(), species.types.clone(), true)
    } else {
        let mut parts = RE_TYPE_SEPARATOR.split(query).filter(|p| !p.is_empty());
        let first = parts.next().and_then(|p| catalog.get_type(p));
        let second = parts.next().and_then(|p| catalog.get_type(p));
        match (first, second) {
            (Some(a), Some(b)) => (
                format!("{}/{}", a.name, b.name),
                vec![a.name.clone(), b.name.clone()],
                false,
            ),
            (Some(a), None) => (a.name.clone(), vec![a.name.clone()], false),
            _ => return Err(LookupError::UnrecognizedMatchup(query.to_string())),
        }
    };

    let mut matchups = Matchups {
        subject,
        is_species,
        weaknesses: Vec::new(),
        resistances: Vec::new(),
        immunities: Vec::new(),
    };
    for attacking in catalog.types() {
        let (steps, immune) = modifier(catalog, &attacking.name, &defending);
        if immune {
            matchups.immunities.push(attacking.name.clone());
            continue;
        }
        let entry = TypeMultiplier {
            type_name: attacking.name.clone(),
            multiplier: 2f64.powi(steps),
        };
        match steps {
            s if s > 0 => matchups.weaknesses.push(entry),
            s if s < 0 => matchups.resistances.push(entry),
            _ => {}
        }
    }
    Ok(matchups)
}

impl Matchups {
    pub fn display_text(&self) -> String {
        let header = if self.is_species {
            format!("{} (ignoring abilities):", self.subject)
        } else {
            format!("{}:", self.subject)
        };
        let list = |entries: &[TypeMultiplier], doubled: f64| {
            let names: Vec<String> = entries
                .iter()
                .map(|e| {
                    if e.multiplier == doubled {
                        format!("{} (x{})", e.type_name, e.multiplier)
                    } else {
                        e.type_name.clone()
                    }
                })
                .collect();
            or_none(names)
        };
        [
            header,
            format!("Weaknesses: {}", list(&self.weaknesses[..], 4.0)),
            format!("Resistances: {}", list(&self.resistances[..], 0.25)),
            format!("Immunities: {}", or_none(self.immunities.clone())),
        ]
        .join("\n")
    }
}

fn or_none(names: Vec<String>) -> String {
    if names.is_empty() {
        "None".to_string()
    } else {
        names.join(", ")
    }
}

enum Side<'a> {
    Type(&'a TypeData),
    Move(&'a MoveData),
    Species(&'a Species),
}

fn find_type<'a>(catalog: &'a Catalog, name: &str) -> Option<Side<'a>> {
    catalog.get_type(name).map(Side::Type)
}

fn find_move<'a>(catalog: &'a Catalog, name: &str) -> Option<Side<'a>> {
    catalog.get_move(name).map(Side::Move)
}

fn find_species<'a>(catalog: &'a Catalog, name: &str) -> Option<Side<'a>> {
    catalog.get_species(name).map(Side::Species)
}

/// Damage multiplier of an attacking type or move against a defending type
/// or species. The two arguments may be given in either order.
pub fn effectiveness(
    catalog: &Catalog,
    first: &str,
    second: &str,
) -> Result<Effectiveness, LookupError> {
    let unrecognized = |input: &str| LookupError::UnrecognizedMatchup(input.trim().to_string());

    let lead = find_type(catalog, first)
        .or_else(|| find_move(catalog, first))
        .or_else(|| find_species(catalog, first))
        .ok_or_else(|| unrecognized(first))?;

    let (attacker, defender) = match lead {
        Side::Species(_) => {
            let attacker = find_type(catalog, second)
                .or_else(|| find_move(catalog, second))
                .ok_or_else(|| unrecognized(second))?;
            (attacker, lead)
        }
        _ => {
            let defender = find_type(catalog, second)
                .or_else(|| find_species(catalog, second))
                .ok_or_else(|| unrecognized(second))?;
            (lead, defender)
        }
    };

    let (attacker_name, attacking_type, status_move) = match attacker {
        Side::Type(t) => (t.name.clone(), t.name.as_str(), false),
        Side::Move(m) => (
            m.name.clone(),
            m.move_type.as_str(),
            m.category == MoveCategory::Status,
        ),
        Side::Species(_) => return Err(unrecognized(first)),
    };
    let (defender_name, defending_types) = match defender {
        Side::Type(t) => (t.name.clone(), vec![t.name.clone()]),
        Side::Species(s) => (format!("{} (not counting abilities)", s.name), s.types.clone()),
        Side::Move(_) => return Err(unrecognized(second)),
    };

    let (steps, immune) = modifier(catalog, attacking_type, &defending_types);
    let factor = if immune {
        0.0
    } else if status_move {
        1.0
    } else {
        2f64.powi(steps)
    };

    Ok(Effectiveness {
        attacker: attacker_name,
        defender: defender_name,
        factor,
    })
}

impl Effectiveness {
    pub fn display_text(&self) -> String {
        format!(
            "{} is {}x effective against {}.",
            self.attacker, self.factor, self.defender
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::*;
    use pretty_assertions::assert_eq;

    fn catalog() -> Catalog {
        let mut gyarados = species("Gyarados", &["Water", "Flying"], "OU");
        gyarados.id = "gyarados".into();
        let mut thunder_wave = move_data("Thunder Wave", "Electric");
        thunder_wave.category = MoveCategory::Status;
        Catalog::from_data(CatalogData {
            species: vec![gyarados],
            moves: vec![move_data("Thunderbolt", "Electric"), thunder_wave],
            types: vec![
                type_data("Electric", &[("Ground", Effect::Weak), ("Electric", Effect::Resist)]),
                type_data(
                    "Water",
                    &[
                        ("Electric", Effect::Weak),
                        ("Grass", Effect::Weak),
                        ("Fire", Effect::Resist),
                        ("Water", Effect::Resist),
                    ],
                ),
                type_data(
                    "Flying",
                    &[
                        ("Electric", Effect::Weak),
                        ("Grass", Effect::Resist),
                        ("Ground", Effect::Immune),
                    ],
                ),
                type_data(
                    "Ground",
                    &[
                        ("Electric", Effect::Immune),
                        ("Water", Effect::Weak),
                        ("Grass", Effect::Weak),
                    ],
                ),
                type_data("Grass", &[("Water", Effect::Resist), ("Fire", Effect::Weak)]),
                type_data("Fire", &[("Water", Effect::Weak), ("Fire", Effect::Resist)]),
            ],
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn weakness_of_species() {
        let m = weakness(&catalog(), "gyarados").unwrap();
        assert!(m.is_species);
        assert_eq!(
            m.weaknesses,
            vec![TypeMultiplier {
                type_name: "Electric".into(),
                multiplier: 4.0
            }]
        );
        let resisted: Vec<&str> = m.resistances.iter().map(|r| r.type_name.as_str()).collect();
        assert_eq!(resisted, vec!["Water", "Fire"]);
        assert_eq!(m.immunities, vec!["Ground"]);
        // grass: weak on water, resisted by flying
        assert!(!m.weaknesses.iter().any(|w| w.type_name == "Grass"));
    }

    #[test]
    fn weakness_of_type_pair() {
        let m = weakness(&catalog(), "water/ground").unwrap();
        assert_eq!(m.subject, "Water/Ground");
        assert_eq!(m.immunities, vec!["Electric"]);
        assert_eq!(
            m.weaknesses,
            vec![TypeMultiplier {
                type_name: "Grass".into(),
                multiplier: 4.0
            }]
        );
    }

    #[test]
    fn weakness_unknown_query() {
        assert_eq!(
            weakness(&catalog(), "banana"),
            Err(LookupError::UnrecognizedMatchup("banana".into()))
        );
    }

    #[test]
    fn weakness_display() {
        let text = weakness(&catalog(), "gyarados").unwrap().display_text();
        assert_eq!(
            text,
            "Gyarados (ignoring abilities):\n\
             Weaknesses: Electric (x4)\n\
             Resistances: Water, Fire\n\
             Immunities: Ground"
        );
    }

    #[test]
    fn effectiveness_of_type_on_type() {
        let e = effectiveness(&catalog(), "electric", "water").unwrap();
        assert_eq!(e.factor, 2.0);
        assert_eq!(e.display_text(), "Electric is 2x effective against Water.");
    }

    #[test]
    fn effectiveness_of_move_on_species() {
        let e = effectiveness(&catalog(), "thunderbolt", "gyarados").unwrap();
        assert_eq!(e.factor, 4.0);
        assert_eq!(e.defender, "Gyarados (not counting abilities)");
    }

    #[test]
    fn effectiveness_accepts_reversed_order() {
        let e = effectiveness(&catalog(), "gyarados", "ground").unwrap();
        assert_eq!(e.attacker, "Ground");
        assert_eq!(e.factor, 0.0);
    }

    #[test]
    fn status_move_is_neutral_unless_immune() {
        let cat = catalog();
        assert_eq!(effectiveness(&cat, "thunder wave", "water").unwrap().factor, 1.0);
        assert_eq!(effectiveness(&cat, "thunder wave", "ground").unwrap().factor, 0.0);
    }

    #[test]
    fn resisted_attack() {
        let e = effectiveness(&catalog(), "fire", "water").unwrap();
        assert_eq!(e.display_text(), "Fire is 0.5x effective against Water.");
    }

    #[test]
    fn effectiveness_needs_both_sides() {
        assert_eq!(
            effectiveness(&catalog(), "electric", "thunderbolt"),
            Err(LookupError::UnrecognizedMatchup("thunderbolt".into()))
        );
    }
}
