use std::collections::{HashMap, HashSet};

use crate::catalogs::{SKETCH, SKETCH_EXCLUDED};
use crate::error::{CatalogError, CyclicAncestry};
use crate::types::*;

/// Normalize a display name or user input to an id: lowercase ASCII alphanumerics only.
pub fn to_id(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Immutable, indexed view over catalog data.
///
/// Built once and shared by reference; every lookup takes free-form input
/// and normalizes it with [`to_id`].
#[derive(Debug, Clone)]
pub struct Catalog {
    species: Vec<Species>,
    species_index: HashMap<String, usize>,
    moves: Vec<MoveData>,
    move_index: HashMap<String, usize>,
    abilities: Vec<AbilityData>,
    ability_index: HashMap<String, usize>,
    types: Vec<TypeData>,
    type_index: HashMap<String, usize>,
    /// Per defending type (aligned with `types`): attacking type id → effect.
    damage_taken: Vec<HashMap<String, Effect>>,
    lc_banlist: HashSet<String>,
}

impl Catalog {
    /// Index catalog data. Ids are filled in and normalized; references
    /// between species must resolve. Evolution cycles are not rejected here,
    /// they surface when a chain is walked.
    pub fn from_data(data: CatalogData) -> Result<Self, CatalogError> {
        let mut species = data.species;
        for s in &mut species {
            s.id = normalized_id(&s.id, &s.name);
            s.prevo = s.prevo.as_deref().map(to_id);
            s.evos = s.evos.iter().map(|e| to_id(e)).collect();
            s.base_species = s
                .base_species
                .as_deref()
                .map(to_id)
                .filter(|base| *base != s.id);
        }
        let species_index = build_index("species", species.iter().map(|s| s.id.as_str()))?;

        for s in &species {
            let links = s
                .prevo
                .iter()
                .map(|p| ("prevo", p))
                .chain(s.evos.iter().map(|e| ("evo", e)))
                .chain(s.base_species.iter().map(|b| ("base species", b)));
            for (field, target) in links {
                if !species_index.contains_key(target) {
                    return Err(CatalogError::UnresolvedReference {
                        species: s.id.clone(),
                        field,
                        target: target.clone(),
                    });
                }
            }
        }

        let mut moves = data.moves;
        for m in &mut moves {
            m.id = normalized_id(&m.id, &m.name);
        }
        let move_index = build_index("move", moves.iter().map(|m| m.id.as_str()))?;

        let mut abilities = data.abilities;
        for a in &mut abilities {
            a.id = normalized_id(&a.id, &a.name);
        }
        let ability_index = build_index("ability", abilities.iter().map(|a| a.id.as_str()))?;

        let types = data.types;
        let type_ids: Vec<String> = types.iter().map(|t| to_id(&t.name)).collect();
        let type_index = build_index("type", type_ids.iter().map(String::as_str))?;
        let damage_taken = types
            .iter()
            .map(|t| {
                t.damage_taken
                    .iter()
                    .map(|(attacker, effect)| (to_id(attacker), *effect))
                    .collect()
            })
            .collect();

        let lc_banlist = data.lc_banlist.iter().map(|name| to_id(name)).collect();

        Ok(Self {
            species,
            species_index,
            moves,
            move_index,
            abilities,
            ability_index,
            types,
            type_index,
            damage_taken,
            lc_banlist,
        })
    }

    pub fn species(&self) -> &[Species] {
        &self.species
    }

    pub fn types(&self) -> &[TypeData] {
        &self.types
    }

    pub fn get_species(&self, name: &str) -> Option<&Species> {
        self.species_index
            .get(&to_id(name))
            .map(|&i| &self.species[i])
    }

    pub fn get_move(&self, name: &str) -> Option<&MoveData> {
        self.move_index.get(&to_id(name)).map(|&i| &self.moves[i])
    }

    pub fn get_ability(&self, name: &str) -> Option<&AbilityData> {
        self.ability_index
            .get(&to_id(name))
            .map(|&i| &self.abilities[i])
    }

    pub fn get_type(&self, name: &str) -> Option<&TypeData> {
        self.type_index.get(&to_id(name)).map(|&i| &self.types[i])
    }

    /// Effect of an attacking type on a defending type. Unknown pairs are neutral.
    pub fn damage_taken(&self, defending: &str, attacking: &str) -> Effect {
        self.type_index
            .get(&to_id(defending))
            .and_then(|&i| self.damage_taken[i].get(&to_id(attacking)))
            .copied()
            .unwrap_or_default()
    }

    pub fn is_lc_banned(&self, species: &Species) -> bool {
        self.lc_banlist.contains(&species.id)
    }

    /// Little Cup eligibility: an unevolved first stage that is not banned.
    pub fn is_lc_eligible(&self, species: &Species) -> bool {
        !species.has_prior_form() && species.has_further_evolution() && !self.is_lc_banned(species)
    }

    pub fn base_species_of<'a>(&'a self, species: &'a Species) -> &'a Species {
        self.get_species(species.base_species_id())
            .unwrap_or(species)
    }

    /// Records whose learnsets apply to `species`, newest stage first.
    ///
    /// Starts at the species itself, or at its base forme when it has no
    /// learnset of its own, then follows `prevo` links for as long as the
    /// previous stage carries a learnset. Empty when no learnset applies.
    pub fn learnset_ancestry<'a>(
        &'a self,
        species: &'a Species,
    ) -> Result<Vec<&'a Species>, CyclicAncestry> {
        let holder = if species.own_learnset().is_some() {
            species
        } else {
            let base = self.base_species_of(species);
            if base.own_learnset().is_none() {
                return Ok(Vec::new());
            }
            base
        };

        let mut chain = vec![holder];
        let mut seen: HashSet<&str> = HashSet::from([holder.id.as_str()]);
        let mut current = holder;
        while let Some(prevo) = current.prevo.as_deref().and_then(|p| self.get_species(p)) {
            if prevo.own_learnset().is_none() {
                break;
            }
            if !seen.insert(prevo.id.as_str()) {
                return Err(CyclicAncestry(species.id.clone()));
            }
            chain.push(prevo);
            current = prevo;
        }
        Ok(chain)
    }

    /// Whether `species` can learn the move with id `move_id`, directly,
    /// through a previous stage, or through sketch.
    ///
    /// A record with no learnset on itself or its base species learns nothing,
    /// so a required-move search excludes it rather than skipping the check.
    pub fn can_learn(&self, species: &Species, move_id: &str) -> Result<bool, CyclicAncestry> {
        let chain = self.learnset_ancestry(species)?;
        let Some(last) = chain.last() else {
            return Ok(false);
        };

        let inherited = chain
            .iter()
            .filter_map(|s| s.own_learnset())
            .any(|learnset| learnset.contains_key(move_id));
        if inherited {
            return Ok(true);
        }

        Ok(last
            .own_learnset()
            .is_some_and(|learnset| learnset.contains_key(SKETCH))
            && !SKETCH_EXCLUDED.contains(&move_id))
    }
}

pub(crate) fn normalized_id(id: &str, name: &str) -> String {
    if id.is_empty() {
        to_id(name)
    } else {
        to_id(id)
    }
}

fn build_index<'a>(
    table: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<HashMap<String, usize>, CatalogError> {
    let mut index = HashMap::new();
    for (i, id) in ids.enumerate() {
        if index.insert(id.to_string(), i).is_some() {
            return Err(CatalogError::DuplicateId {
                table,
                id: id.to_string(),
            });
        }
    }
    Ok(index)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod fixtures {
    use std::collections::BTreeMap;

    use crate::types::*;

    pub fn species(name: &str, types: &[&str], tier: &str) -> Species {
        Species {
            id: String::new(),
            name: name.into(),
            types: types.iter().map(|t| t.to_string()).collect(),
            abilities: vec![],
            learnset: None,
            tier: tier.into(),
            color: "Red".into(),
            gen: 1,
            prevo: None,
            evos: vec![],
            is_mega: false,
            base_species: None,
        }
    }

    pub fn learnset(moves: &[&str]) -> Option<Learnset> {
        let map: BTreeMap<String, Vec<String>> = moves
            .iter()
            .map(|m| (m.to_string(), vec!["6L1".to_string()]))
            .collect();
        Some(map)
    }

    pub fn move_data(name: &str, move_type: &str) -> MoveData {
        MoveData {
            id: String::new(),
            name: name.into(),
            move_type: move_type.into(),
            category: MoveCategory::Special,
            base_power: 90,
        }
    }

    pub fn type_data(name: &str, damage_taken: &[(&str, Effect)]) -> TypeData {
        TypeData {
            name: name.into(),
            damage_taken: damage_taken
                .iter()
                .map(|(t, e)| (t.to_string(), *e))
                .collect(),
        }
    }
}
