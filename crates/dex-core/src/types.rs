use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::catalogs::PREVIEW_LIMIT;

// ---------------------------------------------------------------------------
// Catalog input (deserialized from JSON / YAML data files)
// ---------------------------------------------------------------------------

/// Raw catalog tables as read from one or more data files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub species: Vec<Species>,
    #[serde(default)]
    pub moves: Vec<MoveData>,
    #[serde(default)]
    pub abilities: Vec<AbilityData>,
    #[serde(default)]
    pub types: Vec<TypeData>,
    #[serde(default)]
    pub lc_banlist: Vec<String>,
}

impl CatalogData {
    /// Append every table of `other` to this one.
    pub fn merge(&mut self, other: CatalogData) {
        self.species.extend(other.species);
        self.moves.extend(other.moves);
        self.abilities.extend(other.abilities);
        self.types.extend(other.types);
        self.lc_banlist.extend(other.lc_banlist);
    }
}

/// Learn-method descriptors keyed by move id.
pub type Learnset = BTreeMap<String, Vec<String>>;

/// One catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    /// Unique key. Derived from `name` when left empty.
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub types: Vec<String>,
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learnset: Option<Learnset>,
    pub tier: String,
    #[serde(default)]
    pub color: String,
    pub gen: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prevo: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evos: Vec<String>,
    #[serde(default)]
    pub is_mega: bool,
    /// Base forme this record is an alternate of. `None` means the record is its own base.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_species: Option<String>,
}

impl Species {
    pub fn has_prior_form(&self) -> bool {
        self.prevo.is_some()
    }

    pub fn has_further_evolution(&self) -> bool {
        !self.evos.is_empty()
    }

    pub fn base_species_id(&self) -> &str {
        self.base_species.as_deref().unwrap_or(&self.id)
    }

    pub fn is_alternate_forme(&self) -> bool {
        self.base_species_id() != self.id
    }

    /// The record's own learnset, if it has a non-empty one.
    pub fn own_learnset(&self) -> Option<&Learnset> {
        self.learnset.as_ref().filter(|l| !l.is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    #[default]
    Physical,
    Special,
    Status,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: String,
    #[serde(default)]
    pub category: MoveCategory,
    #[serde(default)]
    pub base_power: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityData {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// How an attacking type fares against a defending type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    #[default]
    Normal,
    Weak,
    Resist,
    Immune,
}

/// One row of the type chart, seen from the defending side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeData {
    pub name: String,
    /// Attacking type name → effect on this type. Missing entries are `normal`.
    #[serde(default)]
    pub damage_taken: BTreeMap<String, Effect>,
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Attribute a search constraint applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Type,
    Tier,
    Color,
    Generation,
    Ability,
    Move,
    Mega,
    FullyEvolved,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Type => "type",
            Category::Tier => "tier",
            Category::Color => "color",
            Category::Generation => "generation",
            Category::Ability => "ability",
            Category::Move => "move",
            Category::Mega => "Mega Evolutions",
            Category::FullyEvolved => "fully evolved Pokémon",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// The reply goes to the whole room rather than the requesting user.
    pub broadcast: bool,
    pub preview_limit: usize,
    /// Seed for the truncated preview order. `None` draws a fresh order each call.
    pub sample_seed: Option<u64>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            broadcast: false,
            preview_limit: PREVIEW_LIMIT,
            sample_seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<'a> {
    /// Every matching record, sorted by name.
    pub records: Vec<&'a Species>,
    pub display_text: String,
    pub truncated: bool,
    pub show_all: bool,
}

// ---------------------------------------------------------------------------
// Type matchups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeMultiplier {
    #[serde(rename = "type")]
    pub type_name: String,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matchups {
    pub subject: String,
    #[serde(rename = "isSpecies")]
    pub is_species: bool,
    pub weaknesses: Vec<TypeMultiplier>,
    pub resistances: Vec<TypeMultiplier>,
    pub immunities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effectiveness {
    pub attacker: String,
    pub defender: String,
    pub factor: f64,
}

// ---------------------------------------------------------------------------
// Learnsets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct LearnOptions {
    /// Ignore level-up sources above this level.
    pub max_level: Option<u8>,
    /// List every detail of restricted sources instead of the first few.
    pub all_sources: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearnMethod {
    LevelUp,
    Machine,
    Tutor,
    Egg,
    Event,
    DreamWorld,
    VirtualConsole,
}

impl LearnMethod {
    /// Egg, event and dream world moves depend on how the creature was obtained.
    pub fn is_restricted(self) -> bool {
        matches!(
            self,
            LearnMethod::Egg | LearnMethod::Event | LearnMethod::DreamWorld
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            LearnMethod::LevelUp => "level up",
            LearnMethod::Machine => "TM/HM",
            LearnMethod::Tutor => "tutor",
            LearnMethod::Egg => "egg",
            LearnMethod::Event => "event",
            LearnMethod::DreamWorld => "dream world",
            LearnMethod::VirtualConsole => "virtual console",
        }
    }
}

/// Parsed learn-method descriptor, e.g. `5E` or `6L32`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LearnSource {
    pub gen: u8,
    pub method: LearnMethod,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnReport {
    pub species: String,
    pub moves: Vec<String>,
    pub learnable: bool,
    /// First move that could not be learned.
    #[serde(rename = "failedMove", skip_serializing_if = "Option::is_none")]
    pub failed_move: Option<String>,
    /// Sources the creature must come from, when only restricted ones apply.
    #[serde(rename = "restrictedSources")]
    pub restricted_sources: Vec<LearnSource>,
}

// ---------------------------------------------------------------------------
// Catalog diagnostics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: String,
    pub severity: DiagnosticSeverity,
    /// Id of the record the diagnostic is about.
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    /// Also check learnset contents.
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateResult {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}
