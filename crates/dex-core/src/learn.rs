//! Learnset checks: can a species learn a set of moves, and from where.

use regex::Regex;
use std::sync::LazyLock;

use tracing::warn;

use crate::catalog::{to_id, Catalog};
use crate::catalogs::{SKETCH, SKETCH_EXCLUDED, SOURCE_DETAIL_LIMIT};
use crate::error::LookupError;
use crate::types::*;

static RE_LEARN_SOURCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d)([LMTESDV])(.*)$").unwrap());

impl LearnSource {
    /// Parse a descriptor such as `6L32` (gen 6, level 32) or `5E` (gen 5 egg).
    pub fn parse(descriptor: &str) -> Option<Self> {
        let caps = RE_LEARN_SOURCE.captures(descriptor.trim())?;
        let gen = caps[1].parse().ok()?;
        let method = match &caps[2] {
            "L" => LearnMethod::LevelUp,
            "M" => LearnMethod::Machine,
            "T" => LearnMethod::Tutor,
            "E" => LearnMethod::Egg,
            "S" => LearnMethod::Event,
            "D" => LearnMethod::DreamWorld,
            "V" => LearnMethod::VirtualConsole,
            _ => return None,
        };
        Some(Self {
            gen,
            method,
            detail: caps[3].to_string(),
        })
    }

    fn level(&self) -> Option<u8> {
        match self.method {
            LearnMethod::LevelUp => self.detail.parse().ok(),
            _ => None,
        }
    }
}

/// How a species gets one move.
enum Acquisition {
    Unavailable,
    Sketch,
    Sources(Vec<LearnSource>),
}

fn acquire(
    catalog: &Catalog,
    species: &Species,
    move_id: &str,
    options: &LearnOptions,
) -> Result<Acquisition, LookupError> {
    let chain = catalog.learnset_ancestry(species)?;

    let mut sources = Vec::new();
    for stage in &chain {
        let Some(descriptors) = stage.own_learnset().and_then(|l| l.get(move_id)) else {
            continue;
        };
        for descriptor in descriptors {
            match LearnSource::parse(descriptor) {
                Some(source) => sources.push(source),
                None => warn!(species = %stage.id, descriptor = %descriptor, "unreadable learn source"),
            }
        }
    }
    if let Some(max_level) = options.max_level {
        sources.retain(|s| s.level().map_or(true, |level| level <= max_level));
    }
    if !sources.is_empty() {
        return Ok(Acquisition::Sources(sources));
    }

    let sketches = chain.last().is_some_and(|first_stage| {
        first_stage
            .own_learnset()
            .is_some_and(|l| l.contains_key(SKETCH))
    });
    if sketches && !SKETCH_EXCLUDED.contains(&move_id) {
        return Ok(Acquisition::Sketch);
    }
    Ok(Acquisition::Unavailable)
}

/// Check whether `species` can learn every move in `moves`.
///
/// Stops at the first move that cannot be learned. When a move is only
/// available through egg, event or dream world sources, those sources are
/// collected into the report.
pub fn check_learnset<S: AsRef<str>>(
    catalog: &Catalog,
    species: &str,
    moves: &[S],
    options: &LearnOptions,
) -> Result<LearnReport, LookupError> {
    let species = catalog
        .get_species(species)
        .ok_or_else(|| LookupError::UnknownSpecies(to_id(species)))?;
    if moves.is_empty() {
        return Err(LookupError::NoMovesGiven);
    }
    let moves = moves
        .iter()
        .map(|m| {
            catalog
                .get_move(m.as_ref())
                .ok_or_else(|| LookupError::UnknownMove(to_id(m.as_ref())))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut report = LearnReport {
        species: species.name.clone(),
        moves: moves.iter().map(|m| m.name.clone()).collect(),
        learnable: true,
        failed_move: None,
        restricted_sources: Vec::new(),
    };
    for mv in &moves {
        match acquire(catalog, species, &mv.id, options)? {
            Acquisition::Unavailable => {
                report.learnable = false;
                report.failed_move = Some(mv.name.clone());
                break;
            }
            Acquisition::Sketch => {}
            Acquisition::Sources(sources) => {
                if sources.iter().all(|s| s.method.is_restricted()) {
                    report.restricted_sources.extend(sources);
                }
            }
        }
    }
    report.restricted_sources.sort();
    report.restricted_sources.dedup();
    Ok(report)
}

impl LearnReport {
    pub fn display_text(&self, options: &LearnOptions) -> String {
        let subject = match (self.moves.len(), &self.failed_move) {
            (1, _) => self.moves[0].clone(),
            (_, Some(failed)) if !self.learnable => format!("these moves ({failed})"),
            _ => "these moves".to_string(),
        };
        if !self.learnable {
            return format!("{} can't learn {}", self.species, subject);
        }

        let mut text = format!("{} can learn {}", self.species, subject);
        if self.restricted_sources.is_empty() {
            return text;
        }
        text.push_str(" only when obtained from:");
        for line in group_sources(&self.restricted_sources, options.all_sources) {
            text.push_str("\n- ");
            text.push_str(&line);
        }
        text
    }
}

/// One line per (generation, method), e.g. `gen 4 event: 1, 2, 3, ...`.
fn group_sources(sources: &[LearnSource], all: bool) -> Vec<String> {
    let mut lines = Vec::new();
    let mut i = 0;
    while i < sources.len() {
        let head = &sources[i];
        let group: Vec<&LearnSource> = sources[i..]
            .iter()
            .take_while(|s| s.gen == head.gen && s.method == head.method)
            .collect();
        i += group.len();

        let mut line = format!("gen {} {}", head.gen, head.method.label());
        let details: Vec<&str> = group
            .iter()
            .map(|s| s.detail.as_str())
            .filter(|d| !d.is_empty())
            .collect();
        if !details.is_empty() {
            let shown = if all {
                details.len()
            } else {
                details.len().min(SOURCE_DETAIL_LIMIT)
            };
            line.push_str(": ");
            line.push_str(&details[..shown].join(", "));
            if shown < details.len() {
                line.push_str(", ...");
            }
        }
        lines.push(line);
    }
    lines
}
