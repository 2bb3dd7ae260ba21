use std::collections::BTreeMap;

use crate::catalog::Catalog;
use crate::catalogs::*;
use crate::error::SearchError;
use crate::term::{classify, normalize_token, ClassifiedTerm, Term};
use crate::types::Category;

/// Include/exclude requirements for the values of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintMap<K: Ord> {
    entries: BTreeMap<K, bool>,
}

impl<K: Ord> Default for ConstraintMap<K> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Clone + ToString> ConstraintMap<K> {
    /// Record `value` with the given polarity. `limit` caps the number of
    /// included values and names the error raised past it.
    fn insert(
        &mut self,
        category: Category,
        value: K,
        include: bool,
        limit: Option<(usize, SearchError)>,
    ) -> Result<(), SearchError> {
        match self.entries.get(&value) {
            Some(&existing) if existing == include => return Ok(()),
            Some(_) => {
                return Err(SearchError::ContradictoryConstraint {
                    category,
                    value: value.to_string(),
                })
            }
            None => {}
        }
        if include {
            if let Some((max, err)) = limit {
                if self.required_count() >= max {
                    return Err(err);
                }
            }
        }
        self.entries.insert(value, include);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `Some(true)` if required, `Some(false)` if excluded, `None` if absent.
    pub fn polarity(&self, value: &K) -> Option<bool> {
        self.entries.get(value).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, bool)> {
        self.entries.iter().map(|(k, &v)| (k, v))
    }

    pub fn required(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().filter(|(_, &v)| v).map(|(k, _)| k)
    }

    pub fn required_count(&self) -> usize {
        self.required().count()
    }

    /// Standard membership test: reject when any of `values` is excluded,
    /// or when something is required and none of `values` is.
    pub fn admits<'a>(&self, values: impl IntoIterator<Item = &'a K>) -> bool
    where
        K: 'a,
    {
        let mut any_required = false;
        for value in values {
            match self.polarity(value) {
                Some(false) => return false,
                Some(true) => any_required = true,
                None => {}
            }
        }
        any_required || self.required_count() == 0
    }
}

/// Every requirement of one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    pub types: ConstraintMap<String>,
    pub tiers: ConstraintMap<String>,
    pub colors: ConstraintMap<String>,
    pub generations: ConstraintMap<u8>,
    pub abilities: ConstraintMap<String>,
    pub moves: ConstraintMap<String>,
    pub mega: Option<bool>,
    pub fully_evolved: Option<bool>,
    pub show_all: bool,
}

impl ConstraintSet {
    /// Whether any attribute category (not counting the mega/fe flags) is constrained.
    pub fn has_category_constraints(&self) -> bool {
        !(self.types.is_empty()
            && self.tiers.is_empty()
            && self.colors.is_empty()
            && self.generations.is_empty()
            && self.abilities.is_empty()
            && self.moves.is_empty())
    }

    pub fn has_flags(&self) -> bool {
        self.mega.is_some() || self.fully_evolved.is_some()
    }
}

/// Folds classified terms into a [`ConstraintSet`], rejecting
/// over-specified or contradictory input at the step that introduces it.
#[derive(Debug, Clone, Default)]
pub struct ConstraintBuilder {
    set: ConstraintSet,
    broadcast: bool,
    terms: usize,
}

impl ConstraintBuilder {
    pub fn new(broadcast: bool) -> Self {
        Self {
            broadcast,
            ..Default::default()
        }
    }

    pub fn add(mut self, classified: ClassifiedTerm) -> Result<Self, SearchError> {
        let ClassifiedTerm { term, include } = classified;
        let set = &mut self.set;
        match term {
            Term::Ability(id) => set.abilities.insert(
                Category::Ability,
                id,
                include,
                Some((MAX_REQUIRED_ABILITIES, SearchError::TooManyRequiredAbilities)),
            )?,
            Term::Tier(tier) => set.tiers.insert(Category::Tier, tier, include, None)?,
            Term::Color(color) => set.colors.insert(Category::Color, color, include, None)?,
            Term::Generation(gen) => {
                set.generations
                    .insert(Category::Generation, gen, include, None)?
            }
            Term::ShowAll => {
                if self.broadcast {
                    return Err(SearchError::ShowAllBroadcast);
                }
                set.show_all = true;
            }
            Term::Mega => set_flag(&mut set.mega, Category::Mega, MEGA_TERMS[0], include)?,
            Term::FullyEvolved => set_flag(
                &mut set.fully_evolved,
                Category::FullyEvolved,
                FULLY_EVOLVED_TERMS[0],
                include,
            )?,
            Term::Move(id) => set.moves.insert(
                Category::Move,
                id,
                include,
                Some((MAX_REQUIRED_MOVES, SearchError::TooManyRequiredMoves)),
            )?,
            Term::Type(id) => set.types.insert(
                Category::Type,
                id,
                include,
                Some((MAX_REQUIRED_TYPES, SearchError::TooManyRequiredTypes)),
            )?,
        }
        self.terms += 1;
        Ok(self)
    }

    /// Finish the fold. A search must narrow something beyond "all".
    pub fn finish(self) -> Result<ConstraintSet, SearchError> {
        let set = self.set;
        if self.terms == 0 || (!set.has_category_constraints() && !set.has_flags()) {
            return Err(SearchError::NoConstraintsGiven);
        }
        Ok(set)
    }
}

fn set_flag(
    flag: &mut Option<bool>,
    category: Category,
    name: &str,
    include: bool,
) -> Result<(), SearchError> {
    match *flag {
        Some(existing) if existing != include => Err(SearchError::ContradictoryConstraint {
            category,
            value: name.to_string(),
        }),
        _ => {
            *flag = Some(include);
            Ok(())
        }
    }
}

/// Classify raw tokens and fold them into a constraint set. Blank tokens
/// are skipped; the first failing token aborts the whole search.
pub fn build_constraints<S: AsRef<str>>(
    catalog: &Catalog,
    tokens: &[S],
    broadcast: bool,
) -> Result<ConstraintSet, SearchError> {
    tokens
        .iter()
        .map(|raw| normalize_token(raw.as_ref()))
        .filter(|(token, _)| !token.is_empty())
        .try_fold(ConstraintBuilder::new(broadcast), |builder, (token, excluded)| {
            builder.add(classify(&token, excluded, catalog)?)
        })?
        .finish()
}
