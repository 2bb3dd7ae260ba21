use thiserror::Error;

use crate::types::Category;

/// Rejection of a search query. Messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("'{0}' could not be found in any of the search categories.")]
    UnrecognizedTerm(String),

    #[error("Specify only one ability.")]
    TooManyRequiredAbilities,

    #[error("Specify a maximum of 4 moves.")]
    TooManyRequiredMoves,

    #[error("Specify a maximum of two types.")]
    TooManyRequiredTypes,

    #[error("A search cannot both exclude and include the {category} '{value}'.")]
    ContradictoryConstraint { category: Category, value: String },

    #[error("No search parameters other than 'all' were found.")]
    NoConstraintsGiven,

    #[error("A search with the parameter 'all' cannot be broadcast.")]
    ShowAllBroadcast,

    #[error("'{0}' is not a known move.")]
    UnknownMove(String),

    #[error("Malformed catalog: the evolution chain of '{0}' loops back on itself.")]
    MalformedCatalog(String),
}

/// Structural problem found while indexing catalog data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("duplicate {table} id \"{id}\"")]
    DuplicateId { table: &'static str, id: String },

    #[error("species \"{species}\" has {field} \"{target}\" which is not in the catalog")]
    UnresolvedReference {
        species: String,
        field: &'static str,
        target: String,
    },
}

/// A prevo chain that loops back on itself, found while walking learnsets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("evolution chain of \"{0}\" is cyclic")]
pub struct CyclicAncestry(pub String);

/// Failure of a matchup or learnset lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Pokémon '{0}' not found.")]
    UnknownSpecies(String),

    #[error("Move '{0}' not found.")]
    UnknownMove(String),

    #[error("'{0}' isn't a recognized type, move or Pokémon.")]
    UnrecognizedMatchup(String),

    #[error("You must specify at least one move.")]
    NoMovesGiven,

    #[error("Malformed catalog: the evolution chain of '{0}' loops back on itself.")]
    MalformedCatalog(String),
}

impl From<CyclicAncestry> for SearchError {
    fn from(CyclicAncestry(id): CyclicAncestry) -> Self {
        SearchError::MalformedCatalog(id)
    }
}

impl From<CyclicAncestry> for LookupError {
    fn from(CyclicAncestry(id): CyclicAncestry) -> Self {
        LookupError::MalformedCatalog(id)
    }
}
