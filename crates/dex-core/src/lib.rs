pub mod catalog;
pub mod catalogs;
pub mod constraints;
pub mod error;
pub mod evaluator;
pub mod learn;
pub mod matchup;
pub mod search;
pub mod term;
pub mod types;
pub mod validator;

pub use catalog::{to_id, Catalog};
pub use constraints::build_constraints;
pub use error::{CatalogError, CyclicAncestry, LookupError, SearchError};
pub use learn::check_learnset;
pub use matchup::{effectiveness, weakness};
pub use search::{filter_catalog, split_query, NO_RESULTS};
pub use types::*;
pub use validator::validate;
