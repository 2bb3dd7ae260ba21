pub mod check;
pub mod learn;
pub mod matchup;
pub mod search;
