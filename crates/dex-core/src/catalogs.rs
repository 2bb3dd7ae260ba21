use std::collections::HashSet;
use std::sync::LazyLock;

/// Tier labels accepted as search terms.
pub static SEARCH_TIERS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut s = HashSet::new();
    s.insert("uber");
    s.insert("ou");
    s.insert("bl");
    s.insert("uu");
    s.insert("bl2");
    s.insert("ru");
    s.insert("bl3");
    s.insert("nu");
    s.insert("lc");
    s.insert("cap");
    s
});

/// Color labels accepted as search terms.
pub static SEARCH_COLORS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut s = HashSet::new();
    s.insert("green");
    s.insert("red");
    s.insert("blue");
    s.insert("white");
    s.insert("brown");
    s.insert("yellow");
    s.insert("purple");
    s.insert("pink");
    s.insert("gray");
    s.insert("black");
    s
});

/// Highest generation a search term may name.
pub const MAX_GENERATION: u8 = 6;

/// Tiers that never show up in search results.
pub const HIDDEN_TIERS: &[&str] = &["unreleased", "illegal"];

/// Experimental tier, hidden unless explicitly searched for.
pub const EXPERIMENTAL_TIER: &str = "cap";

/// Tier whose membership is derived from the evolution line.
pub const LC_TIER: &str = "lc";

/// Learnset key granting every move.
pub const SKETCH: &str = "sketch";

/// Moves that sketch cannot copy.
pub const SKETCH_EXCLUDED: &[&str] = &["chatter", "struggle", "magikarpsrevenge"];

// Flag terms
pub const SHOW_ALL_TERM: &str = "all";
pub const MEGA_TERMS: &[&str] = &["mega", "megas"];
pub const FULLY_EVOLVED_TERMS: &[&str] = &["fe", "fullyevolved"];
pub const NOT_FULLY_EVOLVED_TERMS: &[&str] = &["nfe", "notfullyevolved"];

// Cardinality caps for required (non-excluded) constraints
pub const MAX_REQUIRED_ABILITIES: usize = 1;
pub const MAX_REQUIRED_MOVES: usize = 4;
pub const MAX_REQUIRED_TYPES: usize = 2;

/// Number of names shown before a result list is truncated.
pub const PREVIEW_LIMIT: usize = 10;

/// Detail entries listed per restricted learn source group.
pub const SOURCE_DETAIL_LIMIT: usize = 3;
