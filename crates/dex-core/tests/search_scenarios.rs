use std::fs;
use std::path::{Path, PathBuf};

use dex_core::constraints::ConstraintSet;
use dex_core::evaluator::evaluate;
use dex_core::*;
use pretty_assertions::assert_eq;

/// Workspace root (two levels up from the dex-core manifest)
fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent() // crates/
        .unwrap()
        .parent() // workspace root
        .unwrap()
        .to_path_buf()
}

fn sample_catalog() -> Catalog {
    let dir = workspace_root().join("samples/data");
    let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|p| p.extension().is_some_and(|e| e == "yaml"))
        .collect();
    paths.sort();

    let mut data = CatalogData::default();
    for path in paths {
        let content = fs::read_to_string(&path).unwrap();
        data.merge(serde_yaml::from_str(&content).unwrap());
    }
    Catalog::from_data(data).unwrap()
}

/// Two records: Alpha (water, OU) and Beta (fire, UU).
fn two_record_catalog() -> Catalog {
    let content = fs::read_to_string(workspace_root().join("samples/scenario-a.json")).unwrap();
    let data: CatalogData = serde_json::from_str(&content).unwrap();
    Catalog::from_data(data).unwrap()
}

fn seeded() -> SearchOptions {
    SearchOptions {
        sample_seed: Some(7),
        ..Default::default()
    }
}

fn names(result: &SearchResult<'_>) -> Vec<String> {
    result.records.iter().map(|s| s.name.clone()).collect()
}

fn search(catalog: &Catalog, query: &str) -> Result<Vec<String>, SearchError> {
    filter_catalog(catalog, &split_query(query), &seeded()).map(|r| names(&r))
}

// ---------------------------------------------------------------------------
// Two-record scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_a_single_type() {
    let catalog = two_record_catalog();
    let result = filter_catalog(&catalog, &["water type"], &SearchOptions::default()).unwrap();
    assert_eq!(names(&result), vec!["Alpha"]);
    assert_eq!(result.display_text, "Alpha");
}

#[test]
fn scenario_b_exclusion_with_show_all() {
    let catalog = two_record_catalog();
    let result =
        filter_catalog(&catalog, &["!water type", "all"], &SearchOptions::default()).unwrap();
    assert_eq!(names(&result), vec!["Beta"]);
    assert!(result.show_all);
    assert!(!result.truncated);
}

#[test]
fn scenario_c_show_all_alone() {
    let catalog = two_record_catalog();
    assert_eq!(
        filter_catalog(&catalog, &["all"], &SearchOptions::default()),
        Err(SearchError::NoConstraintsGiven)
    );
}

#[test]
fn scenario_d_unrecognized_term() {
    let catalog = two_record_catalog();
    let err = filter_catalog(&catalog, &["blastoise"], &SearchOptions::default()).unwrap_err();
    assert_eq!(err, SearchError::UnrecognizedTerm("blastoise".into()));
    assert_eq!(
        err.to_string(),
        "'blastoise' could not be found in any of the search categories."
    );
}

#[test]
fn scenario_e_three_required_types() {
    let catalog = sample_catalog();
    assert_eq!(
        search(&catalog, "fire type, water type, ice type"),
        Err(SearchError::TooManyRequiredTypes)
    );
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn repeated_search_gives_identical_result() {
    let catalog = sample_catalog();
    let first = filter_catalog(&catalog, &["!ou"], &seeded()).unwrap();
    let second = filter_catalog(&catalog, &["!ou"], &seeded()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn four_moves_allowed_five_rejected() {
    let catalog = sample_catalog();
    assert_eq!(
        search(&catalog, "earthquake, flamethrower, fire blast, roost").unwrap(),
        vec!["Charizard", "Smeargle"]
    );
    assert_eq!(
        search(&catalog, "earthquake, flamethrower, fire blast, roost, air slash"),
        Err(SearchError::TooManyRequiredMoves)
    );
}

#[test]
fn include_and_exclude_of_same_value_contradict() {
    let catalog = sample_catalog();
    for query in ["ou, !ou", "!red, red", "levitate, !levitate", "4, !4", "surf, !surf"] {
        assert!(
            matches!(
                search(&catalog, query),
                Err(SearchError::ContradictoryConstraint { .. })
            ),
            "{query} should contradict"
        );
    }
}

#[test]
fn two_required_types_use_and() {
    let catalog = sample_catalog();
    // Charizard-Mega-Y also matches and folds into Charizard
    assert_eq!(search(&catalog, "fire type, flying type").unwrap(), vec!["Charizard"]);
    // Volcanion is fire/water but unreleased
    assert!(search(&catalog, "fire type, water type").unwrap().is_empty());
}

#[test]
fn little_cup_derived_from_evolution_line() {
    let catalog = sample_catalog();
    let lc = search(&catalog, "lc").unwrap();
    // Ferroseed is labelled RU, Scyther is banned
    assert_eq!(
        lc,
        vec!["Bulbasaur", "Charmander", "Ferroseed", "Gible", "Magikarp", "Squirtle"]
    );
    assert_eq!(
        search(&catalog, "lc, !water type").unwrap(),
        vec!["Bulbasaur", "Charmander", "Ferroseed", "Gible"]
    );
}

#[test]
fn unreleased_never_returned() {
    let catalog = sample_catalog();
    let everything = ConstraintSet {
        show_all: true,
        ..Default::default()
    };
    let records = evaluate(&catalog, &everything).unwrap();
    assert!(!records.iter().any(|s| s.tier == "Unreleased"));
    assert!(!records.iter().any(|s| s.tier == "Illegal"));
    assert!(!records.iter().any(|s| s.tier == "CAP"));
    assert!(records.iter().any(|s| s.name == "Bulbasaur"));
}

#[test]
fn cyclic_prevo_chain_fails_move_search() {
    let data: CatalogData = serde_json::from_str(
        r#"{
            "species": [
                { "name": "Alpha", "types": ["Water"], "tier": "OU", "gen": 1,
                  "prevo": "Beta", "learnset": { "tackle": ["6L1"] } },
                { "name": "Beta", "types": ["Fire"], "tier": "UU", "gen": 1,
                  "prevo": "Alpha", "learnset": { "ember": ["6L1"] } }
            ],
            "moves": [{ "name": "Surf", "type": "Water" }]
        }"#,
    )
    .unwrap();
    let catalog = Catalog::from_data(data).unwrap();

    let expected = Err(SearchError::MalformedCatalog("alpha".into()));
    assert_eq!(search(&catalog, "surf"), expected);
    assert_eq!(search(&catalog, "ou, !surf"), expected);
    // no move term, no ancestry walk
    assert_eq!(search(&catalog, "ou"), Ok(vec!["Alpha".to_string()]));
}

// ---------------------------------------------------------------------------
// Sample catalog searches
// ---------------------------------------------------------------------------

#[test]
fn tier_search_folds_alternate_formes() {
    let catalog = sample_catalog();
    assert_eq!(
        search(&catalog, "ou").unwrap(),
        vec![
            "Charizard",
            "Ferrothorn",
            "Garchomp",
            "Gyarados",
            "Rotom-Wash",
            "Scizor",
            "Venusaur"
        ]
    );
}

#[test]
fn mega_search_keeps_megas_only() {
    let catalog = sample_catalog();
    assert_eq!(
        search(&catalog, "mega").unwrap(),
        vec!["Charizard-Mega-X", "Charizard-Mega-Y", "Venusaur-Mega"]
    );
}

#[test]
fn ability_search() {
    let catalog = sample_catalog();
    assert_eq!(search(&catalog, "levitate").unwrap(), vec!["Rotom"]);
    assert_eq!(
        search(&catalog, "technician").unwrap(),
        vec!["Scizor", "Scyther", "Smeargle"]
    );
}

#[test]
fn move_search_walks_prevos_events_and_sketch() {
    let catalog = sample_catalog();
    assert_eq!(
        search(&catalog, "surf").unwrap(),
        vec!["Blastoise", "Pikachu", "Smeargle", "Squirtle", "Wartortle"]
    );
    assert_eq!(
        search(&catalog, "dragon pulse").unwrap(),
        vec!["Charizard", "Charmander", "Charmeleon", "Smeargle"]
    );
    assert!(search(&catalog, "chatter").unwrap().is_empty());
}

#[test]
fn generation_color_and_evolution_flags() {
    let catalog = sample_catalog();
    assert_eq!(
        search(&catalog, "4, !ou").unwrap(),
        vec!["Gabite", "Gible", "Rotom"]
    );
    assert_eq!(
        search(&catalog, "blue, nfe").unwrap(),
        vec!["Gabite", "Gible", "Squirtle", "Wartortle"]
    );
    assert_eq!(search(&catalog, "cap").unwrap(), vec!["Syclant"]);
}

#[test]
fn long_result_is_truncated() {
    let catalog = sample_catalog();
    let result = filter_catalog(&catalog, &["!ou"], &seeded()).unwrap();
    assert_eq!(result.records.len(), 15);
    assert!(result.truncated);
    assert!(result.display_text.ends_with(
        ", and 5 more. Redo the search with 'all' as a search parameter to show all results."
    ));

    let all = filter_catalog(&catalog, &["!ou", "all"], &seeded()).unwrap();
    assert!(!all.truncated);
    assert!(all.display_text.starts_with("Blastoise, Bulbasaur, "));
}

#[test]
fn empty_result_message() {
    let catalog = sample_catalog();
    let result = filter_catalog(&catalog, &["chatter"], &seeded()).unwrap();
    assert_eq!(result.display_text, NO_RESULTS);
}
