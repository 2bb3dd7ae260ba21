use dex_core::types::*;
use pretty_assertions::assert_eq;

#[test]
fn species_json_keys() {
    let species = Species {
        id: "rotomwash".into(),
        name: "Rotom-Wash".into(),
        types: vec!["Electric".into(), "Water".into()],
        abilities: vec!["Levitate".into()],
        learnset: None,
        tier: "OU".into(),
        color: "Red".into(),
        gen: 4,
        prevo: None,
        evos: vec![],
        is_mega: false,
        base_species: Some("rotom".into()),
    };

    let json = serde_json::to_value(&species).unwrap();
    let obj = json.as_object().unwrap();

    assert!(obj.contains_key("name"));
    assert!(obj.contains_key("types"));
    assert!(obj.contains_key("is_mega"));
    assert_eq!(obj["base_species"], "rotom");

    // Optional fields are absent when empty
    assert!(!obj.contains_key("learnset"));
    assert!(!obj.contains_key("prevo"));
    assert!(!obj.contains_key("evos"));
}

#[test]
fn species_defaults_when_deserializing() {
    let species: Species =
        serde_json::from_str(r#"{"name":"Ditto","types":["Normal"],"tier":"PU","gen":1}"#)
            .unwrap();
    assert_eq!(species.id, "");
    assert!(species.abilities.is_empty());
    assert_eq!(species.learnset, None);
    assert!(!species.is_mega);
    assert_eq!(species.base_species, None);
}

#[test]
fn move_type_key_renamed() {
    let mv: MoveData =
        serde_json::from_str(r#"{"name":"Surf","type":"Water","category":"special"}"#).unwrap();
    assert_eq!(mv.move_type, "Water");
    assert_eq!(mv.category, MoveCategory::Special);
    assert_eq!(mv.base_power, 0);
    let json = serde_json::to_value(&mv).unwrap();
    assert_eq!(json["type"], "Water");
}

#[test]
fn type_chart_effects_lowercase() {
    let row: TypeData =
        serde_json::from_str(r#"{"name":"Ground","damage_taken":{"Electric":"immune","Water":"weak"}}"#)
            .unwrap();
    assert_eq!(row.damage_taken["Electric"], Effect::Immune);
    assert_eq!(
        serde_json::to_value(Effect::Resist).unwrap(),
        serde_json::json!("resist")
    );
}

#[test]
fn matchups_json_keys() {
    let matchups = Matchups {
        subject: "Gyarados".into(),
        is_species: true,
        weaknesses: vec![TypeMultiplier {
            type_name: "Electric".into(),
            multiplier: 4.0,
        }],
        resistances: vec![],
        immunities: vec!["Ground".into()],
    };
    let json = serde_json::to_value(&matchups).unwrap();
    assert_eq!(json["isSpecies"], true);
    assert_eq!(json["weaknesses"][0]["type"], "Electric");
    assert_eq!(json["weaknesses"][0]["multiplier"], 4.0);
}

#[test]
fn learn_report_json_keys() {
    let report = LearnReport {
        species: "Ivysaur".into(),
        moves: vec!["Petal Dance".into()],
        learnable: true,
        failed_move: None,
        restricted_sources: vec![LearnSource {
            gen: 5,
            method: LearnMethod::Egg,
            detail: String::new(),
        }],
    };
    let json = serde_json::to_value(&report).unwrap();
    let obj = json.as_object().unwrap();
    assert!(!obj.contains_key("failedMove"));
    assert_eq!(
        json["restrictedSources"],
        serde_json::json!([{ "gen": 5, "method": "egg" }])
    );
}

#[test]
fn diagnostic_severity_lowercase() {
    let d = Diagnostic {
        code: "DEX-W002".into(),
        severity: DiagnosticSeverity::Warning,
        subject: "scyther".into(),
        message: "LC banlist entry \"Scyther\" matches no species".into(),
    };
    let json = serde_json::to_value(&d).unwrap();
    assert_eq!(json["severity"], "warning");
    assert_eq!(json["code"], "DEX-W002");
}
