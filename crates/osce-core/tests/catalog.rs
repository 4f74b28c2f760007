use osce_core::catalog::ScenarioCatalog;
use osce_core::error::CoreError;

#[test]
fn bundled_catalog_loads_all_stations() {
    let catalog = ScenarioCatalog::bundled().unwrap();
    assert_eq!(catalog.len(), 3);

    for id in ["chest_pain", "abdominal_pain", "back_pain"] {
        let scenario = catalog.lookup(id).unwrap();
        assert!(scenario.total_points() > 0);
        assert!(!scenario.viva_questions.is_empty());
    }
}

#[test]
fn back_pain_red_flags_are_weighted() {
    let catalog = ScenarioCatalog::bundled().unwrap();
    let scenario = catalog.lookup("back_pain").unwrap();
    assert_eq!(scenario.total_points(), 26);
}

#[test]
fn unknown_scenario_is_not_found() {
    let catalog = ScenarioCatalog::bundled().unwrap();
    let err = catalog.lookup("knee_pain").unwrap_err();
    assert!(matches!(err, CoreError::ScenarioNotFound(id) if id == "knee_pain"));
}

#[test]
fn unversioned_seed_is_migrated() {
    let json = r#"{
        "scenarios": [{
            "id": "chest_pain",
            "name": "Chest Pain Station",
            "patient_prompt": "You are Mr. Jones.",
            "rubric": [{"category": "Opening", "item": "Introduces themselves", "completed": false, "points": 1}]
        }]
    }"#;

    let catalog = ScenarioCatalog::from_json(json).unwrap();
    let scenario = catalog.lookup("chest_pain").unwrap();
    assert_eq!(scenario.persona, "You are Mr. Jones.");
    assert_eq!(scenario.specialty, "General");
    assert!(scenario.viva_questions.is_empty());
}

#[test]
fn newer_catalog_version_is_rejected() {
    let json = r#"{"catalog_version": 99, "scenarios": []}"#;
    let err = ScenarioCatalog::from_json(json).unwrap_err();
    assert!(matches!(err, CoreError::InvalidCatalog(_)));
}

#[test]
fn zero_point_item_is_rejected_at_load() {
    let json = r#"{
        "catalog_version": 1,
        "scenarios": [{
            "id": "broken",
            "name": "Broken",
            "specialty": "General",
            "persona": "p",
            "rubric": [{"category": "Opening", "item": "Introduces self", "points": 0}],
            "viva_questions": []
        }]
    }"#;
    let err = ScenarioCatalog::from_json(json).unwrap_err();
    assert!(matches!(err, CoreError::InvalidCatalog(msg) if msg.contains("zero points")));
}

#[test]
fn empty_rubric_is_rejected_at_load() {
    let json = r#"{
        "catalog_version": 1,
        "scenarios": [{
            "id": "empty",
            "name": "Empty",
            "specialty": "General",
            "persona": "p",
            "rubric": [],
            "viva_questions": []
        }]
    }"#;
    assert!(ScenarioCatalog::from_json(json).is_err());
}

#[test]
fn duplicate_item_names_are_rejected() {
    let json = r#"{
        "catalog_version": 1,
        "scenarios": [{
            "id": "dup",
            "name": "Dup",
            "specialty": "General",
            "persona": "p",
            "rubric": [
                {"category": "Opening", "item": "Introduces self", "points": 1},
                {"category": "Closing", "item": "Introduces self", "points": 1}
            ],
            "viva_questions": []
        }]
    }"#;
    assert!(ScenarioCatalog::from_json(json).is_err());
}

#[test]
fn catalog_survives_serialization() {
    let catalog = ScenarioCatalog::bundled().unwrap();
    let reloaded = ScenarioCatalog::from_json(&catalog.to_json().unwrap()).unwrap();
    assert_eq!(reloaded.summaries().len(), catalog.summaries().len());
}

#[test]
fn rubric_total_must_fit_u32() {
    let json = r#"{
        "catalog_version": 1,
        "scenarios": [{
            "id": "heavy",
            "name": "Heavy",
            "specialty": "General",
            "persona": "p",
            "rubric": [
                {"category": "Opening", "item": "Introduces self", "points": 4294967295},
                {"category": "Closing", "item": "Summarises", "points": 1}
            ],
            "viva_questions": []
        }]
    }"#;
    let err = ScenarioCatalog::from_json(json).unwrap_err();
    assert!(matches!(err, CoreError::InvalidCatalog(msg) if msg.contains("overflow")));
}

#[test]
fn large_weights_total_without_wrapping() {
    let json = r#"{
        "catalog_version": 1,
        "scenarios": [{
            "id": "heavy",
            "name": "Heavy",
            "specialty": "General",
            "persona": "p",
            "rubric": [
                {"category": "Opening", "item": "Introduces self", "points": 4000000000},
                {"category": "Closing", "item": "Summarises", "points": 200000000}
            ],
            "viva_questions": []
        }]
    }"#;
    let catalog = ScenarioCatalog::from_json(json).unwrap();
    assert_eq!(catalog.lookup("heavy").unwrap().total_points(), 4_200_000_000);
}

#[test]
fn malformed_catalog_version_is_rejected() {
    for version in ["4294967297", "-1", "\"1\"", "1.5"] {
        let json = format!(r#"{{"catalog_version": {version}, "scenarios": []}}"#);
        let err = ScenarioCatalog::from_json(&json).unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidCatalog(ref msg) if msg.contains("catalog_version")),
            "version {version}"
        );
    }
}
