use std::collections::BTreeMap;

use oncoinsight::questionnaire::{
    QuestionKind, ResponseSet, load_builtin, load_catalog, load_questionnaire_json,
};
use oncoinsight::schema::v1::Label;

#[test]
fn builtin_has_one_schema_per_label() {
    let set = load_builtin().unwrap();
    assert_eq!(set.version, "v1");
    assert_eq!(set.schemas.len(), 2);
    let benign = set.select(Label::Benign).unwrap();
    let malignant = set.select(Label::Malignant).unwrap();
    assert!(benign.question("smoking").is_some());
    assert!(malignant.question("tumor_size").is_some());
    assert!(malignant.question("smoking").is_none());
}

#[test]
fn builtin_boolean_questions_are_yes_no() {
    let set = load_builtin().unwrap();
    for schema in &set.schemas {
        for q in schema.questions().filter(|q| q.kind == QuestionKind::Boolean) {
            assert_eq!(q.options, vec!["Yes".to_string(), "No".to_string()], "{}", q.id);
        }
    }
}

#[test]
fn duplicate_question_ids_rejected() {
    let json = r#"{
        "version": "t",
        "questionnaires": [{
            "label": "benign",
            "title": "T",
            "sections": [
                {"id": "a", "title": "A", "questions": [
                    {"id": "q", "prompt": "Q?", "kind": "select", "options": ["x", "y"]}
                ]},
                {"id": "b", "title": "B", "questions": [
                    {"id": "q", "prompt": "Q again?", "kind": "select", "options": ["x", "y"]}
                ]}
            ]
        }]
    }"#;
    let err = load_questionnaire_json(json, "test").unwrap_err();
    assert!(err.to_string().contains("duplicate question"));
}

#[test]
fn malformed_boolean_rejected() {
    let json = r#"{
        "version": "t",
        "questionnaires": [{
            "label": "benign",
            "title": "T",
            "sections": [{"id": "a", "title": "A", "questions": [
                {"id": "q", "prompt": "Q?", "kind": "boolean", "options": ["Y", "N"]}
            ]}]
        }]
    }"#;
    assert!(load_questionnaire_json(json, "test").is_err());
}

#[test]
fn duplicate_labels_rejected() {
    let schema = r#"{"label": "benign", "title": "T", "sections": [{"id": "a", "title": "A",
        "questions": [{"id": "q", "prompt": "Q?", "kind": "select", "options": ["x", "y"]}]}]}"#;
    let json = format!(
        r#"{{"version": "t", "questionnaires": [{}, {}]}}"#,
        schema, schema
    );
    assert!(load_questionnaire_json(&json, "test").is_err());
}

#[test]
fn user_overlay_replaces_by_label() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("q.json");
    std::fs::write(
        &path,
        r#"{"version": "custom", "questionnaires": [{"label": "benign", "title": "Short form",
            "sections": [{"id": "a", "title": "A", "questions": [
                {"id": "family_history", "prompt": "Family history?", "kind": "boolean", "options": ["Yes", "No"]}
            ]}]}]}"#,
    )
    .unwrap();
    let set = load_catalog(Some(&path)).unwrap();
    assert_eq!(set.version, "v1+user");
    assert_eq!(set.select(Label::Benign).unwrap().title, "Short form");
    assert!(set.select(Label::Malignant).unwrap().question("tumor_size").is_some());
}

#[test]
fn capture_fills_blanks_and_warns() {
    let set = load_builtin().unwrap();
    let schema = set.select(Label::Benign).unwrap();
    let mut raw = BTreeMap::new();
    raw.insert("family_history".to_string(), " Yes ".to_string());
    raw.insert("age_group".to_string(), "45".to_string());
    raw.insert("tumor_size".to_string(), "2-5 cm".to_string());

    let (responses, warnings) = ResponseSet::capture(schema, &raw);
    assert_eq!(responses.len(), schema.questions().count());
    assert_eq!(responses.get("family_history"), "Yes");
    assert_eq!(responses.get("smoking"), "");
    assert!(responses.iter().all(|(id, _)| id != "tumor_size"));
    assert!(warnings.iter().any(|w| w.contains("age_group")));
    assert!(warnings.iter().any(|w| w.contains("tumor_size")));
}
