use oncoinsight::questionnaire::ResponseSet;
use oncoinsight::survival::{FeatureMapper, STAGE_FEATURE, TUMOR_STAGE_FEATURE};

fn mapper() -> FeatureMapper {
    FeatureMapper::builtin().unwrap()
}

#[test]
fn builtin_defines_twenty_six_features() {
    let m = mapper();
    assert_eq!(m.rules().len(), 26);
    assert!(m.features().any(|f| f == "Body Mass Index (BMI) (if known):"));
    assert!(m.features().any(|f| f == "Ethnicity"));
}

#[test]
fn empty_responses_map_to_defaults() {
    let m = mapper();
    let features = m.map(&ResponseSet::new());
    assert_eq!(features.len(), 26);
    assert_eq!(features.get("Age (in years): "), Some("40-49"));
    assert_eq!(features.get(STAGE_FEATURE), Some("Stage II"));
    assert_eq!(features.get("Lymph Node Status: "), Some("Unknown"));
    assert_eq!(features.get("Do you smoke? "), Some("No"));
    assert_eq!(
        features.get("Physical Activity Level: "),
        Some("Moderately active (moderate exercise/sports 3-5 days/week)")
    );
}

#[test]
fn not_sure_answers_use_table_entries() {
    let m = mapper();
    let responses = ResponseSet::from_pairs([
        ("cancer_stage", "Not sure"),
        ("tumor_size", "Not sure"),
        ("lymph_node_status", "Not sure"),
        ("er_status", "Not sure"),
        ("treatment_types", "Not started treatment yet"),
        ("bmi_category", "Not sure"),
    ]);
    let f = m.map(&responses);
    assert_eq!(f.get(STAGE_FEATURE), Some("Stage II"));
    assert_eq!(f.get("Tumor Size: "), Some("2-5 cm"));
    assert_eq!(f.get("Lymph Node Status: "), Some("Unknown"));
    assert_eq!(f.get("Estrogen Receptor (ER) Status: "), Some("Unknown"));
    assert_eq!(
        f.get("Type of Treatment Received (check all that apply): "),
        Some("None")
    );
    assert_eq!(
        f.get("Body Mass Index (BMI) (if known):"),
        Some("18.5-24.9 (Normal weight)")
    );
}

#[test]
fn stage_and_tumor_stage_agree() {
    let m = mapper();
    for answer in ["Stage I", "Stage II", "Stage III", "Stage IV", "Not sure", "", "garbage"] {
        let f = m.map(&ResponseSet::from_pairs([("cancer_stage", answer)]));
        assert_eq!(f.get(STAGE_FEATURE), f.get(TUMOR_STAGE_FEATURE), "{answer}");
    }
}

#[test]
fn outputs_stay_within_vocabulary() {
    let m = mapper();
    let answers = ["", "Yes", "No", "Not sure", "Stage IV", "2-5 cm", "Hausa", "unexpected"];
    for rule in m.rules() {
        let vocab = m.vocabulary(&rule.feature).unwrap();
        for answer in answers {
            let f = m.map(&ResponseSet::from_pairs([(rule.source.as_str(), answer)]));
            let value = f.get(&rule.feature).unwrap();
            assert!(vocab.contains(value), "{} -> {}", rule.feature, value);
        }
    }
}

#[test]
fn overlay_replaces_feature_by_name() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("map.json");
    std::fs::write(
        &path,
        r#"{"version": "site", "features": [
            {"feature": "Ethnicity", "source": "ethnicity", "default": "Other",
             "values": {"Hausa": "Northern"}}
        ]}"#,
    )
    .unwrap();
    let m = FeatureMapper::load(Some(&path)).unwrap();
    assert_eq!(m.version(), "v1+site");
    assert_eq!(m.rules().len(), 26);
    let f = m.map(&ResponseSet::from_pairs([("ethnicity", "Hausa")]));
    assert_eq!(f.get("Ethnicity"), Some("Northern"));
}

#[test]
fn duplicate_features_rejected() {
    let json = r#"{"version": "x", "features": [
        {"feature": "A", "source": "a", "default": "d"},
        {"feature": "A", "source": "b", "default": "d"}
    ]}"#;
    assert!(FeatureMapper::from_json(json, "test").is_err());
}
