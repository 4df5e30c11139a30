use oncoinsight::insight::benign::{assess_risk, follow_up, lifestyle_recommendations};
use oncoinsight::questionnaire::ResponseSet;
use oncoinsight::schema::v1::RiskLevel;

fn pct() -> String {
    "80.0%".to_string()
}

#[test]
fn all_factors_fire() {
    let responses = ResponseSet::from_pairs([
        ("family_history", "Yes"),
        ("age_group", "50-59"),
        ("menopausal_status", "Post-menopausal"),
        ("bmi_category", "30 and above (Obese)"),
    ]);
    let risk = assess_risk(&responses, pct());
    assert_eq!(risk.risk_score, 6.0);
    assert_eq!(risk.risk_level, RiskLevel::High);
    assert_eq!(risk.risk_color, "red");
    assert_eq!(
        risk.risk_factors,
        vec![
            "Family history of breast cancer",
            "Age group: 50-59",
            "Post-menopausal status",
            "Obesity (BMI ≥ 30)",
        ]
    );
}

#[test]
fn overweight_counts_half() {
    let responses = ResponseSet::from_pairs([
        ("age_group", "60-69"),
        ("bmi_category", "25-29.9 (Overweight)"),
    ]);
    let risk = assess_risk(&responses, pct());
    assert_eq!(risk.risk_score, 2.5);
    assert_eq!(risk.risk_level, RiskLevel::Moderate);
    assert_eq!(risk.risk_color, "orange");
    assert_eq!(risk.risk_factors[1], "Overweight (BMI 25-29.9)");
}

#[test]
fn no_answers_is_low_risk() {
    let risk = assess_risk(&ResponseSet::new(), pct());
    assert_eq!(risk.risk_score, 0.0);
    assert_eq!(risk.risk_level, RiskLevel::Low);
    assert_eq!(risk.risk_color, "green");
    assert!(risk.risk_factors.is_empty());
    assert_eq!(risk.image_confidence, "80.0%");
}

#[test]
fn younger_age_does_not_score() {
    let responses = ResponseSet::from_pairs([("age_group", "40-49"), ("family_history", "No")]);
    assert_eq!(assess_risk(&responses, pct()).risk_score, 0.0);
}

#[test]
fn lifestyle_order_and_tiers() {
    let responses = ResponseSet::from_pairs([
        ("smoking", "Yes"),
        ("alcohol", "Yes"),
        ("bmi_category", "30 and above (Obese)"),
        ("physical_activity", "Sedentary (little or no exercise)"),
    ]);
    let recs = lifestyle_recommendations(&responses);
    assert_eq!(recs.len(), 2 + 3 + 3 + 5);
    assert_eq!(recs[0], "Smoking cessation program recommended");
    assert_eq!(recs[1], "Limit alcohol to 1 drink per day or less");
    assert_eq!(recs[2], "Weight management through balanced diet");
    assert_eq!(recs[5], "Gradually increase physical activity to 150 minutes/week");
    assert_eq!(recs[12], "Stay hydrated with water throughout the day");
}

#[test]
fn follow_up_tables() {
    assert_eq!(follow_up(RiskLevel::High).timeline, "6-month follow-up recommended");
    assert_eq!(follow_up(RiskLevel::Moderate).timeline, "Annual screening recommended");
    assert_eq!(follow_up(RiskLevel::Low).timeline, "Routine screening schedule");
    for level in [RiskLevel::High, RiskLevel::Moderate, RiskLevel::Low] {
        assert_eq!(follow_up(level).recommendations.len(), 4);
    }
}
