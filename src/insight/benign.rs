use crate::questionnaire::ResponseSet;
use crate::schema::v1::{BenignInsights, FollowUpPlan, RiskAssessment, RiskLevel};

const AGE_RISK_GROUPS: [&str; 3] = ["50-59", "60-69", "70 and above"];
const BMI_OBESE: &str = "30 and above";
const BMI_OVERWEIGHT: &str = "25-29.9";
const SEDENTARY: &str = "Sedentary (little or no exercise)";

const HIGH_RISK_THRESHOLD: f64 = 3.0;
const MODERATE_RISK_THRESHOLD: f64 = 2.0;

const LIFESTYLE_TAIL: [&str; 5] = [
    "Maintain balanced diet rich in fruits and vegetables",
    "Include lean proteins and whole grains in diet",
    "Practice stress management techniques",
    "Get adequate sleep (7-9 hours per night)",
    "Stay hydrated with water throughout the day",
];

const GENERAL_ADVICE: [&str; 8] = [
    "Continue monthly self-breast examinations",
    "Maintain healthy body weight through balanced diet",
    "Engage in regular physical activity (150 minutes/week)",
    "Limit alcohol consumption to 1 drink per day or less",
    "Avoid smoking and secondhand smoke exposure",
    "Report any breast changes to your doctor immediately",
    "Attend all scheduled screening appointments",
    "Consider genetic counseling if strong family history",
];

pub fn build(responses: &ResponseSet, confidence_pct: String) -> BenignInsights {
    let risk_assessment = assess_risk(responses, confidence_pct);
    let follow_up_plan = follow_up(risk_assessment.risk_level);
    BenignInsights {
        lifestyle_recommendations: lifestyle_recommendations(responses),
        risk_assessment,
        follow_up_plan,
        general_advice: to_strings(&GENERAL_ADVICE),
        is_fallback: false,
    }
}

/// Additive score over family history, age, menopause and BMI.
pub fn assess_risk(responses: &ResponseSet, image_confidence: String) -> RiskAssessment {
    let mut score = 0.0;
    let mut factors = Vec::new();

    if responses.get("family_history") == "Yes" {
        score += 2.0;
        factors.push("Family history of breast cancer".to_string());
    }

    let age_group = responses.get("age_group");
    if AGE_RISK_GROUPS.iter().any(|g| age_group.contains(g)) {
        score += 2.0;
        factors.push(format!("Age group: {}", age_group));
    }

    if responses.get("menopausal_status") == "Post-menopausal" {
        score += 1.0;
        factors.push("Post-menopausal status".to_string());
    }

    let bmi = responses.get("bmi_category");
    if bmi.contains(BMI_OBESE) {
        score += 1.0;
        factors.push("Obesity (BMI ≥ 30)".to_string());
    } else if bmi.contains(BMI_OVERWEIGHT) {
        score += 0.5;
        factors.push("Overweight (BMI 25-29.9)".to_string());
    }

    let level = risk_level(score);
    RiskAssessment {
        risk_level: level,
        risk_color: level.color().to_string(),
        risk_score: score,
        risk_factors: factors,
        image_confidence,
    }
}

pub fn risk_level(score: f64) -> RiskLevel {
    if score >= HIGH_RISK_THRESHOLD {
        RiskLevel::High
    } else if score >= MODERATE_RISK_THRESHOLD {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

pub fn lifestyle_recommendations(responses: &ResponseSet) -> Vec<String> {
    let mut recs: Vec<&str> = Vec::new();

    if responses.get("smoking") == "Yes" {
        recs.push("Smoking cessation program recommended");
    }
    if responses.get("alcohol") == "Yes" {
        recs.push("Limit alcohol to 1 drink per day or less");
    }

    let bmi = responses.get("bmi_category");
    if bmi.contains(BMI_OBESE) {
        recs.extend([
            "Weight management through balanced diet",
            "Regular exercise program (150+ minutes/week)",
            "Consult nutritionist for dietary planning",
        ]);
    } else if bmi.contains(BMI_OVERWEIGHT) {
        recs.extend([
            "Moderate weight loss recommended",
            "Increase physical activity level",
            "Focus on whole foods and portion control",
        ]);
    }

    if responses.get("physical_activity") == SEDENTARY {
        recs.extend([
            "Gradually increase physical activity to 150 minutes/week",
            "Consider walking, swimming, or cycling",
            "Incorporate strength training 2 times/week",
        ]);
    }

    recs.extend(LIFESTYLE_TAIL);
    to_strings(&recs)
}

pub fn follow_up(level: RiskLevel) -> FollowUpPlan {
    let (timeline, recommendations): (&str, [&str; 4]) = match level {
        RiskLevel::High => (
            "6-month follow-up recommended",
            [
                "Clinical breast exam in 6 months",
                "Diagnostic mammogram",
                "Consider breast MRI if dense tissue",
                "Regular self-breast exams monthly",
            ],
        ),
        RiskLevel::Moderate => (
            "Annual screening recommended",
            [
                "Clinical breast exam annually",
                "Screening mammogram yearly",
                "Monthly self-breast exams",
                "Maintain healthy lifestyle",
            ],
        ),
        RiskLevel::Low => (
            "Routine screening schedule",
            [
                "Annual screening mammogram",
                "Clinical breast exam every 1-2 years",
                "Monthly self-breast exams",
                "Continue healthy habits",
            ],
        ),
    };
    FollowUpPlan {
        timeline: timeline.to_string(),
        recommendations: to_strings(&recommendations),
    }
}

pub(crate) fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_boundaries() {
        assert_eq!(risk_level(1.5), RiskLevel::Low);
        assert_eq!(risk_level(2.0), RiskLevel::Moderate);
        assert_eq!(risk_level(2.5), RiskLevel::Moderate);
        assert_eq!(risk_level(3.0), RiskLevel::High);
    }

    #[test]
    fn empty_answers_get_only_tail() {
        let recs = lifestyle_recommendations(&ResponseSet::new());
        assert_eq!(recs.len(), LIFESTYLE_TAIL.len());
    }
}
