use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::questionnaire::ResponseSet;
use crate::survival::SurvivalFeatureVector;

/// One target column: a lookup table over a single questionnaire answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureRule {
    pub feature: String,
    pub source: String,
    pub default: String,
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

impl FeatureRule {
    pub fn resolve(&self, answer: &str) -> &str {
        self.values
            .get(answer)
            .map(String::as_str)
            .unwrap_or(&self.default)
    }
}

#[derive(Debug, Deserialize)]
struct FeatureMapFile {
    version: String,
    features: Vec<FeatureRule>,
}

#[derive(Debug, Clone)]
pub struct FeatureMapper {
    version: String,
    rules: Vec<FeatureRule>,
}

impl FeatureMapper {
    pub fn builtin() -> Result<Self> {
        let content = include_str!("../../assets/survival/feature_map_v1.json");
        Self::from_json(content, "built-in v1")
    }

    pub fn from_json(content: &str, source: &str) -> Result<Self> {
        let file: FeatureMapFile = serde_json::from_str(content)
            .with_context(|| format!("{}: malformed feature map JSON", source))?;
        validate_rules(&file.features, source)?;
        Ok(Self {
            version: file.version,
            rules: file.features,
        })
    }

    /// Built-in tables, with a user file overriding entries by feature name.
    pub fn load(user: Option<&Path>) -> Result<Self> {
        let mut mapper = Self::builtin()?;
        if let Some(path) = user {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read feature map {}", path.display()))?;
            let overlay = Self::from_json(&content, &path.display().to_string())?;
            mapper.rules = merge_rules(mapper.rules, overlay.rules);
            mapper.version = format!("{}+{}", mapper.version, overlay.version);
        }
        Ok(mapper)
    }

    pub fn map(&self, responses: &ResponseSet) -> SurvivalFeatureVector {
        let mut out = SurvivalFeatureVector::new();
        for rule in &self.rules {
            out.insert(rule.feature.as_str(), rule.resolve(responses.get(&rule.source)));
        }
        out
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn rules(&self) -> &[FeatureRule] {
        &self.rules
    }

    pub fn features(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.feature.as_str())
    }

    pub fn vocabulary(&self, feature: &str) -> Option<BTreeSet<&str>> {
        let rule = self.rules.iter().find(|r| r.feature == feature)?;
        let mut vocab: BTreeSet<&str> = rule.values.values().map(String::as_str).collect();
        vocab.insert(rule.default.as_str());
        Some(vocab)
    }
}

pub fn merge_rules(mut builtin: Vec<FeatureRule>, user: Vec<FeatureRule>) -> Vec<FeatureRule> {
    if user.is_empty() {
        return builtin;
    }
    let mut order = Vec::new();
    let mut user_map: HashMap<String, FeatureRule> = HashMap::new();
    for rule in user {
        if !user_map.contains_key(&rule.feature) {
            order.push(rule.feature.clone());
        }
        user_map.insert(rule.feature.clone(), rule);
    }

    let mut merged = Vec::with_capacity(builtin.len() + user_map.len());
    for rule in builtin.drain(..) {
        if let Some(user_rule) = user_map.remove(&rule.feature) {
            merged.push(user_rule);
        } else {
            merged.push(rule);
        }
    }
    for feature in order {
        if let Some(rule) = user_map.remove(&feature) {
            merged.push(rule);
        }
    }
    merged
}

fn validate_rules(rules: &[FeatureRule], source: &str) -> Result<()> {
    if rules.is_empty() {
        bail!("{}: feature map defines no features", source);
    }
    let mut seen = HashSet::new();
    for (idx, rule) in rules.iter().enumerate() {
        if rule.feature.trim().is_empty() {
            bail!("{}: feature #{} has an empty name", source, idx + 1);
        }
        if !seen.insert(rule.feature.as_str()) {
            bail!("{}: duplicate feature '{}'", source, rule.feature);
        }
        if rule.source.trim().is_empty() {
            bail!("{}: feature '{}' has no source question", source, rule.feature);
        }
        if rule.default.trim().is_empty() {
            bail!("{}: feature '{}' has an empty default", source, rule.feature);
        }
        if let Some((answer, _)) = rule.values.iter().find(|(_, v)| v.trim().is_empty()) {
            bail!(
                "{}: feature '{}' maps '{}' to an empty value",
                source,
                rule.feature,
                answer
            );
        }
    }
    Ok(())
}
