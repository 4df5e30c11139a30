use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use flate2::read::GzDecoder;

pub mod json_writer;
pub mod summary;

pub use json_writer::write_json;

pub(crate) fn open_maybe_gz(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path)?;
    if path.extension().and_then(|s| s.to_str()) == Some("gz") {
        let decoder = GzDecoder::new(file);
        Ok(Box::new(decoder))
    } else {
        Ok(Box::new(file))
    }
}

/// Flat JSON object of question id to answer. Non-string scalars are stringified.
pub fn read_answers(path: &Path) -> Result<BTreeMap<String, String>> {
    let reader = open_maybe_gz(path)
        .with_context(|| format!("failed to open answers file {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_reader(BufReader::new(reader))
        .with_context(|| format!("{}: malformed answers JSON", path.display()))?;
    let serde_json::Value::Object(map) = value else {
        bail!("{}: answers must be a JSON object", path.display());
    };
    let mut answers = BTreeMap::new();
    for (key, value) in map {
        let text = match value {
            serde_json::Value::String(s) => s,
            serde_json::Value::Null => String::new(),
            serde_json::Value::Bool(b) => if b { "Yes" } else { "No" }.to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            other => bail!(
                "{}: answer '{}' must be a string, got {}",
                path.display(),
                key,
                other
            ),
        };
        answers.insert(key, text);
    }
    Ok(answers)
}
