//! Decoded server verdict for one upload.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadResult {
    #[serde(default)]
    pub complete: Value,
    #[serde(default)]
    pub runtime: Value,
    #[serde(default)]
    pub free_heap_size_before: Value,
    #[serde(default)]
    pub free_heap_size_after: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success,
    Failure,
    /// `complete` held something other than a known success/failure code.
    Unrecognized(String),
}

impl UploadResult {
    /// Numeric `complete` code, accepting integral floats like `1.0`.
    pub fn code(&self) -> Option<i64> {
        self.complete.as_i64().or_else(|| {
            self.complete
                .as_f64()
                .filter(|f| f.fract() == 0.0)
                .map(|f| f as i64)
        })
    }

    pub fn outcome(&self) -> Outcome {
        // The server reports part 2 verdicts as 2 / -2.
        match self.code() {
            Some(1) | Some(2) => Outcome::Success,
            Some(-1) | Some(-2) => Outcome::Failure,
            _ => Outcome::Unrecognized(display_value(&self.complete)),
        }
    }

    pub fn message(&self) -> String {
        let details = format!(
            "Runtime {}, Minimum Free Heap Size [{}, {}]",
            display_value(&self.runtime),
            display_value(&self.free_heap_size_before),
            display_value(&self.free_heap_size_after),
        );
        match self.outcome() {
            Outcome::Success => format!("✅ Success, {}", details),
            Outcome::Failure => format!("❌ Fail, {}", details),
            Outcome::Unrecognized(code) => format!("Unrecognized result (complete = {})", code),
        }
    }
}

/// Render a JSON scalar the way it should read in a sentence: strings
/// without quotes, missing values as `n/a`.
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "n/a".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
