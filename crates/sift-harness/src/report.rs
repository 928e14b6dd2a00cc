/// Aggregated report data handed from collectors to the reporter.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Mutable bag of named sections that collectors populate during the
/// post-compile pass. The harness enforces no schema; a section is whatever
/// JSON value its collector chose to store. Sections iterate in name order so
/// report output is deterministic.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct CompilationReportData {
    sections: BTreeMap<String, Value>,
}

impl CompilationReportData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a section, replacing any previous value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.sections.insert(name.into(), value);
    }

    /// Serialize `value` and store it as a section.
    ///
    /// Serialization of collector-owned data is infallible in practice; a
    /// value that cannot become JSON is stored as a string of the error so a
    /// broken collector is visible in the report rather than silently absent.
    pub fn insert_serialized<T: Serialize>(&mut self, name: impl Into<String>, value: &T) {
        let value = serde_json::to_value(value)
            .unwrap_or_else(|e| Value::String(format!("<unserializable: {e}>")));
        self.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.sections.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Sections in name order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }
}
