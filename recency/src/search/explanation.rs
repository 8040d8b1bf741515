//! Explanation trees describing how a score was computed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A labeled numeric node with optional sub-explanations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    /// Value this node contributes
    pub value: f32,

    /// Human-readable description of the value
    pub description: String,

    /// Values this node was computed from
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<Explanation>,
}

impl Explanation {
    /// A leaf node.
    pub fn match_value(value: f32, description: impl Into<String>) -> Self {
        Self {
            value,
            description: description.into(),
            details: Vec::new(),
        }
    }

    /// A node computed from `details`.
    pub fn with_details(
        value: f32,
        description: impl Into<String>,
        details: impl IntoIterator<Item = Explanation>,
    ) -> Self {
        Self {
            value,
            description: description.into(),
            details: details.into_iter().collect(),
        }
    }

    /// Depth-first search for the first node whose description starts with `prefix`.
    pub fn find(&self, prefix: &str) -> Option<&Explanation> {
        if self.description.starts_with(prefix) {
            return Some(self);
        }
        self.details.iter().find_map(|detail| detail.find(prefix))
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(
            f,
            "{:indent$}{} = {}",
            "",
            self.value,
            self.description,
            indent = depth * 2
        )?;
        for detail in &self.details {
            detail.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
