use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a separation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(pub u32);

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A set of students who must not be seated next to each other
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeparationRule {
    pub id: RuleId,

    /// Student names covered by the rule
    pub students: Vec<String>,

    #[serde(default)]
    pub description: String,
}

impl SeparationRule {
    pub fn new(id: RuleId, students: Vec<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            students,
            description: description.into(),
        }
    }

    pub fn mentions(&self, name: &str) -> bool {
        self.students.iter().any(|s| s == name)
    }
}
