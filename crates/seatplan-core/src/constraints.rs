use crate::adjacency::AdjacencyMap;
use crate::error::{Result, SeatplanError};
use crate::models::{DeskId, RuleId, SeatingPlan, SeparationRule};
use serde::Serialize;
use std::collections::BTreeSet;

/// Whether two students may occupy adjacent desks.
///
/// An empty seat never violates a rule. Two students conflict when a single
/// rule lists both of them.
pub fn can_sit_together(a: Option<&str>, b: Option<&str>, rules: &[SeparationRule]) -> bool {
    let (Some(a), Some(b)) = (a, b) else {
        return true;
    };
    !rules.iter().any(|rule| rule.mentions(a) && rule.mentions(b))
}

/// Two adjacent desks seated against a separation rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub desks: (DeskId, DeskId),
    pub students: (String, String),
}

impl SeatingPlan {
    /// Add a separation rule over two or more distinct students on the roster
    pub fn add_rule(&mut self, students: &[&str], description: impl Into<String>) -> Result<RuleId> {
        let distinct: BTreeSet<&str> = students.iter().copied().collect();
        if distinct.len() < 2 {
            return Err(SeatplanError::InvalidRule {
                reason: "a rule needs at least two different students".to_string(),
            });
        }
        for name in &distinct {
            self.student(name)?;
        }

        let id = RuleId(self.allocate_id());
        let mut names: Vec<String> = Vec::with_capacity(distinct.len());
        for name in students {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        self.rules.push(SeparationRule::new(id, names, description));
        self.touch();
        Ok(id)
    }

    pub fn remove_rule(&mut self, id: RuleId) -> Result<SeparationRule> {
        let pos = self
            .rules
            .iter()
            .position(|r| r.id == id)
            .ok_or(SeatplanError::RuleNotFound { id })?;
        let rule = self.rules.remove(pos);
        self.touch();
        Ok(rule)
    }

    /// Adjacent pairs currently seated against a rule, e.g. after manual edits
    pub fn violations(&self, threshold: f64) -> Vec<Violation> {
        let adjacency = AdjacencyMap::build(&self.desks, threshold);
        adjacency
            .pairs()
            .into_iter()
            .filter_map(|(a, b)| {
                let first = self.desk(a).ok()?.student.as_deref()?;
                let second = self.desk(b).ok()?.student.as_deref()?;
                if can_sit_together(Some(first), Some(second), &self.rules) {
                    return None;
                }
                Some(Violation {
                    desks: (a, b),
                    students: (first.to_string(), second.to_string()),
                })
            })
            .collect()
    }
}
