use crate::output::OutputWriter;
use serde::Serialize;
use std::fmt;

/// A change `--dry-run` reports instead of making
#[derive(Debug, Clone, Serialize)]
pub struct PlannedAction {
    pub action_type: ActionType,
    pub description: String,
    pub details: Vec<String>,
}

/// What a planned change touches on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    CreateDirectory,
    CreateFile,
    UpdatePlan,
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActionType::CreateDirectory => "mkdir",
            ActionType::CreateFile => "write",
            ActionType::UpdatePlan => "update",
        };
        f.write_str(label)
    }
}

impl PlannedAction {
    pub fn new(action_type: ActionType, description: impl Into<String>) -> Self {
        Self {
            action_type,
            description: description.into(),
            details: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    /// Numbered headline followed by indented detail lines
    fn lines(&self, number: usize) -> Vec<String> {
        std::iter::once(format!("{}. [{}] {}", number, self.action_type, self.description))
            .chain(self.details.iter().map(|detail| format!("   - {}", detail)))
            .collect()
    }
}

/// Report planned actions without applying them
pub fn display_planned_actions(
    output: &OutputWriter,
    actions: &[PlannedAction],
) -> anyhow::Result<()> {
    if output.is_json() {
        return output.result(serde_json::json!({
            "dry_run": true,
            "planned_actions": actions,
        }));
    }

    output.section("Planned Actions (Dry Run)");
    actions
        .iter()
        .enumerate()
        .flat_map(|(i, action)| action.lines(i + 1))
        .for_each(|line| output.info(line));
    output.info("No changes were made. Run without --dry-run to apply them.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_lines() {
        let action = PlannedAction::new(ActionType::UpdatePlan, "Seat 24 students")
            .with_detail("Desk 1: Alice")
            .with_detail("Desk 2: Bob");

        assert_eq!(
            action.lines(3),
            vec![
                "3. [update] Seat 24 students".to_string(),
                "   - Desk 1: Alice".to_string(),
                "   - Desk 2: Bob".to_string(),
            ]
        );
    }

    #[test]
    fn test_action_type_serialization() {
        let action = PlannedAction::new(ActionType::CreateDirectory, "Create .seatplan/");
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["action_type"], "create_directory");
        assert!(json["details"].as_array().unwrap().is_empty());
    }
}
