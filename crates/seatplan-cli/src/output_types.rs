use chrono::{DateTime, Utc};
use seatplan_core::constraints::Violation;
use seatplan_core::models::{Desk, SeatingPlan, SeparationRule, Student};
use serde::Serialize;
use tabled::Tabled;

/// Output for init command
#[derive(Debug, Serialize)]
pub struct InitOutput {
    pub workspace_path: String,
    pub name: String,
    pub desks: usize,
    pub groups: usize,
}

/// Row for students list
#[derive(Debug, Serialize, Tabled)]
pub struct StudentRow {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Gender")]
    pub gender: String,
    #[tabled(rename = "SEND")]
    pub send: String,
    #[tabled(rename = "Desk")]
    pub desk: String,
}

impl StudentRow {
    pub fn new(student: &Student, plan: &SeatingPlan) -> Self {
        Self {
            name: student.name.clone(),
            gender: student.gender.map_or_else(|| "-".to_string(), |g| g.to_string()),
            send: if student.is_send { "yes" } else { "" }.to_string(),
            desk: plan
                .desk_of(&student.name)
                .map_or_else(|| "-".to_string(), |d| d.id.to_string()),
        }
    }
}

/// Row for rules list
#[derive(Debug, Serialize, Tabled)]
pub struct RuleRow {
    #[tabled(rename = "ID")]
    pub id: u32,
    #[tabled(rename = "Keep apart")]
    pub students: String,
    #[tabled(rename = "Description")]
    pub description: String,
}

impl From<&SeparationRule> for RuleRow {
    fn from(rule: &SeparationRule) -> Self {
        Self {
            id: rule.id.0,
            students: rule.students.join(", "),
            description: rule.description.clone(),
        }
    }
}

/// Row for desk list
#[derive(Debug, Serialize, Tabled)]
pub struct DeskRow {
    #[tabled(rename = "ID")]
    pub id: u32,
    #[tabled(rename = "X")]
    pub x: f64,
    #[tabled(rename = "Y")]
    pub y: f64,
    #[tabled(rename = "Group")]
    pub group: String,
    #[tabled(rename = "Student")]
    pub student: String,
    #[tabled(rename = "State")]
    pub state: String,
}

impl DeskRow {
    pub fn new(desk: &Desk, plan: &SeatingPlan) -> Self {
        let group = desk
            .group
            .and_then(|id| plan.group(id).ok())
            .map_or_else(|| "-".to_string(), |g| format!("{} ({})", g.name, g.id));
        let state = if plan.is_excluded(desk.id) {
            "excluded"
        } else if desk.is_locked {
            "locked"
        } else {
            ""
        };

        Self {
            id: desk.id.0,
            x: desk.x,
            y: desk.y,
            group,
            student: desk.student.clone().unwrap_or_else(|| "-".to_string()),
            state: state.to_string(),
        }
    }
}

/// Output for assign command
#[derive(Debug, Serialize)]
pub struct AssignOutput {
    pub placed: usize,
    pub locked: usize,
    pub explored: u64,
    pub seed: u64,
    pub seats: Vec<SeatRow>,
}

/// One seated student
#[derive(Debug, Serialize, Tabled)]
pub struct SeatRow {
    #[tabled(rename = "Desk")]
    pub desk: u32,
    #[tabled(rename = "Student")]
    pub student: String,
}

impl SeatRow {
    pub fn from_plan(plan: &SeatingPlan) -> Vec<Self> {
        plan.desks
            .iter()
            .filter_map(|desk| {
                desk.student.as_ref().map(|student| SeatRow {
                    desk: desk.id.0,
                    student: student.clone(),
                })
            })
            .collect()
    }
}

/// Output for clear command
#[derive(Debug, Serialize)]
pub struct ClearOutput {
    pub cleared: usize,
}

/// Output for status command
#[derive(Debug, Serialize)]
pub struct StatusOutput {
    pub workspace_path: String,
    pub name: String,
    pub desks: usize,
    pub available_desks: usize,
    pub excluded_desks: usize,
    pub locked_desks: usize,
    pub groups: usize,
    pub students: usize,
    pub seated_students: usize,
    pub rules: usize,
    pub violations: Vec<Violation>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Vec<ConfigRow>>,
}

/// One resolved configuration value
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}
