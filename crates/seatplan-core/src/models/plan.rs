use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Desk, DeskId, Group, GroupId, RuleId, SeparationRule, Student};
use crate::error::{Result, SeatplanError};

/// A classroom: desk layout, roster, separation rules and exclusions.
///
/// The plan owns all seating state. The solver reads snapshots of it and
/// the plan only swaps in new desk state once a full arrangement exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatingPlan {
    pub name: String,

    #[serde(default)]
    pub desks: Vec<Desk>,

    #[serde(default)]
    pub groups: Vec<Group>,

    #[serde(default)]
    pub students: Vec<Student>,

    #[serde(default)]
    pub rules: Vec<SeparationRule>,

    /// Desks marked as do-not-use
    #[serde(default)]
    pub excluded: BTreeSet<DeskId>,

    #[serde(default)]
    next_id: u32,

    pub updated_at: DateTime<Utc>,
}

impl SeatingPlan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            desks: Vec::new(),
            groups: Vec::new(),
            students: Vec::new(),
            rules: Vec::new(),
            excluded: BTreeSet::new(),
            next_id: 1,
            updated_at: Utc::now(),
        }
    }

    /// Hand out a fresh id, never reusing one already present in the plan
    pub(crate) fn allocate_id(&mut self) -> u32 {
        let highest = self
            .desks
            .iter()
            .map(|d| d.id.0)
            .chain(self.groups.iter().map(|g| g.id.0))
            .chain(self.students.iter().map(|s| s.id.0))
            .chain(self.rules.iter().map(|r| r.id.0))
            .max()
            .unwrap_or(0);
        let id = self.next_id.max(highest + 1);
        self.next_id = id + 1;
        id
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn desk(&self, id: DeskId) -> Result<&Desk> {
        self.desks
            .iter()
            .find(|d| d.id == id)
            .ok_or(SeatplanError::DeskNotFound { id })
    }

    pub(crate) fn desk_mut(&mut self, id: DeskId) -> Result<&mut Desk> {
        self.desks
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(SeatplanError::DeskNotFound { id })
    }

    pub fn group(&self, id: GroupId) -> Result<&Group> {
        self.groups
            .iter()
            .find(|g| g.id == id)
            .ok_or(SeatplanError::GroupNotFound { id })
    }

    pub fn student(&self, name: &str) -> Result<&Student> {
        self.students
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| SeatplanError::StudentNotFound { name: name.to_string() })
    }

    pub(crate) fn student_mut(&mut self, name: &str) -> Result<&mut Student> {
        self.students
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| SeatplanError::StudentNotFound { name: name.to_string() })
    }

    pub fn rule(&self, id: RuleId) -> Result<&SeparationRule> {
        self.rules
            .iter()
            .find(|r| r.id == id)
            .ok_or(SeatplanError::RuleNotFound { id })
    }

    pub fn is_excluded(&self, id: DeskId) -> bool {
        self.excluded.contains(&id)
    }

    /// Desks the solver may fill: not excluded and not locked
    pub fn available_desks(&self) -> impl Iterator<Item = &Desk> {
        self.desks.iter().filter(|d| !d.is_locked && !self.excluded.contains(&d.id))
    }

    /// Ids of all desks belonging to a group, in desk order
    pub fn group_desk_ids(&self, id: GroupId) -> Vec<DeskId> {
        self.desks.iter().filter(|d| d.group == Some(id)).map(|d| d.id).collect()
    }

    /// Desk currently holding the named student
    pub fn desk_of(&self, name: &str) -> Option<&Desk> {
        self.desks.iter().find(|d| d.is_seated(name))
    }

    /// Students not seated at any desk
    pub fn unseated_students(&self) -> Vec<&Student> {
        self.students.iter().filter(|s| self.desk_of(&s.name).is_none()).collect()
    }
}
