//! Class roster import and editing.
//!
//! Rosters are pasted or read from a file as plain text, one student per
//! line. A line may carry optional comma-separated tags after the name:
//!
//! ```text
//! Alice Smith, female
//! Bob Jones, m, send
//! Carol
//! ```

use crate::error::{Result, SeatplanError};
use crate::models::{Gender, SeatingPlan, Student, StudentId};
use std::collections::HashSet;

/// One parsed roster line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    pub gender: Option<Gender>,
    pub is_send: bool,
}

/// Parse a gender tag (`male`, `m`, `female`, `f`, case-insensitive)
pub fn parse_gender(s: &str) -> Option<Gender> {
    match s.trim().to_lowercase().as_str() {
        "male" | "m" => Some(Gender::Male),
        "female" | "f" => Some(Gender::Female),
        _ => None,
    }
}

/// Parse roster text. Blank lines and `#` comments are skipped; a name
/// repeated within the text is rejected.
pub fn parse_roster(text: &str) -> Result<Vec<RosterEntry>> {
    let mut entries = Vec::new();
    let mut seen = HashSet::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split(',').map(str::trim);
        let name = fields.next().unwrap_or_default();
        if name.is_empty() {
            return Err(SeatplanError::InvalidRosterLine {
                line: index + 1,
                reason: "missing student name".to_string(),
            });
        }

        let mut entry = RosterEntry { name: name.to_string(), gender: None, is_send: false };
        for tag in fields.filter(|f| !f.is_empty()) {
            if tag.eq_ignore_ascii_case("send") {
                entry.is_send = true;
            } else if let Some(gender) = parse_gender(tag) {
                entry.gender = Some(gender);
            } else {
                return Err(SeatplanError::InvalidRosterLine {
                    line: index + 1,
                    reason: format!("unknown tag '{}'", tag),
                });
            }
        }

        if !seen.insert(entry.name.clone()) {
            return Err(SeatplanError::DuplicateStudent { name: entry.name });
        }
        entries.push(entry);
    }

    Ok(entries)
}

impl SeatingPlan {
    /// Add every student in roster text. Nothing is added if any line is
    /// invalid or names a student already on the roster.
    pub fn add_students(&mut self, text: &str) -> Result<Vec<StudentId>> {
        let entries = parse_roster(text)?;
        if let Some(existing) = entries.iter().find(|e| self.student(&e.name).is_ok()) {
            return Err(SeatplanError::DuplicateStudent { name: existing.name.clone() });
        }

        let mut ids = Vec::with_capacity(entries.len());
        for entry in entries {
            let id = StudentId(self.allocate_id());
            self.students.push(Student {
                id,
                name: entry.name,
                gender: entry.gender,
                is_send: entry.is_send,
            });
            ids.push(id);
        }

        tracing::debug!(added = ids.len(), total = self.students.len(), "Added students");
        self.touch();
        Ok(ids)
    }

    /// Remove a student from the roster, their desk and every rule.
    /// Rules left with fewer than two students are dropped.
    pub fn remove_student(&mut self, name: &str) -> Result<Student> {
        let pos = self
            .students
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| SeatplanError::StudentNotFound { name: name.to_string() })?;
        let student = self.students.remove(pos);

        for desk in self.desks.iter_mut().filter(|d| d.is_seated(name)) {
            desk.student = None;
            desk.is_locked = false;
        }
        for rule in self.rules.iter_mut() {
            rule.students.retain(|s| s != name);
        }
        self.rules.retain(|r| r.students.len() >= 2);

        self.touch();
        Ok(student)
    }

    pub fn set_gender(&mut self, name: &str, gender: Option<Gender>) -> Result<()> {
        self.student_mut(name)?.gender = gender;
        self.touch();
        Ok(())
    }

    /// Flip the SEND flag, returning the new value
    pub fn toggle_send(&mut self, name: &str) -> Result<bool> {
        let student = self.student_mut(name)?;
        student.is_send = !student.is_send;
        let is_send = student.is_send;
        self.touch();
        Ok(is_send)
    }
}
