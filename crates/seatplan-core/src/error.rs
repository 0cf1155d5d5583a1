//! Error types for Seatplan

use crate::models::{DeskId, GroupId, RuleId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeatplanError {
    // Layout errors
    #[error("Desk not found: {id}")]
    DeskNotFound { id: DeskId },

    #[error("Desk {id} is marked as do-not-use")]
    DeskExcluded { id: DeskId },

    #[error("Desk {id} has no student to lock")]
    DeskEmpty { id: DeskId },

    #[error("Group not found: {id}")]
    GroupNotFound { id: GroupId },

    #[error("Invalid desk geometry: {reason}")]
    InvalidDesk { reason: String },

    #[error("Invalid group: {reason}")]
    InvalidGroup { reason: String },

    // Roster errors
    #[error("Student not found: {name}")]
    StudentNotFound { name: String },

    #[error("Duplicate student name: {name}")]
    DuplicateStudent { name: String },

    #[error("Invalid roster line {line}: {reason}")]
    InvalidRosterLine { line: usize, reason: String },

    // Rule errors
    #[error("Separation rule not found: {id}")]
    RuleNotFound { id: RuleId },

    #[error("Invalid separation rule: {reason}")]
    InvalidRule { reason: String },

    // Solver outcomes
    #[error("Not enough desks: {needed} students to place but only {available} desks available")]
    NotEnoughDesks { needed: usize, available: usize },

    #[error(
        "Assignment failed: no valid arrangement of {students} students over {desks} desks{}",
        limit_note(.limit_reached)
    )]
    AssignmentFailed {
        students: usize,
        desks: usize,
        limit_reached: bool,
    },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

fn limit_note(limit_reached: &bool) -> &'static str {
    if *limit_reached {
        " (search limit reached)"
    } else {
        ""
    }
}

impl From<serde_json::Error> for SeatplanError {
    fn from(err: serde_json::Error) -> Self {
        SeatplanError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SeatplanError>;
