pub mod desk;
pub mod group;
pub mod plan;
pub mod rule;
pub mod student;

pub use desk::{CanvasBounds, Desk, DeskId};
pub use group::{Group, GroupId};
pub use plan::SeatingPlan;
pub use rule::{RuleId, SeparationRule};
pub use student::{Gender, Student, StudentId};
