//! Port trait definitions
//!
//! These traits define the interfaces that adapters must implement.

use crate::error::Result;
use crate::models::SeatingPlan;

/// Port for persisting a seating plan between sessions
pub trait PlanStore {
    /// Whether a plan has been saved
    fn exists(&self) -> bool;

    /// Load the saved plan
    fn load(&self) -> Result<SeatingPlan>;

    /// Save the plan, replacing any previous version
    fn save(&self, plan: &SeatingPlan) -> Result<()>;
}
