//! Writing solver output back into desk state.

use crate::error::Result;
use crate::models::{Desk, SeatingPlan};
use crate::solver::{solve, Assignment, SolveOptions};
use rand::Rng;
use serde::Serialize;

/// Summary of a successful auto-assign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssignmentReport {
    /// Students placed by the solver
    pub placed: usize,

    /// Seats kept by locked desks
    pub locked: usize,

    /// Candidate placements tried during the search
    pub explored: u64,
}

/// New desk list with every unlocked desk seated from `assignment`.
///
/// Unlocked desks absent from the assignment become empty. Locked desks
/// are copied unchanged.
pub fn apply_assignment(desks: &[Desk], assignment: &Assignment) -> Vec<Desk> {
    desks
        .iter()
        .map(|desk| {
            if desk.is_locked {
                return desk.clone();
            }
            Desk {
                student: assignment.get(desk.id).map(str::to_string),
                ..desk.clone()
            }
        })
        .collect()
}

/// New desk list with every unlocked desk emptied
pub fn clear_assignments(desks: &[Desk]) -> Vec<Desk> {
    desks
        .iter()
        .map(|desk| {
            if desk.is_locked {
                desk.clone()
            } else {
                Desk { student: None, ..desk.clone() }
            }
        })
        .collect()
}

impl SeatingPlan {
    /// Seat the whole roster, honoring locks, exclusions and separation rules.
    ///
    /// All or nothing: desks are replaced only when a full arrangement is
    /// found, otherwise the plan is left exactly as it was.
    pub fn auto_assign<R: Rng + ?Sized>(
        &mut self,
        options: &SolveOptions,
        rng: &mut R,
    ) -> Result<AssignmentReport> {
        let solution = solve(self, options, rng)?;
        self.desks = apply_assignment(&self.desks, &solution.assignment);
        self.touch();

        Ok(AssignmentReport {
            placed: solution.placed,
            locked: solution.locked,
            explored: solution.explored,
        })
    }

    /// Empty every unlocked desk, returning how many students were unseated
    pub fn clear_assignments(&mut self) -> usize {
        let cleared =
            self.desks.iter().filter(|d| !d.is_locked && d.is_occupied()).count();
        self.desks = clear_assignments(&self.desks);
        self.touch();
        cleared
    }
}
