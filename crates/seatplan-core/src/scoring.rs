//! Desk ordering heuristic for gender alternation.

use crate::adjacency::AdjacencyMap;
use crate::models::{DeskId, Gender};
use crate::solver::Assignment;
use std::collections::HashMap;

/// How well a desk suits a student when alternating genders
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlacementScore {
    /// A neighbor already has the same gender, or no preference applies
    Clustered = 0,
    /// No gendered neighbor seated yet
    Neutral = 1,
    /// A neighbor of the opposite gender is seated
    Alternating = 2,
}

/// Score a candidate desk for a student.
///
/// Only ranks candidates, it never rules a desk out. Returns
/// [`PlacementScore::Clustered`] for every desk when alternation is off or
/// the student's gender is unknown, which leaves the desk order untouched.
pub fn placement_score(
    desk_id: DeskId,
    gender: Option<Gender>,
    assignment: &Assignment,
    adjacency: &AdjacencyMap,
    genders: &HashMap<String, Gender>,
    alternate_gender: bool,
) -> PlacementScore {
    let Some(gender) = gender.filter(|_| alternate_gender) else {
        return PlacementScore::Clustered;
    };

    let mut same = false;
    for neighbor in adjacency.neighbors(desk_id) {
        let Some(name) = assignment.get(neighbor) else {
            continue;
        };
        match genders.get(name) {
            Some(g) if *g == gender.opposite() => return PlacementScore::Alternating,
            Some(_) => same = true,
            None => {}
        }
    }

    if same {
        PlacementScore::Clustered
    } else {
        PlacementScore::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Desk;

    fn row() -> AdjacencyMap {
        let desks: Vec<Desk> =
            (1..=3).map(|i| Desk::new(DeskId(i), i as f64 * 70.0, 0.0, 60.0, 40.0)).collect();
        AdjacencyMap::build(&desks, 100.0)
    }

    fn genders() -> HashMap<String, Gender> {
        HashMap::from([
            ("Ann".to_string(), Gender::Female),
            ("Ben".to_string(), Gender::Male),
        ])
    }

    #[test]
    fn test_opposite_neighbor_scores_best() {
        let mut assignment = Assignment::new();
        assignment.insert(DeskId(1), "Ann".to_string());

        let score =
            placement_score(DeskId(2), Some(Gender::Male), &assignment, &row(), &genders(), true);
        assert_eq!(score, PlacementScore::Alternating);
    }

    #[test]
    fn test_same_neighbor_scores_worst() {
        let mut assignment = Assignment::new();
        assignment.insert(DeskId(1), "Ben".to_string());

        let score =
            placement_score(DeskId(2), Some(Gender::Male), &assignment, &row(), &genders(), true);
        assert_eq!(score, PlacementScore::Clustered);
    }

    #[test]
    fn test_opposite_wins_over_same() {
        let mut assignment = Assignment::new();
        assignment.insert(DeskId(1), "Ben".to_string());
        assignment.insert(DeskId(3), "Ann".to_string());

        let score =
            placement_score(DeskId(2), Some(Gender::Male), &assignment, &row(), &genders(), true);
        assert_eq!(score, PlacementScore::Alternating);
    }

    #[test]
    fn test_no_gendered_neighbor_is_neutral() {
        let mut assignment = Assignment::new();
        assignment.insert(DeskId(1), "Sam".to_string());

        let score =
            placement_score(DeskId(2), Some(Gender::Female), &assignment, &row(), &genders(), true);
        assert_eq!(score, PlacementScore::Neutral);
    }

    #[test]
    fn test_no_preference_without_alternation_or_gender() {
        let mut assignment = Assignment::new();
        assignment.insert(DeskId(1), "Ann".to_string());

        let off =
            placement_score(DeskId(2), Some(Gender::Male), &assignment, &row(), &genders(), false);
        let unknown = placement_score(DeskId(2), None, &assignment, &row(), &genders(), true);
        assert_eq!(off, PlacementScore::Clustered);
        assert_eq!(unknown, PlacementScore::Clustered);
    }
}
