//! Desk adjacency: explicit group membership or center-to-center proximity.

use crate::models::{Desk, DeskId};
use crate::spatial::DeskIndex;
use std::collections::{BTreeSet, HashMap};

/// Center distance (canvas units) under which two desks count as neighbors
pub const DEFAULT_PROXIMITY_THRESHOLD: f64 = 120.0;

/// Neighbors of a single desk.
///
/// Every other desk in the same group, unioned with every other desk whose
/// center is within `threshold` of this desk's center. Sorted, deduplicated.
/// Returns an empty list for an unknown desk id.
pub fn adjacent_desk_ids(desk_id: DeskId, desks: &[Desk], threshold: f64) -> Vec<DeskId> {
    let Some(desk) = desks.iter().find(|d| d.id == desk_id) else {
        return Vec::new();
    };

    let neighbors: BTreeSet<DeskId> = desks
        .iter()
        .filter(|other| other.id != desk_id)
        .filter(|other| {
            let same_group = desk.group.is_some() && other.group == desk.group;
            same_group || desk.center_distance(other) <= threshold
        })
        .map(|other| other.id)
        .collect();

    neighbors.into_iter().collect()
}

/// Precomputed neighbor sets for a whole layout
#[derive(Debug, Clone, Default)]
pub struct AdjacencyMap {
    neighbors: HashMap<DeskId, BTreeSet<DeskId>>,
}

impl AdjacencyMap {
    /// Build the map for a layout, using an R-tree for the proximity pass
    pub fn build(desks: &[Desk], threshold: f64) -> Self {
        let index = DeskIndex::from_desks(desks);
        let mut neighbors: HashMap<DeskId, BTreeSet<DeskId>> =
            desks.iter().map(|d| (d.id, BTreeSet::new())).collect();

        for desk in desks {
            let near = index.within_distance(desk.center(), threshold);
            let entry = neighbors.entry(desk.id).or_default();
            entry.extend(near.into_iter().filter(|id| *id != desk.id));
        }

        let mut by_group: HashMap<_, Vec<DeskId>> = HashMap::new();
        for desk in desks {
            if let Some(group) = desk.group {
                by_group.entry(group).or_default().push(desk.id);
            }
        }
        for members in by_group.values() {
            for a in members {
                let entry = neighbors.entry(*a).or_default();
                entry.extend(members.iter().copied().filter(|b| b != a));
            }
        }

        Self { neighbors }
    }

    /// Neighbors of a desk, ascending. Unknown desks have none.
    pub fn neighbors(&self, id: DeskId) -> impl Iterator<Item = DeskId> + '_ {
        self.neighbors.get(&id).into_iter().flat_map(|set| set.iter().copied())
    }

    /// Every adjacent pair once, as `(lower, higher)`
    pub fn pairs(&self) -> Vec<(DeskId, DeskId)> {
        let mut pairs: Vec<(DeskId, DeskId)> = self
            .neighbors
            .iter()
            .flat_map(|(a, set)| set.iter().filter(move |b| a < *b).map(move |b| (*a, *b)))
            .collect();
        pairs.sort();
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GroupId;

    fn desk(id: u32, x: f64, y: f64) -> Desk {
        Desk::new(DeskId(id), x, y, 60.0, 40.0)
    }

    #[test]
    fn test_proximity_neighbors() {
        let desks = vec![desk(1, 0.0, 0.0), desk(2, 70.0, 0.0), desk(3, 400.0, 0.0)];

        assert_eq!(adjacent_desk_ids(DeskId(1), &desks, 120.0), vec![DeskId(2)]);
        assert!(adjacent_desk_ids(DeskId(3), &desks, 120.0).is_empty());
    }

    #[test]
    fn test_group_neighbors_ignore_distance() {
        let mut desks = vec![desk(1, 0.0, 0.0), desk(2, 600.0, 0.0), desk(3, 900.0, 500.0)];
        desks[0].group = Some(GroupId(10));
        desks[1].group = Some(GroupId(10));

        assert_eq!(adjacent_desk_ids(DeskId(1), &desks, 120.0), vec![DeskId(2)]);
        assert!(adjacent_desk_ids(DeskId(3), &desks, 120.0).is_empty());
    }

    #[test]
    fn test_group_and_proximity_are_unioned_without_duplicates() {
        let mut desks = vec![desk(1, 0.0, 0.0), desk(2, 70.0, 0.0), desk(3, 140.0, 0.0)];
        desks[0].group = Some(GroupId(10));
        desks[1].group = Some(GroupId(10));

        assert_eq!(adjacent_desk_ids(DeskId(2), &desks, 120.0), vec![DeskId(1), DeskId(3)]);
    }

    #[test]
    fn test_unknown_desk_has_no_neighbors() {
        let desks = vec![desk(1, 0.0, 0.0)];
        assert!(adjacent_desk_ids(DeskId(99), &desks, 120.0).is_empty());
    }

    #[test]
    fn test_map_matches_single_queries() {
        let mut desks = vec![
            desk(1, 0.0, 0.0),
            desk(2, 70.0, 0.0),
            desk(3, 140.0, 0.0),
            desk(4, 600.0, 600.0),
            desk(5, 1000.0, 100.0),
        ];
        desks[3].group = Some(GroupId(20));
        desks[4].group = Some(GroupId(20));

        let map = AdjacencyMap::build(&desks, 120.0);
        for d in &desks {
            let from_map: Vec<DeskId> = map.neighbors(d.id).collect();
            assert_eq!(from_map, adjacent_desk_ids(d.id, &desks, 120.0));
        }
        assert!(map.pairs().contains(&(DeskId(4), DeskId(5))));
        assert!(!map.pairs().contains(&(DeskId(1), DeskId(3))));
    }

    #[test]
    fn test_pairs_listed_once() {
        let desks = vec![desk(1, 0.0, 0.0), desk(2, 70.0, 0.0), desk(3, 140.0, 0.0)];
        let map = AdjacencyMap::build(&desks, 120.0);

        assert_eq!(map.pairs(), vec![(DeskId(1), DeskId(2)), (DeskId(2), DeskId(3))]);
    }
}
