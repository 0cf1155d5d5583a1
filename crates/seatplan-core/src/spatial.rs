use crate::models::{Desk, DeskId};
use rstar::primitives::GeomWithData;
use rstar::RTree;

/// Desk center tagged with the desk id
type IndexedDesk = GeomWithData<[f64; 2], DeskId>;

/// Spatial index over desk centers for proximity queries
pub struct DeskIndex {
    tree: RTree<IndexedDesk>,
}

impl DeskIndex {
    /// Build an index from a desk layout
    pub fn from_desks(desks: &[Desk]) -> Self {
        let indexed: Vec<IndexedDesk> =
            desks.iter().map(|desk| GeomWithData::new(desk.center(), desk.id)).collect();
        Self { tree: RTree::bulk_load(indexed) }
    }

    /// Ids of desks whose center lies within `max_distance` of `point`.
    ///
    /// The tree is queried with the squared radius; each hit is checked
    /// against the exact Euclidean distance so the boundary is inclusive.
    pub fn within_distance(&self, point: [f64; 2], max_distance: f64) -> Vec<DeskId> {
        if max_distance < 0.0 {
            return Vec::new();
        }

        self.tree
            .locate_within_distance(point, max_distance * max_distance)
            .filter(|indexed| {
                let [x, y] = *indexed.geom();
                ((x - point[0]).powi(2) + (y - point[1]).powi(2)).sqrt() <= max_distance
            })
            .map(|indexed| indexed.data)
            .collect()
    }
}
