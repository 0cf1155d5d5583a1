//! Desk layout editing: presets, movement, groups, exclusion, locks and
//! manual seating.

use crate::error::{Result, SeatplanError};
use crate::models::{CanvasBounds, Desk, DeskId, Group, GroupId, SeatingPlan};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DESK_WIDTH: f64 = 60.0;
pub const DESK_HEIGHT: f64 = 40.0;

/// Top-left corner of the first desk in a preset
const ORIGIN: [f64; 2] = [60.0, 80.0];

/// Ready-made furniture arrangements, front row first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LayoutPreset {
    /// Single desks in rows; neighbors within a row are adjacent
    Rows { rows: u32, columns: u32 },
    /// Rows of desk pairs, each pair a group
    Pairs { rows: u32, pairs: u32 },
    /// Grouped tables of `seats` desks in two facing columns
    Tables { tables: u32, seats: u32 },
}

impl LayoutPreset {
    /// Desk rectangles and their group index within the preset
    fn build(self) -> Vec<([f64; 4], Option<u32>)> {
        let [ox, oy] = ORIGIN;
        let mut cells = Vec::new();
        match self {
            LayoutPreset::Rows { rows, columns } => {
                for row in 0..rows {
                    for col in 0..columns {
                        let x = ox + col as f64 * 100.0;
                        let y = oy + row as f64 * 130.0;
                        cells.push(([x, y, DESK_WIDTH, DESK_HEIGHT], None));
                    }
                }
            }
            LayoutPreset::Pairs { rows, pairs } => {
                for row in 0..rows {
                    for pair in 0..pairs {
                        let group = row * pairs + pair;
                        let x = ox + pair as f64 * 200.0;
                        let y = oy + row as f64 * 130.0;
                        cells.push(([x, y, DESK_WIDTH, DESK_HEIGHT], Some(group)));
                        cells.push(([x + DESK_WIDTH, y, DESK_WIDTH, DESK_HEIGHT], Some(group)));
                    }
                }
            }
            LayoutPreset::Tables { tables, seats } => {
                let per_row = 3;
                let table_rows = seats.div_ceil(2);
                let table_depth = table_rows as f64 * DESK_HEIGHT + 120.0;
                for table in 0..tables {
                    let tx = ox + (table % per_row) as f64 * 260.0;
                    let ty = oy + (table / per_row) as f64 * table_depth;
                    for seat in 0..seats {
                        let x = tx + (seat % 2) as f64 * DESK_WIDTH;
                        let y = ty + (seat / 2) as f64 * DESK_HEIGHT;
                        cells.push(([x, y, DESK_WIDTH, DESK_HEIGHT], Some(table)));
                    }
                }
            }
        }
        cells
    }

    fn group_label(self) -> &'static str {
        match self {
            LayoutPreset::Rows { .. } => "Row",
            LayoutPreset::Pairs { .. } => "Pair",
            LayoutPreset::Tables { .. } => "Table",
        }
    }
}

impl SeatingPlan {
    /// Replace the layout with a preset. Seats, locks and exclusions are reset.
    pub fn apply_preset(&mut self, preset: LayoutPreset) -> Vec<DeskId> {
        self.desks.clear();
        self.groups.clear();
        self.excluded.clear();

        let mut group_ids: Vec<(u32, GroupId)> = Vec::new();
        let mut ids = Vec::new();
        for ([x, y, w, h], group) in preset.build() {
            let group = group.map(|index| {
                if let Some((_, id)) = group_ids.iter().find(|(i, _)| *i == index) {
                    return *id;
                }
                let id = GroupId(self.allocate_id());
                self.groups
                    .push(Group::new(id, format!("{} {}", preset.group_label(), index + 1)));
                group_ids.push((index, id));
                id
            });
            let id = DeskId(self.allocate_id());
            let mut desk = Desk::new(id, x, y, w, h);
            desk.group = group;
            self.desks.push(desk);
            ids.push(id);
        }

        tracing::debug!(desks = ids.len(), groups = self.groups.len(), "Applied layout preset");
        self.touch();
        ids
    }

    /// Add a single ungrouped desk
    ///
    /// Coordinates must be finite and both sides positive.
    pub fn add_desk(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<DeskId> {
        if !(x.is_finite() && y.is_finite()) {
            return Err(SeatplanError::InvalidDesk {
                reason: format!("position ({}, {}) is not finite", x, y),
            });
        }
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(SeatplanError::InvalidDesk {
                reason: format!("size {}x{} must be positive", width, height),
            });
        }

        let id = DeskId(self.allocate_id());
        self.desks.push(Desk::new(id, x, y, width, height));
        self.touch();
        Ok(id)
    }

    /// Remove a desk, dissolving its group if fewer than two desks remain
    pub fn remove_desk(&mut self, id: DeskId) -> Result<Desk> {
        let pos = self
            .desks
            .iter()
            .position(|d| d.id == id)
            .ok_or(SeatplanError::DeskNotFound { id })?;
        let desk = self.desks.remove(pos);
        self.excluded.remove(&id);
        self.prune_groups();
        self.touch();
        Ok(desk)
    }

    /// Move a desk, or its whole group, by `(dx, dy)`.
    ///
    /// The delta is clamped so every moved desk stays inside `bounds`.
    /// Returns the delta actually applied.
    pub fn move_desk(
        &mut self,
        id: DeskId,
        dx: f64,
        dy: f64,
        bounds: CanvasBounds,
    ) -> Result<(f64, f64)> {
        if !(dx.is_finite() && dy.is_finite()) {
            return Err(SeatplanError::InvalidDesk {
                reason: format!("offset ({}, {}) is not finite", dx, dy),
            });
        }

        let group = self.desk(id)?.group;
        let members: Vec<DeskId> = match group {
            Some(group) => self.group_desk_ids(group),
            None => vec![id],
        };

        let moving = self.desks.iter().filter(|d| members.contains(&d.id));
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for desk in moving {
            min_x = min_x.min(desk.x);
            min_y = min_y.min(desk.y);
            max_x = max_x.max(desk.x + desk.width);
            max_y = max_y.max(desk.y + desk.height);
        }

        // max then min rather than clamp: an oversized group must not panic
        let dx = dx.max(-min_x).min(bounds.width - max_x);
        let dy = dy.max(-min_y).min(bounds.height - max_y);

        for desk in self.desks.iter_mut().filter(|d| members.contains(&d.id)) {
            desk.x += dx;
            desk.y += dy;
        }
        self.touch();
        Ok((dx, dy))
    }

    /// Push desks together into a new group.
    ///
    /// Desks leave any group they were in; groups left with fewer than two
    /// desks are dissolved.
    pub fn create_group(&mut self, desk_ids: &[DeskId], name: impl Into<String>) -> Result<GroupId> {
        let members: BTreeSet<DeskId> = desk_ids.iter().copied().collect();
        if members.len() < 2 {
            return Err(SeatplanError::InvalidGroup {
                reason: "a group needs at least two distinct desks".to_string(),
            });
        }
        for id in &members {
            self.desk(*id)?;
        }

        let id = GroupId(self.allocate_id());
        self.groups.push(Group::new(id, name));
        for desk in self.desks.iter_mut().filter(|d| members.contains(&d.id)) {
            desk.group = Some(id);
        }
        self.prune_groups();
        self.touch();
        Ok(id)
    }

    /// Split a group back into single desks
    pub fn dissolve_group(&mut self, id: GroupId) -> Result<()> {
        self.group(id)?;
        for desk in self.desks.iter_mut().filter(|d| d.group == Some(id)) {
            desk.group = None;
        }
        self.groups.retain(|g| g.id != id);
        self.touch();
        Ok(())
    }

    fn prune_groups(&mut self) {
        let mut dissolved = Vec::new();
        for group in &self.groups {
            if self.desks.iter().filter(|d| d.group == Some(group.id)).count() < 2 {
                dissolved.push(group.id);
            }
        }
        for desk in self.desks.iter_mut() {
            if desk.group.is_some_and(|g| dissolved.contains(&g)) {
                desk.group = None;
            }
        }
        self.groups.retain(|g| !dissolved.contains(&g.id));
    }

    /// Flip a desk's do-not-use flag, returning whether it is now excluded.
    /// Excluding a desk empties and unlocks it.
    pub fn toggle_excluded(&mut self, id: DeskId) -> Result<bool> {
        self.desk(id)?;
        let excluded = if self.excluded.remove(&id) {
            false
        } else {
            let desk = self.desk_mut(id)?;
            desk.student = None;
            desk.is_locked = false;
            self.excluded.insert(id);
            true
        };
        self.touch();
        Ok(excluded)
    }

    /// Seat a student at a desk by hand.
    ///
    /// The student is first taken off any other desk (unlocking it). A lock
    /// on the target desk is kept.
    pub fn assign_student(&mut self, id: DeskId, name: &str) -> Result<()> {
        self.student(name)?;
        self.desk(id)?;
        if self.is_excluded(id) {
            return Err(SeatplanError::DeskExcluded { id });
        }

        for desk in self.desks.iter_mut().filter(|d| d.id != id && d.is_seated(name)) {
            desk.student = None;
            desk.is_locked = false;
        }
        self.desk_mut(id)?.student = Some(name.to_string());
        self.touch();
        Ok(())
    }

    /// Empty a desk, returning the student who sat there
    pub fn unassign_desk(&mut self, id: DeskId) -> Result<Option<String>> {
        let desk = self.desk_mut(id)?;
        desk.is_locked = false;
        let previous = desk.student.take();
        self.touch();
        Ok(previous)
    }

    /// Pin a desk's student so auto-assign and clear leave it alone
    pub fn lock_desk(&mut self, id: DeskId) -> Result<()> {
        let desk = self.desk_mut(id)?;
        if desk.student.is_none() {
            return Err(SeatplanError::DeskEmpty { id });
        }
        desk.is_locked = true;
        self.touch();
        Ok(())
    }

    pub fn unlock_desk(&mut self, id: DeskId) -> Result<()> {
        self.desk_mut(id)?.is_locked = false;
        self.touch();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::{adjacent_desk_ids, DEFAULT_PROXIMITY_THRESHOLD};
    use crate::models::{Student, StudentId};

    fn plan_with(preset: LayoutPreset) -> SeatingPlan {
        let mut plan = SeatingPlan::new("Room");
        plan.apply_preset(preset);
        plan
    }

    #[test]
    fn test_rows_preset_adjacency_runs_along_rows() {
        let plan = plan_with(LayoutPreset::Rows { rows: 2, columns: 3 });
        assert_eq!(plan.desks.len(), 6);
        assert!(plan.groups.is_empty());

        let first = plan.desks[0].id;
        let neighbors = adjacent_desk_ids(first, &plan.desks, DEFAULT_PROXIMITY_THRESHOLD);
        assert_eq!(neighbors, vec![plan.desks[1].id]);
    }

    #[test]
    fn test_pairs_preset_groups_pairs() {
        let plan = plan_with(LayoutPreset::Pairs { rows: 2, pairs: 2 });
        assert_eq!(plan.desks.len(), 8);
        assert_eq!(plan.groups.len(), 4);
        for group in &plan.groups {
            assert_eq!(plan.group_desk_ids(group.id).len(), 2);
        }

        let first = plan.desks[0].id;
        let neighbors = adjacent_desk_ids(first, &plan.desks, DEFAULT_PROXIMITY_THRESHOLD);
        assert_eq!(neighbors, vec![plan.desks[1].id]);
    }

    #[test]
    fn test_tables_preset() {
        let plan = plan_with(LayoutPreset::Tables { tables: 4, seats: 4 });
        assert_eq!(plan.desks.len(), 16);
        assert_eq!(plan.groups.len(), 4);
        assert_eq!(plan.groups[0].name, "Table 1");

        // Desks on different tables are never neighbors
        let first = plan.desks[0].id;
        let neighbors = adjacent_desk_ids(first, &plan.desks, DEFAULT_PROXIMITY_THRESHOLD);
        assert_eq!(neighbors.len(), 3);
        assert!(neighbors.iter().all(|id| plan.desk(*id).unwrap().group == plan.desks[0].group));
    }

    #[test]
    fn test_move_group_moves_together_and_clamps() {
        let mut plan = plan_with(LayoutPreset::Pairs { rows: 1, pairs: 1 });
        let [a, b] = [plan.desks[0].id, plan.desks[1].id];
        let bounds = CanvasBounds { width: 400.0, height: 300.0 };

        let applied = plan.move_desk(a, -500.0, 10.0, bounds).unwrap();

        assert_eq!(applied, (-60.0, 10.0));
        assert_eq!(plan.desk(a).unwrap().x, 0.0);
        assert_eq!(plan.desk(b).unwrap().x, 60.0);
        assert_eq!(plan.desk(b).unwrap().y, 90.0);

        let applied = plan.move_desk(b, 1000.0, 1000.0, bounds).unwrap();
        assert_eq!(applied, (280.0, 170.0));
        assert_eq!(plan.desk(b).unwrap().x + DESK_WIDTH, 400.0);
    }

    #[test]
    fn test_create_group_steals_desks_and_prunes() {
        let mut plan = plan_with(LayoutPreset::Pairs { rows: 1, pairs: 2 });
        let ids: Vec<DeskId> = plan.desks.iter().map(|d| d.id).collect();

        let group = plan.create_group(&[ids[1], ids[2]], "Middle").unwrap();

        // Both original pairs are left with one desk each and are dissolved
        assert_eq!(plan.groups.len(), 1);
        assert_eq!(plan.groups[0].id, group);
        assert_eq!(plan.desk(ids[0]).unwrap().group, None);
        assert_eq!(plan.group_desk_ids(group), vec![ids[1], ids[2]]);
    }

    #[test]
    fn test_create_group_rejects_single_desk() {
        let mut plan = plan_with(LayoutPreset::Rows { rows: 1, columns: 2 });
        let id = plan.desks[0].id;
        assert!(matches!(
            plan.create_group(&[id, id], "Solo"),
            Err(SeatplanError::InvalidGroup { .. })
        ));
    }

    #[test]
    fn test_remove_desk_dissolves_pair() {
        let mut plan = plan_with(LayoutPreset::Pairs { rows: 1, pairs: 1 });
        let [a, b] = [plan.desks[0].id, plan.desks[1].id];

        plan.remove_desk(a).unwrap();

        assert!(plan.groups.is_empty());
        assert_eq!(plan.desk(b).unwrap().group, None);
        assert!(matches!(plan.remove_desk(a), Err(SeatplanError::DeskNotFound { .. })));
    }

    #[test]
    fn test_exclusion_clears_seat_and_lock() {
        let mut plan = plan_with(LayoutPreset::Rows { rows: 1, columns: 2 });
        plan.students.push(Student::new(StudentId(500), "Ada"));
        let id = plan.desks[0].id;
        plan.assign_student(id, "Ada").unwrap();
        plan.lock_desk(id).unwrap();

        assert!(plan.toggle_excluded(id).unwrap());
        let desk = plan.desk(id).unwrap();
        assert!(desk.student.is_none());
        assert!(!desk.is_locked);
        assert!(matches!(
            plan.assign_student(id, "Ada"),
            Err(SeatplanError::DeskExcluded { .. })
        ));

        assert!(!plan.toggle_excluded(id).unwrap());
        assert!(!plan.is_excluded(id));
    }

    #[test]
    fn test_manual_assign_moves_student() {
        let mut plan = plan_with(LayoutPreset::Rows { rows: 1, columns: 2 });
        plan.students.push(Student::new(StudentId(500), "Ada"));
        let [a, b] = [plan.desks[0].id, plan.desks[1].id];

        plan.assign_student(a, "Ada").unwrap();
        plan.lock_desk(a).unwrap();
        plan.assign_student(b, "Ada").unwrap();

        assert!(plan.desk(a).unwrap().student.is_none());
        assert!(!plan.desk(a).unwrap().is_locked);
        assert!(plan.desk(b).unwrap().is_seated("Ada"));
        assert!(matches!(
            plan.assign_student(a, "Nobody"),
            Err(SeatplanError::StudentNotFound { .. })
        ));
    }

    #[test]
    fn test_lock_requires_student() {
        let mut plan = plan_with(LayoutPreset::Rows { rows: 1, columns: 1 });
        let id = plan.desks[0].id;
        assert!(matches!(plan.lock_desk(id), Err(SeatplanError::DeskEmpty { .. })));
    }

    #[test]
    fn test_add_desk_rejects_bad_geometry() {
        let mut plan = SeatingPlan::new("Room");
        assert!(matches!(
            plan.add_desk(f64::NAN, 0.0, DESK_WIDTH, DESK_HEIGHT),
            Err(SeatplanError::InvalidDesk { .. })
        ));
        assert!(matches!(
            plan.add_desk(0.0, f64::INFINITY, DESK_WIDTH, DESK_HEIGHT),
            Err(SeatplanError::InvalidDesk { .. })
        ));
        assert!(matches!(
            plan.add_desk(0.0, 0.0, 0.0, DESK_HEIGHT),
            Err(SeatplanError::InvalidDesk { .. })
        ));
        assert!(matches!(
            plan.add_desk(0.0, 0.0, DESK_WIDTH, -40.0),
            Err(SeatplanError::InvalidDesk { .. })
        ));
        assert!(plan.desks.is_empty());
    }

    #[test]
    fn test_move_desk_rejects_non_finite_offset() {
        let mut plan = SeatingPlan::new("Room");
        let id = plan.add_desk(100.0, 100.0, DESK_WIDTH, DESK_HEIGHT).unwrap();

        let result = plan.move_desk(id, f64::NAN, 0.0, CanvasBounds::default());

        assert!(matches!(result, Err(SeatplanError::InvalidDesk { .. })));
        assert_eq!(plan.desk(id).unwrap().x, 100.0);
    }

    #[test]
    fn test_edited_plan_survives_json_round_trip() {
        let mut plan = SeatingPlan::new("Room");
        let id = plan.add_desk(100.0, 100.0, DESK_WIDTH, DESK_HEIGHT).unwrap();
        let _ = plan.add_desk(f64::NAN, 0.0, DESK_WIDTH, DESK_HEIGHT);
        let _ = plan.move_desk(id, f64::NAN, f64::NAN, CanvasBounds::default());

        let saved = serde_json::to_string(&plan).unwrap();
        let reloaded: SeatingPlan = serde_json::from_str(&saved).unwrap();

        assert_eq!(reloaded.desks, plan.desks);
    }
}
