use crate::config_loader::WORKSPACE_DIR;
use seatplan_core::models::SeatingPlan;
use seatplan_core::ports::PlanStore;
use seatplan_core::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Plan store backed by `.seatplan/plan.json` inside a workspace
pub struct JsonPlanStore {
    path: PathBuf,
}

impl JsonPlanStore {
    pub fn new(workspace_root: &Path) -> Self {
        Self {
            path: workspace_root.join(WORKSPACE_DIR).join("plan.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PlanStore for JsonPlanStore {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn load(&self) -> Result<SeatingPlan> {
        let content = fs::read_to_string(&self.path)?;
        let plan = serde_json::from_str(&content)?;
        Ok(plan)
    }

    fn save(&self, plan: &SeatingPlan) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write beside the target and rename so a crash never leaves half a plan
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, serde_json::to_string_pretty(plan)?)?;
        fs::rename(&staging, &self.path)?;

        tracing::debug!(path = %self.path.display(), desks = plan.desks.len(), "Saved plan");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = JsonPlanStore::new(dir.path());
        assert!(!store.exists());

        let mut plan = SeatingPlan::new("Room 12");
        let desk = plan.add_desk(10.0, 20.0, 60.0, 40.0).unwrap();
        plan.add_students("Alice, f\nBob").unwrap();
        plan.assign_student(desk, "Alice").unwrap();
        store.save(&plan).unwrap();

        assert!(store.exists());
        let loaded = store.load().unwrap();
        assert_eq!(loaded.name, "Room 12");
        assert_eq!(loaded.desks, plan.desks);
        assert_eq!(loaded.students, plan.students);
        assert!(!dir.path().join(".seatplan/plan.json.tmp").exists());
    }

    #[test]
    fn test_load_missing_plan_fails() {
        let dir = TempDir::new().unwrap();
        assert!(JsonPlanStore::new(dir.path()).load().is_err());
    }

    #[test]
    fn test_load_corrupt_plan_fails() {
        let dir = TempDir::new().unwrap();
        let store = JsonPlanStore::new(dir.path());
        fs::create_dir_all(dir.path().join(WORKSPACE_DIR)).unwrap();
        fs::write(store.path(), "{ not json").unwrap();
        assert!(store.load().is_err());
    }
}
