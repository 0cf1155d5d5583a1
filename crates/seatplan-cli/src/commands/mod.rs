//! Command implementations

mod assign;
mod clear;
mod desk;
mod group;
mod init;
mod rules;
mod status;
mod students;

use crate::cli::{Cli, Commands};
use crate::config_loader::find_workspace_root;
use crate::dry_run::{display_planned_actions, ActionType, PlannedAction};
use crate::errors;
use crate::output::OutputWriter;
use crate::storage::JsonPlanStore;
use anyhow::{Context, Result};
use seatplan_core::models::SeatingPlan;
use seatplan_core::ports::PlanStore;
use std::path::PathBuf;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    match cli.command {
        Commands::Init(args) => init::execute(args, &output, cli.dry_run),
        Commands::Students(args) => students::execute(args, &output, cli.dry_run),
        Commands::Rules(args) => rules::execute(args, &output, cli.dry_run),
        Commands::Desk(args) => desk::execute(args, &output, cli.dry_run),
        Commands::Group(args) => group::execute(args, &output, cli.dry_run),
        Commands::Assign(args) => assign::execute(args, &output, cli.dry_run),
        Commands::Clear(args) => clear::execute(args, &output, cli.dry_run),
        Commands::Status(args) => status::execute(args, &output),
    }
}

/// An open workspace and the plan stored in it
pub(crate) struct Workspace {
    pub root: PathBuf,
    pub store: JsonPlanStore,
    pub plan: SeatingPlan,
}

impl Workspace {
    /// Locate the enclosing workspace and load its plan
    pub fn open() -> Result<Self> {
        let root = find_workspace_root()?;
        let store = JsonPlanStore::new(&root);
        if !store.exists() {
            return Err(errors::plan_missing(store.path()).into());
        }
        let plan = store
            .load()
            .with_context(|| format!("Failed to load plan from {}", store.path().display()))?;

        Ok(Self { root, store, plan })
    }

    /// Save the edited plan, or describe the change under `--dry-run`.
    ///
    /// Returns whether the plan was written.
    pub fn commit(
        &self,
        output: &OutputWriter,
        dry_run: bool,
        action: PlannedAction,
    ) -> Result<bool> {
        if dry_run {
            let action = action.with_detail(format!("Plan: {}", self.store.path().display()));
            display_planned_actions(output, &[action])?;
            return Ok(false);
        }

        self.store.save(&self.plan).context("Failed to save plan")?;
        Ok(true)
    }
}

/// Planned action for an in-place plan edit
pub(crate) fn plan_update(description: impl Into<String>) -> PlannedAction {
    PlannedAction::new(ActionType::UpdatePlan, description)
}
