//! Init command implementation

use crate::cli::InitArgs;
use crate::config_loader::WORKSPACE_DIR;
use crate::dry_run::{display_planned_actions, ActionType, PlannedAction};
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::InitOutput;
use crate::storage::JsonPlanStore;
use anyhow::{Context, Result};
use seatplan_core::adjacency::DEFAULT_PROXIMITY_THRESHOLD;
use seatplan_core::models::SeatingPlan;
use seatplan_core::ports::PlanStore;
use seatplan_core::solver::DEFAULT_SEARCH_LIMIT;
use std::fs;

pub fn execute(args: InitArgs, output: &OutputWriter, dry_run: bool) -> Result<()> {
    // Check if workspace already exists
    let seatplan_dir = args.path.join(WORKSPACE_DIR);
    if seatplan_dir.exists() && !args.force {
        return Err(errors::workspace_exists(&args.path).into());
    }

    // Build the starting plan
    let mut plan = SeatingPlan::new(args.name.clone());
    if let Some(kind) = args.preset {
        plan.apply_preset(kind.to_preset(args.rows, args.columns, args.seats));
    }

    if dry_run {
        let actions = vec![
            PlannedAction::new(
                ActionType::CreateDirectory,
                format!("Create {} directory at {}", WORKSPACE_DIR, args.path.display()),
            ),
            PlannedAction::new(ActionType::CreateFile, "Create config.toml")
                .with_detail(format!("Proximity threshold: {}", DEFAULT_PROXIMITY_THRESHOLD))
                .with_detail(format!("Search limit: {}", DEFAULT_SEARCH_LIMIT)),
            PlannedAction::new(ActionType::CreateFile, "Create plan.json")
                .with_detail(format!("Name: {}", plan.name))
                .with_detail(format!("Desks: {}", plan.desks.len()))
                .with_detail(format!("Groups: {}", plan.groups.len())),
        ];

        return display_planned_actions(output, &actions);
    }

    // Create .seatplan directory
    fs::create_dir_all(&seatplan_dir).context("Failed to create .seatplan directory")?;

    // Create config.toml
    let config_toml = format!(
        r#"# Seatplan Workspace Configuration

# Center-to-center distance under which two desks count as neighbors.
# Desks in the same group are always neighbors.
proximity_threshold = {:.1}

# Fill desks in layout order (front row first) instead of a random order
fill_from_front = false

# Prefer seating boys and girls alternately
alternate_gender = false

# Placement attempts before auto-assign gives up (0 = unlimited)
search_limit = {}

# Fixed random seed for reproducible plans
# seed = 42
"#,
        DEFAULT_PROXIMITY_THRESHOLD, DEFAULT_SEARCH_LIMIT
    );
    fs::write(seatplan_dir.join("config.toml"), config_toml)
        .context("Failed to write config.toml")?;

    // Create plan.json
    JsonPlanStore::new(&args.path)
        .save(&plan)
        .context("Failed to write plan.json")?;

    tracing::info!(path = %args.path.display(), desks = plan.desks.len(), "Initialized workspace");

    // Output success message
    if output.is_json() {
        let json_output = InitOutput {
            workspace_path: args.path.display().to_string(),
            name: plan.name.clone(),
            desks: plan.desks.len(),
            groups: plan.groups.len(),
        };
        output.result(json_output)?;
    } else {
        output.success(format!("Initialized seatplan workspace at {}", args.path.display()));

        output.section("Plan");
        output.kv("Name", &plan.name);
        output.kv("Desks", plan.desks.len());
        output.kv("Groups", plan.groups.len());
    }

    Ok(())
}
