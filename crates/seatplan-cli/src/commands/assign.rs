//! Assign command implementation

use super::{plan_update, Workspace};
use crate::cli::AssignArgs;
use crate::config_loader::load_workspace_config_with_overrides;
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::{AssignOutput, SeatRow};
use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seatplan_core::config::CliConfigOverrides;

pub fn execute(args: AssignArgs, output: &OutputWriter, dry_run: bool) -> Result<()> {
    let mut workspace = Workspace::open()?;

    if let Some(threshold) = args.threshold {
        if !(threshold.is_finite() && threshold >= 0.0) {
            let reason = format!("{} is not a non-negative distance", threshold);
            return Err(errors::invalid_config("proximity_threshold", &reason).into());
        }
    }

    // Flags only switch features on; leave them unset so file and env values stand
    let overrides = CliConfigOverrides {
        proximity_threshold: args.threshold,
        fill_from_front: args.fill_from_front.then_some(true),
        alternate_gender: args.alternate_gender.then_some(true),
        search_limit: args.search_limit,
        seed: args.seed,
    };
    let config = load_workspace_config_with_overrides(&workspace.root, overrides)?;
    let options = config.solve_options();

    // Draw a seed when none is configured so every run can be replayed
    let seed = config.seed.value.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);

    let report = workspace.plan.auto_assign(&options, &mut rng)?;
    tracing::info!(
        seed,
        placed = report.placed,
        explored = report.explored,
        "Auto-assign succeeded"
    );

    let seats = SeatRow::from_plan(&workspace.plan);
    let action = seats.iter().fold(
        plan_update(format!("Seat {} students (seed {})", report.placed, seed)),
        |action, seat| action.with_detail(format!("Desk {}: {}", seat.desk, seat.student)),
    );
    if !workspace.commit(output, dry_run, action)? {
        return Ok(());
    }

    if output.is_json() {
        output.result(AssignOutput {
            placed: report.placed,
            locked: report.locked,
            explored: report.explored,
            seed,
            seats,
        })?;
    } else {
        output.success(format!(
            "Seated {} students ({} on locked desks)",
            report.placed, report.locked
        ));
        output.kv("Seed", seed);
        output.kv("Placements tried", report.explored);
        output.section("Seats");
        output.table(seats)?;
    }

    Ok(())
}
