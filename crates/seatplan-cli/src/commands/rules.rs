//! Separation rule commands

use super::{plan_update, Workspace};
use crate::cli::{RulesArgs, RulesCommand};
use crate::output::OutputWriter;
use crate::output_types::RuleRow;
use anyhow::Result;
use seatplan_core::models::RuleId;

pub fn execute(args: RulesArgs, output: &OutputWriter, dry_run: bool) -> Result<()> {
    let mut workspace = Workspace::open()?;

    match args.command {
        RulesCommand::Add { students, description } => {
            let names: Vec<&str> = students.iter().map(String::as_str).collect();
            let id = workspace.plan.add_rule(&names, description)?;
            let summary = format!("Keep apart: {}", names.join(", "));
            if workspace.commit(output, dry_run, plan_update(summary.clone()))? {
                output.success(format!("Added rule {} ({})", id, summary));
            }
        }
        RulesCommand::Remove { id } => {
            let rule = workspace.plan.remove_rule(RuleId(id))?;
            let action = plan_update(format!("Remove rule {}", rule.id));
            if workspace.commit(output, dry_run, action)? {
                output.success(format!("Removed rule {}", rule.id));
            }
        }
        RulesCommand::List => {
            let rows: Vec<RuleRow> = workspace.plan.rules.iter().map(RuleRow::from).collect();
            output.table(rows)?;
        }
    }

    Ok(())
}
