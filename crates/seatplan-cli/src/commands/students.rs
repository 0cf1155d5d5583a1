//! Roster commands

use super::{plan_update, Workspace};
use crate::cli::{StudentsArgs, StudentsCommand};
use crate::output::OutputWriter;
use crate::output_types::StudentRow;
use anyhow::{bail, Context, Result};
use seatplan_core::models::Gender;
use std::fs;

pub fn execute(args: StudentsArgs, output: &OutputWriter, dry_run: bool) -> Result<()> {
    let mut workspace = Workspace::open()?;

    match args.command {
        StudentsCommand::Add { entries, file } => {
            let mut lines = Vec::new();
            if let Some(path) = file {
                let text = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read roster {}", path.display()))?;
                lines.push(text);
            }
            lines.extend(entries);
            if lines.iter().all(|line| line.trim().is_empty()) {
                bail!("No students given. Pass roster lines or --file");
            }

            let added = workspace.plan.add_students(&lines.join("\n"))?;
            let action = plan_update(format!("Add {} students", added.len()));
            if workspace.commit(output, dry_run, action)? {
                output.success(format!("Added {} students", added.len()));
            }
        }
        StudentsCommand::Remove { name } => {
            let removed = workspace.plan.remove_student(&name)?;
            if workspace.commit(output, dry_run, plan_update(format!("Remove {}", removed.name)))? {
                output.success(format!("Removed {}", removed.name));
            }
        }
        StudentsCommand::Gender { name, gender } => {
            let gender: Option<Gender> = gender.into();
            workspace.plan.set_gender(&name, gender)?;
            let label = gender.map_or_else(|| "not set".to_string(), |g| g.to_string());
            let action = plan_update(format!("Set gender of {} to {}", name, label));
            if workspace.commit(output, dry_run, action)? {
                output.success(format!("Gender of {} is now {}", name, label));
            }
        }
        StudentsCommand::Send { name } => {
            let is_send = workspace.plan.toggle_send(&name)?;
            let state = if is_send { "marked as SEND" } else { "no longer marked as SEND" };
            if workspace.commit(output, dry_run, plan_update(format!("{} {}", name, state)))? {
                output.success(format!("{} {}", name, state));
            }
        }
        StudentsCommand::List => {
            let plan = &workspace.plan;
            let rows: Vec<StudentRow> =
                plan.students.iter().map(|s| StudentRow::new(s, plan)).collect();
            output.table(rows)?;
        }
    }

    Ok(())
}
