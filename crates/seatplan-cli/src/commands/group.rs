//! Desk grouping commands

use super::{plan_update, Workspace};
use crate::cli::{GroupArgs, GroupCommand};
use crate::output::OutputWriter;
use anyhow::Result;
use seatplan_core::models::{DeskId, GroupId};

pub fn execute(args: GroupArgs, output: &OutputWriter, dry_run: bool) -> Result<()> {
    let mut workspace = Workspace::open()?;

    match args.command {
        GroupCommand::Create { desks, name } => {
            let ids: Vec<DeskId> = desks.into_iter().map(DeskId).collect();
            let id = workspace.plan.create_group(&ids, name.clone())?;
            let members = ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
            let action = plan_update(format!("Group desks {} as {}", members, name));
            if workspace.commit(output, dry_run, action)? {
                output.success(format!("Created group {} ({}) from desks {}", id, name, members));
            }
        }
        GroupCommand::Dissolve { id } => {
            let id = GroupId(id);
            let name = workspace.plan.group(id)?.name.clone();
            workspace.plan.dissolve_group(id)?;
            if workspace.commit(output, dry_run, plan_update(format!("Dissolve group {}", id)))? {
                output.success(format!("Dissolved group {} ({})", id, name));
            }
        }
    }

    Ok(())
}
