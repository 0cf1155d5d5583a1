//! Desk editing commands

use super::{plan_update, Workspace};
use crate::cli::{DeskArgs, DeskCommand};
use crate::output::OutputWriter;
use crate::output_types::DeskRow;
use anyhow::Result;
use seatplan_core::models::{CanvasBounds, DeskId};

pub fn execute(args: DeskArgs, output: &OutputWriter, dry_run: bool) -> Result<()> {
    let mut workspace = Workspace::open()?;
    let plan = &mut workspace.plan;

    let (action, message) = match args.command {
        DeskCommand::Add { x, y, width, height } => {
            let id = plan.add_desk(x, y, width, height)?;
            (
                plan_update(format!("Add desk {}", id)).with_detail(format!("At ({}, {})", x, y)),
                format!("Added desk {}", id),
            )
        }
        DeskCommand::Remove { id } => {
            let desk = plan.remove_desk(DeskId(id))?;
            let mut message = format!("Removed desk {}", desk.id);
            if let Some(student) = &desk.student {
                message.push_str(&format!("; {} is now unseated", student));
            }
            (plan_update(format!("Remove desk {}", desk.id)), message)
        }
        DeskCommand::Move { id, dx, dy } => {
            let id = DeskId(id);
            let grouped = plan.desk(id)?.group.is_some();
            let (dx, dy) = plan.move_desk(id, dx, dy, CanvasBounds::default())?;
            let target = if grouped {
                format!("desk {} and its group", id)
            } else {
                format!("desk {}", id)
            };
            (
                plan_update(format!("Move {} by ({}, {})", target, dx, dy)),
                format!("Moved {} by ({}, {})", target, dx, dy),
            )
        }
        DeskCommand::Exclude { id } => {
            let excluded = plan.toggle_excluded(DeskId(id))?;
            let state = if excluded { "excluded" } else { "back in use" };
            (
                plan_update(format!("Mark desk {} {}", id, state)),
                format!("Desk {} is {}", id, state),
            )
        }
        DeskCommand::Lock { id } => {
            plan.lock_desk(DeskId(id))?;
            (plan_update(format!("Lock desk {}", id)), format!("Locked desk {}", id))
        }
        DeskCommand::Unlock { id } => {
            plan.unlock_desk(DeskId(id))?;
            (plan_update(format!("Unlock desk {}", id)), format!("Unlocked desk {}", id))
        }
        DeskCommand::Assign { id, student } => {
            plan.assign_student(DeskId(id), &student)?;
            (
                plan_update(format!("Seat {} at desk {}", student, id)),
                format!("Seated {} at desk {}", student, id),
            )
        }
        DeskCommand::Unassign { id } => {
            let message = match plan.unassign_desk(DeskId(id))? {
                Some(student) => format!("Desk {} emptied; {} is now unseated", id, student),
                None => format!("Desk {} was already empty", id),
            };
            (plan_update(format!("Empty desk {}", id)), message)
        }
        DeskCommand::List => {
            let plan = &workspace.plan;
            let rows: Vec<DeskRow> = plan.desks.iter().map(|d| DeskRow::new(d, plan)).collect();
            return output.table(rows);
        }
    };

    if workspace.commit(output, dry_run, action)? {
        output.success(message);
    }

    Ok(())
}
