//! Clear command implementation

use super::{plan_update, Workspace};
use crate::cli::ClearArgs;
use crate::output::OutputWriter;
use crate::output_types::ClearOutput;
use anyhow::Result;

pub fn execute(_args: ClearArgs, output: &OutputWriter, dry_run: bool) -> Result<()> {
    let mut workspace = Workspace::open()?;
    let cleared = workspace.plan.clear_assignments();

    let action = plan_update(format!("Empty {} unlocked desks", cleared));
    if !workspace.commit(output, dry_run, action)? {
        return Ok(());
    }

    if output.is_json() {
        output.result(ClearOutput { cleared })?;
    } else {
        output.success(format!("Cleared {} desks; locked desks kept their students", cleared));
    }

    Ok(())
}
