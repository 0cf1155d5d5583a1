//! Status command implementation

use super::Workspace;
use crate::cli::StatusArgs;
use crate::config_loader::load_workspace_config;
use crate::output::OutputWriter;
use crate::output_types::{ConfigRow, StatusOutput};
use anyhow::Result;

pub fn execute(args: StatusArgs, output: &OutputWriter) -> Result<()> {
    let workspace = Workspace::open()?;
    let plan = &workspace.plan;
    let config = load_workspace_config(&workspace.root)?;

    let violations = plan.violations(config.proximity_threshold.value);
    let seated = plan.desks.iter().filter(|d| d.is_occupied()).count();
    let locked = plan.desks.iter().filter(|d| d.is_locked).count();

    let config_rows = args.config.then(|| {
        let mut rows: Vec<ConfigRow> = config
            .to_inspection_map()
            .into_iter()
            .map(|(key, (value, source))| ConfigRow {
                key,
                value,
                source: format!("{:?}", source),
            })
            .collect();
        rows.sort_by(|a, b| a.key.cmp(&b.key));
        rows
    });

    if output.is_json() {
        let json_output = StatusOutput {
            workspace_path: workspace.root.display().to_string(),
            name: plan.name.clone(),
            desks: plan.desks.len(),
            available_desks: plan.available_desks().count(),
            excluded_desks: plan.excluded.len(),
            locked_desks: locked,
            groups: plan.groups.len(),
            students: plan.students.len(),
            seated_students: seated,
            rules: plan.rules.len(),
            violations,
            updated_at: plan.updated_at,
            config: config_rows,
        };
        return output.result(json_output);
    }

    output.section("Seating Plan");
    output.kv("Location", workspace.root.display());
    output.kv("Name", &plan.name);
    output.kv("Last Changed", plan.updated_at.format("%Y-%m-%d %H:%M:%S UTC"));

    output.section("Room");
    output.kv("Desks", plan.desks.len());
    output.kv("Excluded", plan.excluded.len());
    output.kv("Locked", locked);
    output.kv("Groups", plan.groups.len());

    output.section("Class");
    output.kv("Students", plan.students.len());
    output.kv("Seated", seated);
    output.kv("Separation Rules", plan.rules.len());

    let unseated = plan.unseated_students();
    if !unseated.is_empty() && seated > 0 {
        let names: Vec<&str> = unseated.iter().map(|s| s.name.as_str()).collect();
        output.info(format!("Not seated: {}", names.join(", ")));
    }
    if seated == 0 && !plan.students.is_empty() {
        output.info("Run 'seatplan assign' to seat the class");
    }

    for violation in &violations {
        output.warning(format!(
            "{} and {} sit together at desks {} and {}",
            violation.students.0, violation.students.1, violation.desks.0, violation.desks.1
        ));
    }

    if let Some(rows) = config_rows {
        output.section("Configuration");
        output.table(rows)?;
    }

    Ok(())
}
