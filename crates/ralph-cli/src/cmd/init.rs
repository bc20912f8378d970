use anyhow::Context;
use ralph_core::Project;

use super::Ctx;
use crate::ui::format;

pub fn run(ctx: &Ctx) -> anyhow::Result<()> {
    let project = Project::current()?;
    project
        .init()
        .with_context(|| format!("failed to initialize {}", project.dir().display()))?;

    let t = &ctx.theme;
    println!("{}", format::success(t, "Ralph initialized"));
    println!();
    println!("{}", format::key_value(t, "Project", &project.name()));
    println!(
        "{}",
        format::key_value(t, "Path", &project.working_dir().display().to_string())
    );
    println!();
    println!("{}", t.muted("Next steps:"));
    println!("{}", format::next_step(t, "/prd", "in Claude to create a PRD"));
    println!(
        "{}",
        format::next_step(t, "ralph run", "to start the autonomous loop")
    );
    Ok(())
}

/// `ralph home`: print the configured RALPH_HOME.
pub fn home() -> anyhow::Result<()> {
    println!("{}", ralph_core::config::ralph_home()?.display());
    Ok(())
}

/// `ralph project-dir`: print this project's data directory.
pub fn project_dir() -> anyhow::Result<()> {
    println!("{}", Project::current()?.dir().display());
    Ok(())
}
