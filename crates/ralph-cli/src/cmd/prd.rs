use std::process::Command;

use anyhow::{bail, Context};
use ralph_core::Project;

use super::Ctx;

/// `ralph prd`: open an interactive agent session primed to write a PRD.
pub fn run(ctx: &Ctx) -> anyhow::Result<()> {
    let project = Project::current()?;
    project.require_initialized()?;

    let program = which::which(&ctx.agent_bin)
        .with_context(|| format!("'{}' not found in PATH", ctx.agent_bin))?;

    println!("{}", ctx.theme.muted("Launching Claude for PRD creation..."));
    tracing::debug!(program = %program.display(), "launching interactive agent");

    let status = Command::new(&program)
        .arg("--system-prompt")
        .arg(system_prompt(&project))
        .current_dir(project.working_dir())
        .env_remove("CLAUDECODE")
        .status()
        .with_context(|| format!("failed to start {}", program.display()))?;

    if !status.success() {
        match status.code() {
            Some(code) => bail!("claude exited with code {code}"),
            None => bail!("claude terminated by signal"),
        }
    }
    Ok(())
}

fn system_prompt(project: &Project) -> String {
    let dir = project.dir().display();
    format!(
        "You are helping the user plan a feature for Ralph, an autonomous coding loop.\n\
         Ralph's data directory for this project is {dir}.\n\
         Use the /prd skill to write a product requirements document to {dir}/prd.md, \
         then the /ralph skill to convert it into {dir}/prd.json.\n\
         Keep each user story small enough to finish in one iteration."
    )
}
