use std::time::Duration;

use anyhow::{bail, Context};
use futures::StreamExt;
use ralph_agent::{AgentOptions, AgentProcess, DisplayEvent};
use ralph_core::{prompt, BranchChange, Project};

use super::{archive, Ctx};
use crate::ui::{format, RunView};

/// How the iteration loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Complete,
    Cancelled,
    Exhausted,
}

/// `ralph run`: feed the prompt to the agent until every story passes.
pub fn run(ctx: &Ctx, max_iterations: usize, sleep: Duration) -> anyhow::Result<()> {
    let t = &ctx.theme;
    let project = Project::current()?;
    project.require_initialized()?;
    let prd = project.load_prd()?;

    if let BranchChange::Changed { from, to, archive } = project.check_branch_change()? {
        println!(
            "{}",
            format::warning(t, &format!("Branch changed from {from} to {to}"))
        );
        println!(
            "{}",
            format::key_value(t, "Archived", &archive.dir.display().to_string())
        );
        println!();
    }

    // Fail before spawning anything if the template or agent is missing.
    prompt::load_template(project.ralph_home())?;
    let program = which::which(&ctx.agent_bin)
        .with_context(|| format!("'{}' not found in PATH", ctx.agent_bin))?;
    let opts = AgentOptions::default()
        .with_program(program.to_string_lossy())
        .with_cwd(project.working_dir());

    let mut view = RunView::stdout(ctx.theme);
    view.progress(prd.completed_count(), prd.total_count());

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let outcome = runtime.block_on(run_loop(&project, &opts, &mut view, max_iterations, sleep));

    let branch = project
        .load_prd()
        .map(|p| p.branch_name)
        .unwrap_or(prd.branch_name);
    save_log(&project, &branch, &view);

    match outcome? {
        Outcome::Complete => {
            println!();
            match project.archive() {
                Ok(report) => archive::print_report(t, &report),
                Err(e) => eprintln!("{}", format::warning(t, &format!("auto-archive failed: {e}"))),
            }
            Ok(())
        }
        Outcome::Cancelled => Ok(()),
        Outcome::Exhausted => bail!("max iterations reached ({max_iterations})"),
    }
}

async fn run_loop(
    project: &Project,
    opts: &AgentOptions,
    view: &mut RunView,
    max_iterations: usize,
    sleep: Duration,
) -> anyhow::Result<Outcome> {
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    for i in 1..=max_iterations {
        let prd = project.load_prd()?;
        view.blank();
        view.iteration(i, max_iterations);
        view.story(&prd.branch_name, prd.next_incomplete());

        let text = project.render_prompt()?;
        view.prompt(&text);

        let mut agent = AgentProcess::spawn(&text, opts)?;
        tracing::info!(iteration = i, pid = ?agent.id(), "iteration started");
        loop {
            tokio::select! {
                event = agent.next() => match event {
                    Some(event) => view.event(&event),
                    None => break,
                },
                _ = &mut ctrl_c => {
                    agent.kill().await;
                    view.blank();
                    view.warning("Interrupted");
                    return Ok(Outcome::Cancelled);
                }
            }
        }
        if let Err(e) = agent.wait().await {
            view.event(&DisplayEvent::error(format!("Command error: {e}")));
        }

        match project.load_prd() {
            Ok(prd) => {
                view.blank();
                view.progress(prd.completed_count(), prd.total_count());
                if prd.is_complete() {
                    view.success("All stories complete!");
                    return Ok(Outcome::Complete);
                }
            }
            Err(e) => view.warning(&format!("Could not reload prd.json: {e}")),
        }

        if i < max_iterations {
            tokio::select! {
                _ = tokio::time::sleep(sleep) => {}
                _ = &mut ctrl_c => {
                    view.warning("Interrupted");
                    return Ok(Outcome::Cancelled);
                }
            }
        }
    }

    view.blank();
    view.warning(&format!("Reached {max_iterations} iterations"));
    Ok(Outcome::Exhausted)
}

fn save_log(project: &Project, branch: &str, view: &RunView) {
    if view.transcript().is_empty() {
        return;
    }
    let branch = if branch.is_empty() { "unknown" } else { branch };
    match project.save_run_log(branch, view.transcript()) {
        Ok(path) => tracing::info!(path = %path.display(), "run log saved"),
        Err(e) => eprintln!("warning: failed to save run log: {e}"),
    }
}
