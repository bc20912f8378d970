use anyhow::Context;
use ralph_core::{Prd, Project};
use serde::Serialize;

use super::Ctx;
use crate::output::print_json;
use crate::ui::{format, progress};

#[derive(Serialize)]
struct NextStory<'a> {
    id: &'a str,
    title: &'a str,
}

#[derive(Serialize)]
struct StatusOutput<'a> {
    project: String,
    path: String,
    data_dir: String,
    initialized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch: Option<&'a str>,
    completed: usize,
    total: usize,
    complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    next: Option<NextStory<'a>>,
}

pub fn run(ctx: &Ctx) -> anyhow::Result<()> {
    let project = Project::current()?;
    let prd = if project.is_initialized() && project.has_prd() {
        Some(project.load_prd().context("failed to load prd.json")?)
    } else {
        None
    };

    if ctx.json {
        return print_json(&status_output(&project, prd.as_ref()));
    }

    let t = &ctx.theme;
    println!("{}", format::header(t, "Project Status"));
    println!();
    println!("{}", format::key_value(t, "Project", &project.name()));

    if !project.is_initialized() {
        println!(
            "{}",
            format::key_value(t, "Status", &t.warning("Not initialized"))
        );
        println!();
        println!(
            "{}",
            format::next_step(t, "ralph init", "to initialize this project")
        );
        return Ok(());
    }

    let Some(prd) = prd else {
        println!("{}", format::key_value(t, "Status", &t.muted("No PRD")));
        println!();
        println!("{}", format::next_step(t, "/prd", "in Claude to create a PRD"));
        return Ok(());
    };

    println!("{}", format::key_value(t, "Branch", prd.short_branch()));
    let stories = format!("{} complete", prd.progress_label());
    if prd.is_complete() {
        println!(
            "{}",
            format::key_value(t, "Stories", &t.success(&format!("{stories} ✓")))
        );
    } else {
        println!("{}", format::key_value(t, "Stories", &stories));
    }

    if prd.total_count() > 0 {
        println!();
        println!(
            "{}",
            progress::bar(t, prd.completed_count(), prd.total_count(), progress::BAR_WIDTH)
        );
    }
    println!();

    if prd.is_complete() {
        println!("{}", format::success(t, "All stories complete!"));
        println!(
            "{}",
            format::next_step(t, "ralph archive", "to archive and start fresh")
        );
    } else {
        if let Some(next) = prd.next_incomplete() {
            println!(
                "{}",
                format::key_value(t, "Next", &format!("[{}] {}", next.id, next.title))
            );
        }
        println!();
        println!("{}", format::next_step(t, "ralph run", "to continue"));
    }
    Ok(())
}

fn status_output<'a>(project: &Project, prd: Option<&'a Prd>) -> StatusOutput<'a> {
    StatusOutput {
        project: project.name(),
        path: project.working_dir().display().to_string(),
        data_dir: project.dir().display().to_string(),
        initialized: project.is_initialized(),
        branch: prd.map(|p| p.branch_name.as_str()),
        completed: prd.map_or(0, |p| p.completed_count()),
        total: prd.map_or(0, |p| p.total_count()),
        complete: prd.is_some_and(|p| p.is_complete()),
        next: prd.and_then(|p| p.next_incomplete()).map(|s| NextStory {
            id: &s.id,
            title: &s.title,
        }),
    }
}
