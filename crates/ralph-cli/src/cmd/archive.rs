use ralph_core::{ArchiveReport, Project};

use super::Ctx;
use crate::ui::{format, Theme};

pub fn run(ctx: &Ctx) -> anyhow::Result<()> {
    let project = Project::current()?;
    let report = project.archive()?;
    print_report(&ctx.theme, &report);
    Ok(())
}

pub fn print_report(t: &Theme, report: &ArchiveReport) {
    println!("{}", format::success(t, "Archive created"));
    println!();
    println!(
        "{}",
        format::key_value(t, "Archived", &report.files.join(", "))
    );
    println!(
        "{}",
        format::key_value(t, "Location", &report.dir.display().to_string())
    );
    println!();
    println!(
        "{}",
        format::next_step(t, "/prd", "in Claude to start a new feature")
    );
}
