use ralph_core::{paths, Project};

use super::{ask, is_yes, Ctx};
use crate::ui::format;

pub fn run(ctx: &Ctx, all: bool, yes: bool) -> anyhow::Result<()> {
    let project = Project::current()?;
    let t = &ctx.theme;

    println!("{}", format::warning(t, "This will delete:"));
    println!();
    if all {
        println!("{}", format::bullet(t, "All project data including archives"));
        println!(
            "{}",
            format::bullet(t, &project.dir().display().to_string())
        );
    } else {
        for file in paths::RUN_FILES {
            println!("{}", format::bullet(t, file));
        }
        println!();
        println!("{}", t.muted("Archives will be preserved."));
    }
    println!();

    if !yes {
        println!("{}", t.muted("This cannot be undone."));
        let answer = ask(&t.warning("Continue? [y/N] "))?;
        if !is_yes(answer.as_deref()) {
            println!("{}", t.muted("Cancelled."));
            return Ok(());
        }
        println!();
    }

    project.clean(all)?;
    if all {
        println!("{}", format::success(t, "Removed all project data"));
    } else {
        println!("{}", format::success(t, "Cleaned current run files"));
    }
    Ok(())
}
