use ralph_core::project::{list_projects, project_info};
use ralph_core::ProjectInfo;

use super::Ctx;
use crate::output::{ellipsize, print_json, table};
use crate::ui::format;

const MAX_NAME_LEN: usize = 50;
const MIN_NAME_LEN: usize = 20;
const BRANCH_LEN: usize = 15;

pub fn run(ctx: &Ctx) -> anyhow::Result<()> {
    let home = ralph_core::config::ralph_home()?;
    let infos: Vec<ProjectInfo> = list_projects(&home)?
        .iter()
        .map(|id| project_info(&home, id))
        .collect();

    if ctx.json {
        return print_json(&infos);
    }

    let t = &ctx.theme;
    if infos.is_empty() {
        println!("No projects found.");
        println!(
            "{}",
            format::next_step(t, "ralph init", "in a project directory to get started")
        );
        return Ok(());
    }

    println!("{}", format::header(t, "Ralph Projects"));
    println!();
    for line in table(&["Project", "Branch", "Stories", "Archives"], &rows(&infos)) {
        println!("{line}");
    }
    Ok(())
}

fn rows(infos: &[ProjectInfo]) -> Vec<Vec<String>> {
    let name_len = infos
        .iter()
        .map(|i| i.display_name.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(MIN_NAME_LEN, MAX_NAME_LEN);

    infos
        .iter()
        .map(|info| {
            let stories = match info.stories() {
                Some(s) if info.is_complete => format!("{s} ✓"),
                Some(s) => s,
                None => "-".into(),
            };
            vec![
                ellipsize(&info.display_name, name_len),
                info.branch
                    .as_deref()
                    .map(|b| ellipsize(b, BRANCH_LEN))
                    .unwrap_or_else(|| "-".into()),
                stories,
                info.archive_count.to_string(),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &str, branch: Option<&str>, done: usize, total: usize) -> ProjectInfo {
        ProjectInfo {
            id: name.into(),
            display_name: name.into(),
            branch: branch.map(String::from),
            completed: done,
            total,
            is_complete: total > 0 && done == total,
            archive_count: 2,
        }
    }

    #[test]
    fn rows_mark_complete_and_missing() {
        let rows = rows(&[
            info("alpha", Some("checkout"), 3, 3),
            info("beta", None, 0, 0),
            info("gamma", Some("a-really-long-branch-name"), 1, 4),
        ]);
        assert_eq!(rows[0], vec!["alpha", "checkout", "3/3 ✓", "2"]);
        assert_eq!(rows[1], vec!["beta", "-", "-", "2"]);
        assert_eq!(rows[2][1], "a-really-lon...");
        assert_eq!(rows[2][2], "1/4");
    }

    #[test]
    fn long_names_are_capped() {
        let long = "x".repeat(80);
        let rows = rows(&[info(&long, None, 0, 0)]);
        assert_eq!(rows[0][0].chars().count(), MAX_NAME_LEN);
    }
}
