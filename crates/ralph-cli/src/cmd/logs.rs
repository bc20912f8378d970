use anyhow::Context;
use ralph_core::project::find_all_logs;
use ralph_core::LogEntry;

use super::{ask, Ctx};
use crate::output::print_json;
use crate::ui::format;

/// Logs shown in the selection list.
const MAX_LISTED: usize = 15;

/// List saved run logs, newest first, and print the chosen one.
///
/// With `index` the log is printed directly; otherwise the list is shown and
/// a number is read from stdin.
pub fn run(ctx: &Ctx, index: Option<usize>) -> anyhow::Result<()> {
    let home = ralph_core::config::ralph_home()?;
    let logs = find_all_logs(&home)?;
    let t = &ctx.theme;

    if ctx.json {
        return print_json(&logs);
    }

    if logs.is_empty() {
        println!("{}", t.muted("No logs found."));
        println!("{}", format::next_step(t, "ralph run", "to create some logs"));
        return Ok(());
    }

    let choice = match index {
        Some(n) => n,
        None => {
            println!("{}", format::header(t, "Ralph Logs"));
            println!();
            for (i, log) in logs.iter().take(MAX_LISTED).enumerate() {
                println!("{}", list_line(i + 1, log));
            }
            if logs.len() > MAX_LISTED {
                println!(
                    "{}",
                    t.subtle(&format!("  … {} older", logs.len() - MAX_LISTED))
                );
            }
            println!();
            match ask(&t.muted("Select a log (number, Enter to quit): "))?
                .filter(|a| !a.is_empty())
            {
                Some(answer) => answer
                    .parse()
                    .with_context(|| format!("not a log number: {answer}"))?,
                None => return Ok(()),
            }
        }
    };

    let log = pick(&logs, choice)?;
    let content = std::fs::read_to_string(&log.path)
        .with_context(|| format!("failed to read {}", log.path.display()))?;
    println!();
    print!("{content}");
    Ok(())
}

fn list_line(n: usize, log: &LogEntry) -> String {
    format!("  {n:>3}  {:<19}  {}", log.date, log.display_name)
}

/// 1-based selection.
fn pick(logs: &[LogEntry], n: usize) -> anyhow::Result<&LogEntry> {
    n.checked_sub(1)
        .and_then(|i| logs.get(i))
        .with_context(|| format!("no log #{n}; there are {} logs", logs.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(name: &str) -> LogEntry {
        LogEntry {
            path: PathBuf::from(format!("/logs/{name}.log")),
            display_name: format!("app/{name}"),
            project: "app".into(),
            date: "2026-01-11-15-04-05".into(),
        }
    }

    #[test]
    fn pick_is_one_based() {
        let logs = vec![entry("a"), entry("b")];
        assert_eq!(pick(&logs, 1).unwrap().display_name, "app/a");
        assert_eq!(pick(&logs, 2).unwrap().display_name, "app/b");
        assert!(pick(&logs, 0).is_err());
        assert!(pick(&logs, 3).is_err());
    }

    #[test]
    fn list_line_aligns_columns() {
        assert_eq!(
            list_line(1, &entry("login")),
            "    1  2026-01-11-15-04-05  app/login"
        );
    }
}
