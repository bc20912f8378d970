use std::io::{BufRead, Write};

use crate::ui::{format, Theme};

/// Entries of the menu shown when `ralph` runs without a subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Run,
    Init,
    Status,
    Prd,
    List,
    Logs,
    Archive,
    Clean,
    Setup,
    Help,
}

pub const CHOICES: [(Choice, &str, &str); 10] = [
    (Choice::Run, "run", "Start the autonomous loop"),
    (Choice::Init, "init", "Initialize this project"),
    (Choice::Status, "status", "Show PRD progress"),
    (Choice::Prd, "prd", "Create a PRD with Claude"),
    (Choice::List, "list", "List all projects"),
    (Choice::Logs, "logs", "View run logs"),
    (Choice::Archive, "archive", "Archive the current run"),
    (Choice::Clean, "clean", "Remove run files"),
    (Choice::Setup, "setup", "Configure RALPH_HOME"),
    (Choice::Help, "help", "Show usage"),
];

/// Print the menu and read a selection by number or name.
/// `None` on empty input, end of input, or an unknown answer.
pub fn choose(
    input: &mut impl BufRead,
    out: &mut impl Write,
    t: &Theme,
) -> anyhow::Result<Option<Choice>> {
    writeln!(out, "{}", format::header(t, "Ralph"))?;
    writeln!(out)?;
    for (i, (_, name, desc)) in CHOICES.iter().enumerate() {
        writeln!(
            out,
            "  {} {:<8} {}",
            t.accent(&format!("{:>2}.", i + 1)),
            name,
            t.muted(desc)
        )?;
    }
    writeln!(out)?;

    let Some(answer) = super::read_answer(input, out, "Select a command: ")? else {
        return Ok(None);
    };
    let choice = parse(&answer);
    if choice.is_none() && !answer.is_empty() {
        writeln!(out, "{}", format::warning(t, &format!("Unknown selection: {answer}")))?;
    }
    Ok(choice)
}

fn parse(answer: &str) -> Option<Choice> {
    let answer = answer.trim();
    if let Ok(n) = answer.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| CHOICES.get(i)).map(|c| c.0);
    }
    CHOICES
        .iter()
        .find(|(_, name, _)| name.eq_ignore_ascii_case(answer))
        .map(|c| c.0)
}
