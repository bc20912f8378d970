pub mod archive;
pub mod clean;
pub mod init;
pub mod list;
pub mod logs;
pub mod picker;
pub mod prd;
pub mod run;
pub mod setup;
pub mod status;

use std::io::{BufRead, Write};

use crate::ui::Theme;

/// Settings every command receives from the global flags.
#[derive(Debug, Clone)]
pub struct Ctx {
    pub theme: Theme,
    pub json: bool,
    /// Agent executable (`--agent-bin` / `RALPH_AGENT_BIN`).
    pub agent_bin: String,
}

/// Print `question` and read one trimmed line from stdin.
/// `None` on end of input.
pub fn ask(question: &str) -> anyhow::Result<Option<String>> {
    let stdin = std::io::stdin();
    read_answer(&mut stdin.lock(), &mut std::io::stdout(), question)
}

pub fn read_answer(
    input: &mut impl BufRead,
    out: &mut impl Write,
    question: &str,
) -> anyhow::Result<Option<String>> {
    write!(out, "{question}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// `y` / `yes`, case-insensitive.
pub fn is_yes(answer: Option<&str>) -> bool {
    matches!(
        answer.map(|a| a.to_ascii_lowercase()).as_deref(),
        Some("y" | "yes")
    )
}
