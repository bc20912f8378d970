//! One-line formatters shared by every command.

use super::theme::{Theme, ARROW, BULLET, CHECK_ICON, TOOL_ICON, WARNING_ICON};

/// Lines of the iteration prompt shown before it is folded.
const PROMPT_PREVIEW_LINES: usize = 5;

/// `● Name context`
pub fn tool_call(t: &Theme, name: &str, context: &str) -> String {
    let icon = t.muted(TOOL_ICON);
    let name = t.accent(name);
    if context.is_empty() {
        format!("{icon} {name}")
    } else {
        format!("{icon} {name} {}", t.muted(context))
    }
}

pub fn error(t: &Theme, msg: &str) -> String {
    format!("{} {}", t.error_label(), t.error(msg))
}

/// `── Title ─────…` padded with rule characters to `width`.
pub fn section(t: &Theme, title: &str, width: usize) -> String {
    let used = title.chars().count() + 4;
    let rule = width.saturating_sub(used).max(4);
    format!(
        "{} {} {}",
        t.subtle("──"),
        t.title(title),
        t.subtle(&"─".repeat(rule))
    )
}

pub fn header(t: &Theme, title: &str) -> String {
    t.title(title)
}

pub fn success(t: &Theme, msg: &str) -> String {
    t.success(&format!("{CHECK_ICON} {msg}"))
}

/// Agent result line; same look as [`success`].
pub fn done(t: &Theme, msg: &str) -> String {
    success(t, msg)
}

pub fn warning(t: &Theme, msg: &str) -> String {
    t.warning(&format!("{WARNING_ICON} {msg}"))
}

/// `  → cmd description`
pub fn next_step(t: &Theme, cmd: &str, description: &str) -> String {
    let arrow = t.muted(ARROW);
    let cmd = t.title(cmd);
    if description.is_empty() {
        format!("  {arrow} {cmd}")
    } else {
        format!("  {arrow} {cmd} {}", t.muted(description))
    }
}

pub fn key_value(t: &Theme, key: &str, value: &str) -> String {
    format!("{}  {value}", t.muted(key))
}

pub fn bullet(t: &Theme, item: &str) -> String {
    format!("  {} {item}", t.muted(BULLET))
}

/// `Ralph →` followed by the first lines of the prompt and a `[+N lines]`
/// marker when the rest is folded.
pub fn prompt(t: &Theme, prompt: &str) -> String {
    let head = t.title(&format!("Ralph {ARROW}"));
    let lines: Vec<&str> = prompt.split('\n').collect();
    if lines.len() <= PROMPT_PREVIEW_LINES {
        return format!("{head}\n{}", t.muted(prompt));
    }
    let preview = lines[..PROMPT_PREVIEW_LINES].join("\n");
    let remaining = lines.len() - PROMPT_PREVIEW_LINES;
    format!(
        "{head}\n{}\n{}",
        t.muted(&preview),
        t.subtle(&format!("[+{remaining} lines]"))
    )
}

pub fn claude_header(t: &Theme) -> String {
    t.accent(&format!("Claude {ARROW}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t() -> Theme {
        Theme::plain()
    }

    #[test]
    fn tool_call_with_and_without_context() {
        assert_eq!(tool_call(&t(), "Read", "main.rs"), "● Read main.rs");
        assert_eq!(tool_call(&t(), "TodoWrite", ""), "● TodoWrite");
    }

    #[test]
    fn status_lines() {
        assert_eq!(error(&t(), "boom"), "ERROR boom");
        assert_eq!(success(&t(), "Ralph initialized"), "✓ Ralph initialized");
        assert_eq!(done(&t(), "Success in 1.0s"), "✓ Success in 1.0s");
        assert_eq!(warning(&t(), "This will delete:"), "⚠ This will delete:");
    }

    #[test]
    fn hints_and_pairs() {
        assert_eq!(
            next_step(&t(), "ralph run", "to continue"),
            "  → ralph run to continue"
        );
        assert_eq!(next_step(&t(), "ralph init", ""), "  → ralph init");
        assert_eq!(key_value(&t(), "Branch", "login"), "Branch  login");
        assert_eq!(bullet(&t(), "prd.json"), "  • prd.json");
    }

    #[test]
    fn section_fills_width() {
        let s = section(&t(), "Iteration 2", 30);
        assert!(s.starts_with("── Iteration 2 "));
        assert_eq!(s.chars().count(), 30);
        // Narrow terminals still get a short rule.
        assert!(section(&t(), "Iteration 2", 5).ends_with("────"));
    }

    #[test]
    fn short_prompt_is_shown_whole() {
        assert_eq!(prompt(&t(), "a\nb"), "Ralph →\na\nb");
    }

    #[test]
    fn long_prompt_is_folded() {
        let text = (1..=8).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let out = prompt(&t(), &text);
        assert_eq!(
            out,
            "Ralph →\nline 1\nline 2\nline 3\nline 4\nline 5\n[+3 lines]"
        );
    }

    #[test]
    fn claude_header_text() {
        assert_eq!(claude_header(&t()), "Claude →");
    }
}
