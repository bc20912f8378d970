use std::io::Write;

use ralph_agent::{Category, DisplayEvent};
use ralph_core::UserStory;

use super::format;
use super::progress;
use super::theme::Theme;

/// Inline renderer for `ralph run`.
///
/// Every line goes to the terminal styled with the screen theme, and to an
/// in-memory transcript rendered without colour. The transcript is what gets
/// saved as the run log.
pub struct RunView {
    screen: Theme,
    plain: Theme,
    out: Box<dyn Write>,
    transcript: String,
    width: usize,
    agent_header_shown: bool,
}

impl RunView {
    pub fn new(screen: Theme, out: Box<dyn Write>, width: usize) -> Self {
        Self {
            screen,
            plain: Theme::plain(),
            out,
            transcript: String::new(),
            width,
            agent_header_shown: false,
        }
    }

    pub fn stdout(screen: Theme) -> Self {
        Self::new(
            screen,
            Box::new(std::io::stdout()),
            super::theme::terminal_width(),
        )
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Render `f` once per theme and emit the results.
    fn emit(&mut self, f: impl Fn(&Theme) -> String) {
        let screen = f(&self.screen);
        if let Err(e) = writeln!(self.out, "{screen}").and_then(|_| self.out.flush()) {
            tracing::debug!(error = %e, "terminal write failed");
        }
        self.transcript.push_str(&f(&self.plain));
        self.transcript.push('\n');
    }

    pub fn blank(&mut self) {
        self.emit(|_| String::new());
    }

    pub fn iteration(&mut self, n: usize, max: usize) {
        let title = format!("Iteration {n}/{max}");
        let width = self.width;
        self.emit(|t| format::section(t, &title, width));
    }

    pub fn story(&mut self, branch: &str, next: Option<&UserStory>) {
        if !branch.is_empty() {
            self.emit(|t| format::key_value(t, "Branch", branch));
        }
        if let Some(story) = next {
            let label = if story.title.is_empty() {
                story.id.clone()
            } else {
                format!("{} - {}", story.id, story.title)
            };
            self.emit(|t| format::key_value(t, "Story ", &label));
        }
    }

    pub fn progress(&mut self, completed: usize, total: usize) {
        self.emit(|t| progress::stories(t, completed, total));
    }

    /// Show the prompt preview. The next agent event re-opens the
    /// `Claude →` header.
    pub fn prompt(&mut self, text: &str) {
        self.emit(|t| format::prompt(t, text));
        self.blank();
        self.agent_header_shown = false;
    }

    pub fn event(&mut self, event: &DisplayEvent) {
        if event.is_empty() {
            return;
        }
        if !self.agent_header_shown {
            self.emit(format::claude_header);
            self.agent_header_shown = true;
        }
        match event.category {
            Category::ToolCall => {
                let name = event.tool_name.as_deref().unwrap_or_default();
                let context = event.tool_context.as_deref().unwrap_or_default();
                self.emit(|t| format::tool_call(t, name, context));
            }
            Category::Result => self.emit(|t| format::done(t, &event.text)),
            Category::Error => self.emit(|t| format::error(t, &event.text)),
            Category::PlainText => self.emit(|_| event.text.clone()),
            Category::Nothing => {}
        }
    }

    pub fn success(&mut self, msg: &str) {
        self.emit(|t| format::success(t, msg));
    }

    pub fn warning(&mut self, msg: &str) {
        self.emit(|t| format::warning(t, msg));
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> RunView {
        RunView::new(Theme::colored(), Box::new(std::io::sink()), 40)
    }

    #[test]
    fn transcript_is_plain_text() {
        let mut v = view();
        v.prompt("Do the next story");
        v.event(&DisplayEvent::tool_call("Read", "main.rs"));
        v.event(&DisplayEvent::plain("Looks good"));
        v.event(&DisplayEvent::result("Success in 2.0s (1 turns)"));
        assert_eq!(
            v.transcript(),
            "Ralph →\nDo the next story\n\nClaude →\n● Read main.rs\nLooks good\n✓ Success in 2.0s (1 turns)\n"
        );
        assert!(!v.transcript().contains('\u{1b}'));
    }

    #[test]
    fn agent_header_once_per_prompt() {
        let mut v = view();
        v.prompt("one");
        v.event(&DisplayEvent::plain("a"));
        v.event(&DisplayEvent::plain("b"));
        v.prompt("two");
        v.event(&DisplayEvent::plain("c"));
        assert_eq!(v.transcript().matches("Claude →").count(), 2);
    }

    #[test]
    fn empty_events_are_skipped() {
        let mut v = view();
        v.event(&DisplayEvent::nothing());
        assert_eq!(v.transcript(), "");
    }

    #[test]
    fn errors_and_story_info() {
        let mut v = view();
        let story = UserStory {
            id: "US-002".into(),
            title: "Submit form".into(),
            ..Default::default()
        };
        v.story("ralph/login", Some(&story));
        v.event(&DisplayEvent::error("Command error: agent exited with code 1"));
        assert_eq!(
            v.transcript(),
            "Branch  ralph/login\nStory   US-002 - Submit form\nClaude →\nERROR Command error: agent exited with code 1\n"
        );
    }

    #[test]
    fn iteration_rule_uses_width() {
        let mut v = view();
        v.iteration(2, 25);
        let line = v.transcript().trim_end();
        assert!(line.starts_with("── Iteration 2/25 "));
        assert_eq!(line.chars().count(), 40);
    }
}
