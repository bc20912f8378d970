use serde::Serialize;

use crate::repair::complete_json_into;
use crate::tools::{capitalize, tool_context};
use crate::types::{AssistantEvent, ContentBlock, EventKind, ResultSummary};

// ─── DisplayEvent ─────────────────────────────────────────────────────────

/// How a display line should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    PlainText,
    ToolCall,
    Result,
    Error,
    /// The line produced nothing worth showing.
    Nothing,
}

/// One human-readable line derived from one line of agent output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayEvent {
    pub text: String,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_context: Option<String>,
}

impl DisplayEvent {
    pub fn nothing() -> Self {
        Self {
            text: String::new(),
            category: Category::Nothing,
            tool_name: None,
            tool_context: None,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: Category::PlainText,
            tool_name: None,
            tool_context: None,
        }
    }

    pub fn tool_call(name: impl Into<String>, context: impl Into<String>) -> Self {
        let context = context.into();
        Self {
            text: context.clone(),
            category: Category::ToolCall,
            tool_name: Some(name.into()),
            tool_context: Some(context),
        }
    }

    pub fn result(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: Category::Result,
            tool_name: None,
            tool_context: None,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: Category::Error,
            tool_name: None,
            tool_context: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.category == Category::Nothing
    }
}

// ─── ParseOutcome ─────────────────────────────────────────────────────────

/// The parser's verdict on a line, keeping "nothing to show" apart from
/// "could not understand".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    NoOutput,
    Display(DisplayEvent),
    /// Not JSON even after repair; carries the trimmed line.
    Unparseable(String),
}

impl ParseOutcome {
    /// Collapse to a [`DisplayEvent`]; unparseable lines become plain text.
    pub fn into_display(self) -> DisplayEvent {
        match self {
            ParseOutcome::NoOutput => DisplayEvent::nothing(),
            ParseOutcome::Display(event) => event,
            ParseOutcome::Unparseable(raw) => DisplayEvent::plain(raw),
        }
    }
}

// ─── StreamEventParser ────────────────────────────────────────────────────

/// Turns stream-json lines from the agent into [`DisplayEvent`]s.
///
/// One parser is created per output pipe. It never fails: malformed lines are
/// shown raw and unexpected shapes produce nothing. The only state it keeps is
/// a scratch buffer for JSON repair, cleared at the start of every line.
#[derive(Debug, Default)]
pub struct StreamEventParser {
    repair_buf: String,
}

impl StreamEventParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one already-delimited line.
    pub fn parse_line(&mut self, line: &str) -> DisplayEvent {
        self.parse(line).into_display()
    }

    /// Parse one line, reporting unparseable input separately.
    pub fn parse(&mut self, line: &str) -> ParseOutcome {
        let line = line.trim();
        if line.is_empty() {
            return ParseOutcome::NoOutput;
        }

        complete_json_into(line, &mut self.repair_buf);
        let repaired = self.repair_buf.len() != line.len();
        let value: serde_json::Value = match serde_json::from_str(&self.repair_buf) {
            Ok(v) => v,
            Err(e) => {
                tracing::trace!(error = %e, "unparseable agent line");
                return ParseOutcome::Unparseable(line.to_string());
            }
        };
        // Repair only exists to finish cut-off events. A fragment that closes
        // into a bare string or number was never an event.
        if repaired && !value.is_object() {
            return ParseOutcome::Unparseable(line.to_string());
        }

        let kind = EventKind::from_value(&value);
        tracing::trace!(kind = kind.as_str(), "agent event");
        match kind {
            EventKind::Assistant => parse_assistant(value),
            EventKind::Result => parse_result(value),
            EventKind::User | EventKind::System | EventKind::Unknown => ParseOutcome::NoOutput,
        }
    }
}

/// Surface the first actionable block: a tool call, or non-empty text.
fn parse_assistant(value: serde_json::Value) -> ParseOutcome {
    let Ok(event) = serde_json::from_value::<AssistantEvent>(value) else {
        return ParseOutcome::NoOutput;
    };

    for block in event.blocks() {
        match block {
            ContentBlock::ToolUse { name, input } => {
                let context = tool_context(&name, input.as_ref());
                return ParseOutcome::Display(DisplayEvent::tool_call(name, context));
            }
            ContentBlock::Text { text } if !text.is_empty() => {
                return ParseOutcome::Display(DisplayEvent::plain(text));
            }
            _ => {}
        }
    }

    ParseOutcome::NoOutput
}

fn parse_result(value: serde_json::Value) -> ParseOutcome {
    let Ok(result) = serde_json::from_value::<ResultSummary>(value) else {
        return ParseOutcome::NoOutput;
    };
    ParseOutcome::Display(DisplayEvent::result(format_result(&result)))
}

/// `"Success in 4.5s (3 turns)"`; zero fields are left out.
pub fn format_result(result: &ResultSummary) -> String {
    let status = result
        .subtype
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or("complete");

    let mut parts = vec![capitalize(status)];
    let duration_ms = result.duration_ms.unwrap_or(0);
    if duration_ms > 0 {
        parts.push(format!("in {:.1}s", duration_ms as f64 / 1000.0));
    }
    let num_turns = result.num_turns.unwrap_or(0);
    if num_turns > 0 {
        parts.push(format!("({num_turns} turns)"));
    }
    parts.join(" ")
}

// ─── Tests ────────────────────────────────────────────────────────────────
