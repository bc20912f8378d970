use serde::{Deserialize, Serialize};

// ─── Event kind ───────────────────────────────────────────────────────────

/// Discriminator read from the top-level `"type"` field of a stream-json line.
///
/// Anything the agent emits that we do not recognise (`rate_limit_event`,
/// `stream_event`, a missing field) collapses to [`EventKind::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Assistant,
    User,
    System,
    Result,
    Unknown,
}

impl EventKind {
    pub fn from_value(value: &serde_json::Value) -> Self {
        match value.get("type").and_then(|t| t.as_str()) {
            Some("assistant") => EventKind::Assistant,
            Some("user") => EventKind::User,
            Some("system") => EventKind::System,
            Some("result") => EventKind::Result,
            _ => EventKind::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Assistant => "assistant",
            EventKind::User => "user",
            EventKind::System => "system",
            EventKind::Result => "result",
            EventKind::Unknown => "unknown",
        }
    }
}

// ─── Assistant events ─────────────────────────────────────────────────────

/// `type = "assistant"`. Only `message.content` is interpreted; every other
/// field the CLI adds (ids, usage, model) is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssistantEvent {
    #[serde(default)]
    pub message: Option<AssistantMessage>,
}

impl AssistantEvent {
    pub fn blocks(&self) -> impl Iterator<Item = ContentBlock> + '_ {
        self.message.iter().flat_map(|m| m.blocks())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssistantMessage {
    /// Blocks are kept raw so one malformed block does not sink the others.
    #[serde(default)]
    pub content: Option<Vec<serde_json::Value>>,
}

impl AssistantMessage {
    /// Content blocks in order, with unreadable blocks mapped to
    /// [`ContentBlock::Other`].
    pub fn blocks(&self) -> impl Iterator<Item = ContentBlock> + '_ {
        self.content.iter().flatten().map(ContentBlock::from_value)
    }
}

/// One content block inside an assistant message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        #[serde(default)]
        text: String,
    },
    ToolUse {
        #[serde(default)]
        name: String,
        /// Per-tool input; schema varies by tool so it stays a JSON map.
        #[serde(default)]
        input: Option<serde_json::Map<String, serde_json::Value>>,
    },
    /// `thinking`, `tool_result`, or anything newer.
    #[serde(other)]
    Other,
}

impl ContentBlock {
    pub fn from_value(value: &serde_json::Value) -> Self {
        ContentBlock::deserialize(value).unwrap_or(ContentBlock::Other)
    }
}

// ─── Result events ────────────────────────────────────────────────────────

/// `type = "result"`: the terminal event of one agent invocation.
///
/// Numeric fields are optional because a repaired line can carry `null`
/// where the agent was cut off.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultSummary {
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub num_turns: Option<u64>,
}

// ─── Tests ────────────────────────────────────────────────────────────────
