//! `ralph-agent` drives the `claude` CLI and turns its `stream-json` output
//! into one-line display events.
//!
//! # Architecture
//!
//! ```text
//! AgentOptions
//!     │
//!     ▼
//! AgentProcess        ← spawns `claude --dangerously-skip-permissions -p …`
//!     │                  prompt on stdin, stdout + stderr piped
//!     ▼
//! reader task × 2     ← one StreamEventParser per pipe
//!     │                  repair → parse → dispatch → DisplayEvent
//!     ▼
//! mpsc channel        ← AgentProcess implements Stream<Item = DisplayEvent>
//! ```
//!
//! The parser is usable on its own:
//!
//! ```rust
//! use ralph_agent::{Category, StreamEventParser};
//!
//! let mut parser = StreamEventParser::new();
//! let ev = parser.parse_line(r#"{"type":"result","subtype":"success","num_turns":2}"#);
//! assert_eq!(ev.category, Category::Result);
//! assert_eq!(ev.text, "Success (2 turns)");
//! ```

pub mod error;
pub mod parser;
pub mod process;
pub mod repair;
pub mod tools;
pub mod types;

pub use error::AgentError;
pub use parser::{Category, DisplayEvent, ParseOutcome, StreamEventParser};
pub use process::{AgentOptions, AgentProcess};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, AgentError>;
