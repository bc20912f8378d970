//! Project layout, configuration and PRD store for ralph.
//!
//! Everything ralph persists lives under `RALPH_HOME` (set by `ralph setup`
//! and stored in `~/.config/ralph/config.json`):
//!
//! ```text
//! <ralph_home>/
//!   prompt.md                      iteration prompt template
//!   projects/<project-id>/
//!     .path                        original working directory
//!     prd.json  prd.md             current task list
//!     progress.txt  .last-branch   run state
//!     archive/<date>-<branch>/     finished runs
//!     logs/<branch>_<ts>.log       run transcripts
//! ```

pub mod config;
pub mod error;
pub mod io;
pub mod paths;
pub mod prd;
pub mod project;
pub mod prompt;

pub use config::Config;
pub use error::{RalphError, Result};
pub use prd::{Prd, UserStory};
pub use project::{ArchiveReport, BranchChange, LogEntry, Project, ProjectInfo};
