use crate::error::{RalphError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// `~/.config/ralph/config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root holding `prompt.md` and `projects/`.
    #[serde(default)]
    pub ralph_home: PathBuf,
}

impl Config {
    pub fn new(ralph_home: impl Into<PathBuf>) -> Self {
        Self {
            ralph_home: ralph_home.into(),
        }
    }

    /// Location of the config file for the current user.
    pub fn path() -> Result<PathBuf> {
        Ok(paths::config_path(&user_home()?))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RalphError::NotConfigured);
        }
        let data = std::fs::read_to_string(path)?;
        let cfg: Config = serde_json::from_str(&data)?;
        if cfg.ralph_home.as_os_str().is_empty() {
            return Err(RalphError::HomeNotSet);
        }
        tracing::debug!(ralph_home = %cfg.ralph_home.display(), "config loaded");
        Ok(cfg)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        crate::io::atomic_write(path, data.as_bytes())
    }
}

/// Shorthand for `Config::load()?.ralph_home`.
pub fn ralph_home() -> Result<PathBuf> {
    Ok(Config::load()?.ralph_home)
}

// ---------------------------------------------------------------------------
// Home and Claude directories
// ---------------------------------------------------------------------------

pub fn user_home() -> Result<PathBuf> {
    home::home_dir().ok_or(RalphError::HomeNotFound)
}

/// `~/.claude` on Unix, `%APPDATA%\claude` on Windows.
pub fn claude_config_dir() -> Result<PathBuf> {
    if cfg!(windows) {
        let app_data = std::env::var_os("APPDATA").ok_or(RalphError::HomeNotFound)?;
        Ok(PathBuf::from(app_data).join("claude"))
    } else {
        Ok(user_home()?.join(".claude"))
    }
}

/// The Claude skills directory, with symlinks resolved when it exists.
pub fn claude_skills_dir() -> Result<PathBuf> {
    let dir = claude_config_dir()?.join("skills");
    Ok(std::fs::canonicalize(&dir).unwrap_or(dir))
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> Result<PathBuf> {
    match path.strip_prefix('~') {
        Some(rest) => {
            let rest = rest.trim_start_matches(['/', '\\']);
            Ok(user_home()?.join(rest))
        }
        None => Ok(PathBuf::from(path)),
    }
}
