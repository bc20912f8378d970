use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// User config, relative to the user's home directory.
pub const CONFIG_FILE: &str = ".config/ralph/config.json";

pub const PROJECTS_DIR: &str = "projects";
pub const PROMPT_FILE: &str = "prompt.md";

pub const ARCHIVE_DIR: &str = "archive";
pub const LOGS_DIR: &str = "logs";

pub const PRD_JSON: &str = "prd.json";
pub const PRD_MD: &str = "prd.md";
pub const PROGRESS_TXT: &str = "progress.txt";
pub const LAST_BRANCH: &str = ".last-branch";
pub const PATH_FILE: &str = ".path";

/// Files belonging to the current run; `clean` removes these and keeps archives.
pub const RUN_FILES: &[&str] = &[PRD_JSON, PRD_MD, PROGRESS_TXT, LAST_BRANCH];

/// Files copied into an archive snapshot, when present.
pub const ARCHIVED_FILES: &[&str] = &[PRD_JSON, PROGRESS_TXT, PRD_MD];

// ---------------------------------------------------------------------------
// Project identity
// ---------------------------------------------------------------------------

/// Derive a flat, lowercase directory name from an absolute project path.
///
/// `/Volumes/Home/kento/src/assets-page` becomes
/// `volumes-home-kento-src-assets-page`.
pub fn project_id(path: &Path) -> String {
    let raw = path.to_string_lossy();
    raw.strip_prefix('/')
        .unwrap_or(raw.as_ref())
        .replace(['/', '\\'], "-")
        .to_lowercase()
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(user_home: &Path) -> PathBuf {
    user_home.join(CONFIG_FILE)
}

pub fn projects_dir(ralph_home: &Path) -> PathBuf {
    ralph_home.join(PROJECTS_DIR)
}

pub fn prompt_path(ralph_home: &Path) -> PathBuf {
    ralph_home.join(PROMPT_FILE)
}

pub fn project_dir(ralph_home: &Path, working_dir: &Path) -> PathBuf {
    projects_dir(ralph_home).join(project_id(working_dir))
}

pub fn archive_dir(project_dir: &Path) -> PathBuf {
    project_dir.join(ARCHIVE_DIR)
}

pub fn logs_dir(project_dir: &Path) -> PathBuf {
    project_dir.join(LOGS_DIR)
}

pub fn prd_json(project_dir: &Path) -> PathBuf {
    project_dir.join(PRD_JSON)
}

pub fn prd_md(project_dir: &Path) -> PathBuf {
    project_dir.join(PRD_MD)
}

pub fn progress_txt(project_dir: &Path) -> PathBuf {
    project_dir.join(PROGRESS_TXT)
}

pub fn last_branch(project_dir: &Path) -> PathBuf {
    project_dir.join(LAST_BRANCH)
}

pub fn path_file(project_dir: &Path) -> PathBuf {
    project_dir.join(PATH_FILE)
}
