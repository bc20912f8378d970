use crate::error::{RalphError, Result};
use crate::io::{atomic_write, ensure_dir, read_optional, remove_if_exists, write_if_missing};
use crate::paths;
use crate::prd::{branch_slug, Prd};
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::path::{Path, PathBuf};

const HEADER_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const ARCHIVE_DATE_FORMAT: &str = "%Y-%m-%d";
const LOG_TIME_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Branch label used when the PRD has none.
const UNKNOWN_BRANCH: &str = "unknown";

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Header written at the top of a fresh `progress.txt`.
pub fn progress_header(working_dir: &Path, event: &str, at: NaiveDateTime) -> String {
    format!(
        "# Progress Log\n# Project: {}\n# {event}: {}\n\n",
        working_dir.display(),
        at.format(HEADER_TIME_FORMAT)
    )
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Where an archive snapshot went and what it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveReport {
    pub dir: PathBuf,
    pub files: Vec<String>,
}

/// Outcome of comparing the PRD branch with the one recorded by the last run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchChange {
    /// No PRD, or the PRD names no branch.
    NoBranch,
    /// No previous run recorded; the branch is now stored.
    First { branch: String },
    Unchanged { branch: String },
    /// The previous run's progress was archived under the old branch.
    Changed {
        from: String,
        to: String,
        archive: ArchiveReport,
    },
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// The ralph data directory for one working directory.
#[derive(Debug, Clone)]
pub struct Project {
    ralph_home: PathBuf,
    working_dir: PathBuf,
    dir: PathBuf,
}

impl Project {
    pub fn new(ralph_home: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        let ralph_home = ralph_home.into();
        let working_dir = working_dir.into();
        let dir = paths::project_dir(&ralph_home, &working_dir);
        Self {
            ralph_home,
            working_dir,
            dir,
        }
    }

    /// The project for the process working directory, using the saved config.
    pub fn current() -> Result<Self> {
        let home = crate::config::ralph_home()?;
        let cwd = std::env::current_dir()?;
        Ok(Self::new(home, cwd))
    }

    pub fn ralph_home(&self) -> &Path {
        &self.ralph_home
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn id(&self) -> String {
        paths::project_id(&self.working_dir)
    }

    /// Last component of the working directory.
    pub fn name(&self) -> String {
        self.working_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.working_dir.display().to_string())
    }

    pub fn is_initialized(&self) -> bool {
        self.dir.is_dir()
    }

    pub fn require_initialized(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(RalphError::NotInitialized)
        }
    }

    pub fn has_prd(&self) -> bool {
        Prd::exists(&self.dir)
    }

    pub fn load_prd(&self) -> Result<Prd> {
        Prd::load(&self.dir)
    }

    /// The prompt template with this project's paths filled in.
    pub fn render_prompt(&self) -> Result<String> {
        let template = crate::prompt::load_template(&self.ralph_home)?;
        Ok(crate::prompt::render(
            &template,
            &self.dir,
            &self.working_dir,
        ))
    }

    // -----------------------------------------------------------------------
    // init
    // -----------------------------------------------------------------------

    /// Create the data directory, record the source path and seed
    /// `progress.txt`. Safe to run again; existing progress is kept.
    pub fn init(&self) -> Result<()> {
        self.init_at(now())
    }

    pub fn init_at(&self, at: NaiveDateTime) -> Result<()> {
        ensure_dir(&paths::archive_dir(&self.dir))?;
        atomic_write(
            &paths::path_file(&self.dir),
            self.working_dir.to_string_lossy().as_bytes(),
        )?;
        let header = progress_header(&self.working_dir, "Initialized", at);
        let seeded = write_if_missing(&paths::progress_txt(&self.dir), header.as_bytes())?;
        tracing::info!(dir = %self.dir.display(), seeded, "project initialized");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // archive
    // -----------------------------------------------------------------------

    /// Snapshot the current run into `archive/<date>-<branch>` and start a
    /// fresh one: progress is reset and the PRD files are removed.
    pub fn archive(&self) -> Result<ArchiveReport> {
        self.archive_at(now())
    }

    pub fn archive_at(&self, at: NaiveDateTime) -> Result<ArchiveReport> {
        let prd = self.load_prd().map_err(|e| match e {
            RalphError::PrdNotFound => RalphError::NothingToArchive,
            other => other,
        })?;

        let report = self.snapshot(&prd.branch_name, paths::ARCHIVED_FILES, at)?;
        self.reset_progress(at)?;
        for file in [paths::PRD_JSON, paths::PRD_MD, paths::LAST_BRANCH] {
            remove_if_exists(&self.dir.join(file))?;
        }

        tracing::info!(dir = %report.dir.display(), files = ?report.files, "run archived");
        Ok(report)
    }

    /// Copy whichever of `files` exist into the archive folder for `branch`.
    fn snapshot(&self, branch: &str, files: &[&str], at: NaiveDateTime) -> Result<ArchiveReport> {
        let mut slug = branch_slug(branch);
        if slug.is_empty() {
            slug = UNKNOWN_BRANCH.to_string();
        }
        let dest = paths::archive_dir(&self.dir).join(format!(
            "{}-{slug}",
            at.format(ARCHIVE_DATE_FORMAT)
        ));
        ensure_dir(&dest)?;

        let mut copied = Vec::new();
        for file in files {
            let src = self.dir.join(file);
            if src.is_file() {
                std::fs::copy(&src, dest.join(file))?;
                copied.push(file.to_string());
            }
        }
        Ok(ArchiveReport {
            dir: dest,
            files: copied,
        })
    }

    fn reset_progress(&self, at: NaiveDateTime) -> Result<()> {
        let header = progress_header(&self.working_dir, "Reset", at);
        atomic_write(&paths::progress_txt(&self.dir), header.as_bytes())
    }

    // -----------------------------------------------------------------------
    // branch tracking
    // -----------------------------------------------------------------------

    /// Compare the PRD's branch with `.last-branch`.
    ///
    /// On a change, the previous run's `progress.txt` is archived under the
    /// old branch and reset, and the PRD (which already describes the new
    /// branch) is left in place. The current branch is then recorded.
    pub fn check_branch_change(&self) -> Result<BranchChange> {
        self.check_branch_change_at(now())
    }

    pub fn check_branch_change_at(&self, at: NaiveDateTime) -> Result<BranchChange> {
        let current = match self.load_prd() {
            Ok(prd) => prd.branch_name,
            Err(RalphError::PrdNotFound) => return Ok(BranchChange::NoBranch),
            Err(e) => return Err(e),
        };
        if current.is_empty() {
            return Ok(BranchChange::NoBranch);
        }

        let last_path = paths::last_branch(&self.dir);
        let last = read_optional(&last_path)?.map(|s| s.trim().to_string());

        let change = match last {
            None => BranchChange::First {
                branch: current.clone(),
            },
            Some(last) if last.is_empty() || last == current => BranchChange::Unchanged {
                branch: current.clone(),
            },
            Some(last) => {
                let archive = self.snapshot(&last, &[paths::PROGRESS_TXT], at)?;
                self.reset_progress(at)?;
                tracing::info!(from = %last, to = %current, "branch changed, previous run archived");
                BranchChange::Changed {
                    from: last,
                    to: current.clone(),
                    archive,
                }
            }
        };

        atomic_write(&last_path, current.as_bytes())?;
        Ok(change)
    }

    // -----------------------------------------------------------------------
    // clean
    // -----------------------------------------------------------------------

    /// Remove the current run's files, or with `all` the whole data directory
    /// including archives and logs. Returns what was removed.
    pub fn clean(&self, all: bool) -> Result<Vec<PathBuf>> {
        if all {
            if !self.dir.exists() {
                return Ok(Vec::new());
            }
            std::fs::remove_dir_all(&self.dir)?;
            tracing::info!(dir = %self.dir.display(), "project data removed");
            return Ok(vec![self.dir.clone()]);
        }

        let mut removed = Vec::new();
        for file in paths::RUN_FILES {
            let path = self.dir.join(file);
            if remove_if_exists(&path)? {
                removed.push(path);
            }
        }
        tracing::info!(count = removed.len(), "run files removed");
        Ok(removed)
    }

    // -----------------------------------------------------------------------
    // logs
    // -----------------------------------------------------------------------

    /// Persist a run transcript as `logs/<branch>_<timestamp>.log`.
    ///
    /// Slashes in the branch become subdirectories, so `ralph/login` lands in
    /// `logs/ralph/login_….log`.
    pub fn save_run_log(&self, branch: &str, content: &str) -> Result<PathBuf> {
        self.save_run_log_at(branch, content, now())
    }

    pub fn save_run_log_at(&self, branch: &str, content: &str, at: NaiveDateTime) -> Result<PathBuf> {
        let mut parts: Vec<&str> = branch
            .split(['/', '\\'])
            .filter(|p| !p.is_empty() && *p != "." && *p != "..")
            .collect();
        if parts.is_empty() {
            parts.push(UNKNOWN_BRANCH);
        }
        let file_stem = parts.pop().unwrap_or(UNKNOWN_BRANCH);

        let mut path = paths::logs_dir(&self.dir);
        for dir in parts {
            path.push(dir);
        }
        path.push(format!("{file_stem}_{}.log", at.format(LOG_TIME_FORMAT)));

        atomic_write(&path, content.as_bytes())?;
        tracing::debug!(path = %path.display(), "run log saved");
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// Cross-project queries
// ---------------------------------------------------------------------------

/// Summary row for `ralph list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectInfo {
    pub id: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    pub completed: usize,
    pub total: usize,
    pub is_complete: bool,
    pub archive_count: usize,
}

impl ProjectInfo {
    /// `"done/total"`, or `None` when there is no PRD.
    pub fn stories(&self) -> Option<String> {
        self.branch
            .as_ref()
            .map(|_| format!("{}/{}", self.completed, self.total))
    }
}

/// One saved run transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub path: PathBuf,
    /// `<project>/<branch path>_<timestamp>`.
    pub display_name: String,
    pub project: String,
    /// The timestamp suffix of the file name, or empty if it has none.
    pub date: String,
}

/// Every project directory name under `<ralph_home>/projects`, sorted.
pub fn list_projects(ralph_home: &Path) -> Result<Vec<String>> {
    let dir = paths::projects_dir(ralph_home);
    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut ids = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            ids.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    ids.sort();
    Ok(ids)
}

pub fn project_info(ralph_home: &Path, id: &str) -> ProjectInfo {
    let dir = paths::projects_dir(ralph_home).join(id);
    let mut info = ProjectInfo {
        id: id.to_string(),
        display_name: display_name(&dir, id),
        branch: None,
        completed: 0,
        total: 0,
        is_complete: false,
        archive_count: 0,
    };

    match Prd::load(&dir) {
        Ok(prd) => {
            info.branch = Some(prd.short_branch().to_string());
            info.completed = prd.completed_count();
            info.total = prd.total_count();
            info.is_complete = prd.is_complete();
        }
        Err(RalphError::PrdNotFound) => {}
        Err(e) => tracing::warn!(project = id, error = %e, "unreadable prd.json"),
    }

    if let Ok(entries) = std::fs::read_dir(paths::archive_dir(&dir)) {
        info.archive_count = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .count();
    }

    info
}

/// The recorded source path shortened to its last three segments, or a
/// shortened project id when `.path` is missing.
pub fn display_name(project_dir: &Path, id: &str) -> String {
    if let Some(full) = recorded_path(project_dir) {
        let parts: Vec<&str> = full.split('/').collect();
        if parts.len() > 3 {
            return format!(".../{}", parts[parts.len() - 3..].join("/"));
        }
        return full;
    }
    tail(id, 30)
}

/// Base name of the recorded source path, or a shortened project id.
pub fn short_project_name(project_dir: &Path, id: &str) -> String {
    if let Some(full) = recorded_path(project_dir) {
        if let Some(name) = Path::new(&full).file_name() {
            return name.to_string_lossy().into_owned();
        }
        return full;
    }
    tail(id, 20)
}

fn recorded_path(project_dir: &Path) -> Option<String> {
    let raw = std::fs::read_to_string(paths::path_file(project_dir)).ok()?;
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Keep the last `limit - 3` characters behind a `...` when `s` is longer
/// than `limit`.
fn tail(s: &str, limit: usize) -> String {
    let count = s.chars().count();
    if count <= limit {
        return s.to_string();
    }
    let skip = count - (limit - 3);
    format!("...{}", s.chars().skip(skip).collect::<String>())
}

/// Every `.log` file under every project's `logs/`, newest first.
pub fn find_all_logs(ralph_home: &Path) -> Result<Vec<LogEntry>> {
    let mut logs = Vec::new();
    for id in list_projects(ralph_home)? {
        let project_dir = paths::projects_dir(ralph_home).join(&id);
        let logs_dir = paths::logs_dir(&project_dir);
        let short = short_project_name(&project_dir, &id);

        let mut files = Vec::new();
        collect_logs(&logs_dir, &mut files);
        for path in files {
            let rel = path
                .strip_prefix(&logs_dir)
                .unwrap_or(&path)
                .to_string_lossy()
                .replace('\\', "/");
            let rel = rel.strip_suffix(".log").unwrap_or(&rel).to_string();
            let date = log_date(&path);
            logs.push(LogEntry {
                display_name: format!("{short}/{rel}"),
                project: id.clone(),
                date,
                path,
            });
        }
    }
    logs.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(logs)
}

/// Recursive walk; unreadable directories are skipped.
fn collect_logs(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        match entry.file_type() {
            Ok(t) if t.is_dir() => collect_logs(&path, out),
            Ok(t) if t.is_file() && path.extension().is_some_and(|e| e == "log") => {
                out.push(path)
            }
            _ => {}
        }
    }
}

/// `feature_2026-01-11-15-04-05.log` → `2026-01-11-15-04-05`.
fn log_date(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.rsplit_once('_') {
        Some((_, suffix)) => suffix.strip_suffix(".log").unwrap_or(suffix).to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prd::UserStory;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn fixture() -> (TempDir, Project) {
        let home = TempDir::new().unwrap();
        let project = Project::new(home.path(), "/Users/dev/code/My-App");
        (home, project)
    }

    fn write_prd(project: &Project, branch: &str, passes: &[bool]) -> Prd {
        let prd = Prd {
            project: "app".into(),
            branch_name: branch.into(),
            description: String::new(),
            user_stories: passes
                .iter()
                .enumerate()
                .map(|(i, p)| UserStory {
                    id: format!("US-{:03}", i + 1),
                    title: format!("Story {}", i + 1),
                    passes: *p,
                    ..Default::default()
                })
                .collect(),
        };
        prd.save(project.dir()).unwrap();
        prd
    }

    fn read(path: impl AsRef<Path>) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    #[test]
    fn project_dir_is_derived_from_working_dir() {
        let (home, project) = fixture();
        assert_eq!(
            project.dir(),
            home.path().join("projects/users-dev-code-my-app")
        );
        assert_eq!(project.name(), "My-App");
        assert!(!project.is_initialized());
        assert!(matches!(
            project.require_initialized().unwrap_err(),
            RalphError::NotInitialized
        ));
    }

    #[test]
    fn init_creates_layout_and_header() {
        let (_home, project) = fixture();
        project.init_at(at(2026, 1, 11, 15, 4, 5)).unwrap();

        assert!(project.dir().join("archive").is_dir());
        assert_eq!(read(project.dir().join(".path")), "/Users/dev/code/My-App");
        assert_eq!(
            read(project.dir().join("progress.txt")),
            "# Progress Log\n# Project: /Users/dev/code/My-App\n# Initialized: 2026-01-11 15:04:05\n\n"
        );
    }

    #[test]
    fn init_keeps_existing_progress() {
        let (_home, project) = fixture();
        project.init().unwrap();
        std::fs::write(project.dir().join("progress.txt"), "learned things").unwrap();
        project.init().unwrap();
        assert_eq!(read(project.dir().join("progress.txt")), "learned things");
    }

    #[test]
    fn archive_without_prd_is_an_error() {
        let (_home, project) = fixture();
        project.init().unwrap();
        assert!(matches!(
            project.archive().unwrap_err(),
            RalphError::NothingToArchive
        ));
    }

    #[test]
    fn archive_snapshots_and_resets() {
        let (_home, project) = fixture();
        project.init().unwrap();
        write_prd(&project, "ralph/login/form", &[true, true]);
        std::fs::write(project.dir().join("progress.txt"), "did stuff").unwrap();
        std::fs::write(project.dir().join(".last-branch"), "ralph/login/form").unwrap();

        let report = project.archive_at(at(2026, 2, 3, 9, 0, 0)).unwrap();

        assert_eq!(
            report.dir,
            project.dir().join("archive/2026-02-03-login-form")
        );
        assert_eq!(report.files, vec!["prd.json", "progress.txt"]);
        assert_eq!(read(report.dir.join("progress.txt")), "did stuff");
        assert!(report.dir.join("prd.json").is_file());

        assert!(!project.has_prd());
        assert!(!project.dir().join(".last-branch").exists());
        assert!(read(project.dir().join("progress.txt")).contains("# Reset: 2026-02-03 09:00:00"));
    }

    #[test]
    fn archive_includes_prd_md_when_present() {
        let (_home, project) = fixture();
        project.init().unwrap();
        write_prd(&project, "ralph/x", &[false]);
        std::fs::write(project.dir().join("prd.md"), "# PRD").unwrap();
        let report = project.archive().unwrap();
        assert_eq!(report.files, vec!["prd.json", "progress.txt", "prd.md"]);
        assert!(!project.dir().join("prd.md").exists());
    }

    #[test]
    fn branch_check_without_prd() {
        let (_home, project) = fixture();
        project.init().unwrap();
        assert_eq!(project.check_branch_change().unwrap(), BranchChange::NoBranch);
        assert!(!project.dir().join(".last-branch").exists());
    }

    #[test]
    fn branch_check_first_then_unchanged() {
        let (_home, project) = fixture();
        project.init().unwrap();
        write_prd(&project, "ralph/a", &[false]);

        assert_eq!(
            project.check_branch_change().unwrap(),
            BranchChange::First {
                branch: "ralph/a".into()
            }
        );
        assert_eq!(read(project.dir().join(".last-branch")), "ralph/a");
        assert_eq!(
            project.check_branch_change().unwrap(),
            BranchChange::Unchanged {
                branch: "ralph/a".into()
            }
        );
    }

    #[test]
    fn branch_change_archives_previous_progress() {
        let (_home, project) = fixture();
        project.init().unwrap();
        std::fs::write(project.dir().join(".last-branch"), "ralph/old\n").unwrap();
        std::fs::write(project.dir().join("progress.txt"), "old notes").unwrap();
        write_prd(&project, "ralph/new", &[false]);

        let change = project.check_branch_change_at(at(2026, 3, 1, 8, 0, 0)).unwrap();
        let BranchChange::Changed { from, to, archive } = change else {
            panic!("expected Changed");
        };
        assert_eq!(from, "ralph/old");
        assert_eq!(to, "ralph/new");
        assert_eq!(archive.dir, project.dir().join("archive/2026-03-01-old"));
        assert_eq!(read(archive.dir.join("progress.txt")), "old notes");

        // The new PRD stays; progress starts over.
        assert!(project.has_prd());
        assert!(read(project.dir().join("progress.txt")).starts_with("# Progress Log"));
        assert_eq!(read(project.dir().join(".last-branch")), "ralph/new");
    }

    #[test]
    fn clean_run_files_keeps_archives() {
        let (_home, project) = fixture();
        project.init().unwrap();
        write_prd(&project, "ralph/a", &[true]);
        project.archive().unwrap();
        write_prd(&project, "ralph/b", &[false]);

        let removed = project.clean(false).unwrap();
        assert_eq!(removed.len(), 2); // prd.json + progress.txt
        assert!(project.dir().join("archive").read_dir().unwrap().next().is_some());
        assert!(project.dir().join(".path").exists());
    }

    #[test]
    fn clean_all_removes_everything() {
        let (_home, project) = fixture();
        project.init().unwrap();
        assert_eq!(project.clean(true).unwrap(), vec![project.dir().to_path_buf()]);
        assert!(!project.is_initialized());
        assert!(project.clean(true).unwrap().is_empty());
    }

    #[test]
    fn run_log_path_uses_branch_and_timestamp() {
        let (_home, project) = fixture();
        let path = project
            .save_run_log_at("ralph/login", "transcript", at(2026, 1, 11, 15, 4, 5))
            .unwrap();
        assert_eq!(
            path,
            project.dir().join("logs/ralph/login_2026-01-11-15-04-05.log")
        );
        assert_eq!(read(&path), "transcript");

        let path = project
            .save_run_log_at("", "x", at(2026, 1, 11, 15, 4, 5))
            .unwrap();
        assert_eq!(path, project.dir().join("logs/unknown_2026-01-11-15-04-05.log"));

        let path = project
            .save_run_log_at("../../escape", "x", at(2026, 1, 11, 15, 4, 5))
            .unwrap();
        assert!(path.starts_with(project.dir().join("logs")));
    }

    #[test]
    fn render_prompt_substitutes_paths() {
        let (home, project) = fixture();
        std::fs::write(
            home.path().join("prompt.md"),
            "PRD at {{PROJECT_DIR}}/prd.json, code in {{WORKING_DIR}}",
        )
        .unwrap();
        let prompt = project.render_prompt().unwrap();
        assert_eq!(
            prompt,
            format!(
                "PRD at {}/prd.json, code in /Users/dev/code/My-App",
                project.dir().display()
            )
        );
    }

    #[test]
    fn list_and_info() {
        let home = TempDir::new().unwrap();
        assert!(list_projects(home.path()).unwrap().is_empty());

        let a = Project::new(home.path(), "/work/clients/acme/site");
        a.init().unwrap();
        write_prd(&a, "ralph/checkout", &[true, false, true]);
        let b = Project::new(home.path(), "/tmp/b");
        b.init().unwrap();
        write_prd(&b, "ralph/done", &[true]);
        b.archive().unwrap();

        let ids = list_projects(home.path()).unwrap();
        assert_eq!(ids, vec!["tmp-b", "work-clients-acme-site"]);

        let info = project_info(home.path(), "work-clients-acme-site");
        assert_eq!(info.display_name, ".../clients/acme/site");
        assert_eq!(info.branch.as_deref(), Some("checkout"));
        assert_eq!(info.stories().as_deref(), Some("2/3"));
        assert!(!info.is_complete);
        assert_eq!(info.archive_count, 0);

        let info = project_info(home.path(), "tmp-b");
        assert_eq!(info.display_name, "/tmp/b");
        assert_eq!(info.branch, None);
        assert_eq!(info.stories(), None);
        assert_eq!(info.archive_count, 1);
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let dir = TempDir::new().unwrap();
        assert_eq!(display_name(dir.path(), "short-id"), "short-id");
        let long = "a".repeat(20) + &"b".repeat(20);
        let name = display_name(dir.path(), &long);
        assert_eq!(name, format!("...{}{}", "a".repeat(7), "b".repeat(20)));
        assert_eq!(short_project_name(dir.path(), &long).chars().count(), 20);
    }

    #[test]
    fn logs_are_found_newest_first() {
        let home = TempDir::new().unwrap();
        let a = Project::new(home.path(), "/src/alpha");
        a.init().unwrap();
        a.save_run_log_at("ralph/one", "1", at(2026, 1, 1, 10, 0, 0)).unwrap();
        a.save_run_log_at("ralph/two", "2", at(2026, 1, 3, 10, 0, 0)).unwrap();
        let b = Project::new(home.path(), "/src/beta");
        b.init().unwrap();
        b.save_run_log_at("feature", "3", at(2026, 1, 2, 10, 0, 0)).unwrap();
        std::fs::write(b.dir().join("logs/notes.txt"), "ignored").unwrap();

        let logs = find_all_logs(home.path()).unwrap();
        let names: Vec<_> = logs.iter().map(|l| l.display_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "alpha/ralph/two_2026-01-03-10-00-00",
                "beta/feature_2026-01-02-10-00-00",
                "alpha/ralph/one_2026-01-01-10-00-00",
            ]
        );
        assert_eq!(logs[0].date, "2026-01-03-10-00-00");
        assert_eq!(logs[1].project, "src-beta");
    }

    #[test]
    fn log_date_needs_underscore() {
        assert_eq!(log_date(Path::new("/x/plain.log")), "");
        assert_eq!(log_date(Path::new("/x/a_b_2026.log")), "2026");
    }
}
