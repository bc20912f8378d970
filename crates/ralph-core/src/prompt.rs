use crate::error::{RalphError, Result};
use crate::paths;
use std::path::Path;

pub const PROJECT_DIR_VAR: &str = "{{PROJECT_DIR}}";
pub const WORKING_DIR_VAR: &str = "{{WORKING_DIR}}";

/// Written to `<ralph_home>/prompt.md` by `ralph setup` when none exists.
pub const DEFAULT_TEMPLATE: &str = r#"# Ralph iteration

You are one iteration of an autonomous coding loop. Work in {{WORKING_DIR}}.

1. Read the PRD at {{PROJECT_DIR}}/prd.json and the notes in
   {{PROJECT_DIR}}/progress.txt.
2. Check out the branch named in `branchName`, creating it if needed.
3. Pick the highest-priority user story whose `passes` is false.
4. Implement only that story. Run the project's checks (build, lint, tests).
5. If the checks pass, commit with a message naming the story id, then set
   that story's `passes` to true in {{PROJECT_DIR}}/prd.json.
6. Append what you did and anything the next iteration should know to
   {{PROJECT_DIR}}/progress.txt.

Stop after one story.
"#;

/// Substitute the template variables. Every occurrence is replaced.
pub fn render(template: &str, project_dir: &Path, working_dir: &Path) -> String {
    template
        .replace(PROJECT_DIR_VAR, &project_dir.to_string_lossy())
        .replace(WORKING_DIR_VAR, &working_dir.to_string_lossy())
}

/// Read `<ralph_home>/prompt.md`.
pub fn load_template(ralph_home: &Path) -> Result<String> {
    let path = paths::prompt_path(ralph_home);
    crate::io::read_optional(&path)?
        .ok_or_else(|| RalphError::PromptNotFound(path.display().to_string()))
}

/// Write [`DEFAULT_TEMPLATE`] unless a template already exists.
/// Returns true if it was written.
pub fn seed_template(ralph_home: &Path) -> Result<bool> {
    crate::io::write_if_missing(&paths::prompt_path(ralph_home), DEFAULT_TEMPLATE.as_bytes())
}
