use crate::error::{RalphError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Branch prefix the PRD skill puts on every feature branch.
pub const BRANCH_PREFIX: &str = "ralph/";

/// One unit of work the agent completes per iteration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStory {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub passes: bool,
    #[serde(default)]
    pub notes: String,
}

/// `prd.json`: the task list the agent works through. The agent edits this
/// file itself, flipping `passes` as stories land.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prd {
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub branch_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub user_stories: Vec<UserStory>,
}

impl Prd {
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = paths::prd_json(project_dir);
        if !path.exists() {
            return Err(RalphError::PrdNotFound);
        }
        let data = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self, project_dir: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        crate::io::atomic_write(&paths::prd_json(project_dir), data.as_bytes())
    }

    pub fn exists(project_dir: &Path) -> bool {
        paths::prd_json(project_dir).is_file()
    }

    pub fn completed_count(&self) -> usize {
        self.user_stories.iter().filter(|s| s.passes).count()
    }

    pub fn total_count(&self) -> usize {
        self.user_stories.len()
    }

    pub fn next_incomplete(&self) -> Option<&UserStory> {
        self.user_stories.iter().find(|s| !s.passes)
    }

    /// All stories pass. A PRD with no stories is never complete.
    pub fn is_complete(&self) -> bool {
        !self.user_stories.is_empty() && self.user_stories.iter().all(|s| s.passes)
    }

    /// Branch name without the `ralph/` prefix.
    pub fn short_branch(&self) -> &str {
        self.branch_name
            .strip_prefix(BRANCH_PREFIX)
            .unwrap_or(&self.branch_name)
    }

    /// `"3/5"`.
    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.completed_count(), self.total_count())
    }
}

/// Make a branch name safe to use as one path component.
pub fn branch_slug(branch: &str) -> String {
    branch
        .strip_prefix(BRANCH_PREFIX)
        .unwrap_or(branch)
        .replace(['/', '\\'], "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn story(id: &str, passes: bool) -> UserStory {
        UserStory {
            id: id.into(),
            title: format!("Story {id}"),
            passes,
            ..Default::default()
        }
    }

    fn prd(stories: Vec<UserStory>) -> Prd {
        Prd {
            project: "demo".into(),
            branch_name: "ralph/login-page".into(),
            description: "Add a login page".into(),
            user_stories: stories,
        }
    }

    #[test]
    fn reads_camel_case_file() {
        let json = r#"{
            "project": "demo",
            "branchName": "ralph/login-page",
            "description": "Add a login page",
            "userStories": [
                {
                    "id": "US-001",
                    "title": "Form",
                    "description": "Render the form",
                    "acceptanceCriteria": ["Has email field", "Typecheck passes"],
                    "priority": 1,
                    "passes": true,
                    "notes": ""
                },
                {"id": "US-002", "title": "Submit", "priority": 2}
            ]
        }"#;
        let p: Prd = serde_json::from_str(json).unwrap();
        assert_eq!(p.branch_name, "ralph/login-page");
        assert_eq!(p.user_stories[0].acceptance_criteria.len(), 2);
        assert!(!p.user_stories[1].passes);
        assert_eq!(p.completed_count(), 1);
        assert_eq!(p.total_count(), 2);
        assert_eq!(p.next_incomplete().unwrap().id, "US-002");
    }

    #[test]
    fn writes_camel_case_keys() {
        let text = serde_json::to_string(&prd(vec![story("US-001", false)])).unwrap();
        assert!(text.contains("\"branchName\""));
        assert!(text.contains("\"userStories\""));
        assert!(text.contains("\"acceptanceCriteria\""));
    }

    #[test]
    fn completion() {
        assert!(!prd(vec![]).is_complete());
        assert!(!prd(vec![story("a", true), story("b", false)]).is_complete());
        assert!(prd(vec![story("a", true), story("b", true)]).is_complete());
        assert!(prd(vec![story("a", true)]).next_incomplete().is_none());
    }

    #[test]
    fn short_branch_strips_prefix() {
        assert_eq!(prd(vec![]).short_branch(), "login-page");
        let mut p = prd(vec![]);
        p.branch_name = "feature/x".into();
        assert_eq!(p.short_branch(), "feature/x");
        assert_eq!(branch_slug("ralph/feature/x"), "feature-x");
    }

    #[test]
    fn save_load_and_exists() {
        let dir = TempDir::new().unwrap();
        assert!(!Prd::exists(dir.path()));
        assert!(matches!(
            Prd::load(dir.path()).unwrap_err(),
            RalphError::PrdNotFound
        ));

        let p = prd(vec![story("US-001", true), story("US-002", false)]);
        p.save(dir.path()).unwrap();
        assert!(Prd::exists(dir.path()));
        assert_eq!(Prd::load(dir.path()).unwrap(), p);
        assert_eq!(p.progress_label(), "1/2");
    }
}
