use serde_json::{Map, Value};

// ─── Rule table ───────────────────────────────────────────────────────────

/// How a tool's input field is turned into a short context string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extract {
    /// Last path component only.
    Basename,
    /// Collapse newlines, trim, cap at this many characters.
    Truncate(usize),
    /// Use the field as-is.
    Verbatim,
    /// Ignore the input and show a fixed label.
    Fixed(&'static str),
}

/// One row of the context table: which tools it covers, which input field it
/// reads, and how that field is shortened.
#[derive(Debug, Clone, Copy)]
pub struct ToolRule {
    pub tools: &'static [&'static str],
    pub field: &'static str,
    pub extract: Extract,
}

pub static TOOL_RULES: &[ToolRule] = &[
    ToolRule {
        tools: &["Read", "Write", "Edit", "MultiEdit"],
        field: "file_path",
        extract: Extract::Basename,
    },
    ToolRule {
        tools: &["NotebookEdit"],
        field: "notebook_path",
        extract: Extract::Basename,
    },
    ToolRule {
        tools: &["Bash"],
        field: "command",
        extract: Extract::Truncate(50),
    },
    ToolRule {
        tools: &["Glob", "Grep"],
        field: "pattern",
        extract: Extract::Truncate(40),
    },
    ToolRule {
        tools: &["Task"],
        field: "description",
        extract: Extract::Truncate(40),
    },
    ToolRule {
        tools: &["TaskOutput"],
        field: "task_id",
        extract: Extract::Truncate(40),
    },
    ToolRule {
        tools: &["TodoWrite"],
        field: "",
        extract: Extract::Fixed("updating tasks"),
    },
    ToolRule {
        tools: &["Skill"],
        field: "skill",
        extract: Extract::Verbatim,
    },
    ToolRule {
        tools: &["WebFetch"],
        field: "url",
        extract: Extract::Truncate(50),
    },
    ToolRule {
        tools: &["WebSearch"],
        field: "query",
        extract: Extract::Truncate(40),
    },
    ToolRule {
        tools: &["BashOutput"],
        field: "bash_id",
        extract: Extract::Truncate(40),
    },
    ToolRule {
        tools: &["KillShell"],
        field: "shell_id",
        extract: Extract::Truncate(40),
    },
];

/// Keys tried in order when no rule matches or the rule's field is missing.
pub const FALLBACK_KEYS: &[&str] = &[
    "file_path",
    "path",
    "command",
    "query",
    "pattern",
    "description",
    "skill",
];

const FALLBACK_LIMIT: usize = 40;

pub fn rule_for(tool_name: &str) -> Option<&'static ToolRule> {
    TOOL_RULES.iter().find(|r| r.tools.contains(&tool_name))
}

// ─── Context extraction ───────────────────────────────────────────────────

/// Build the short human-readable context shown next to a tool call.
///
/// Returns an empty string when the tool has no input at all.
pub fn tool_context(tool_name: &str, input: Option<&Map<String, Value>>) -> String {
    let Some(input) = input else {
        return String::new();
    };

    if let Some(rule) = rule_for(tool_name) {
        if let Some(ctx) = apply_rule(rule, input) {
            return ctx;
        }
    }

    FALLBACK_KEYS
        .iter()
        .filter_map(|key| input.get(*key).and_then(Value::as_str))
        .find(|v| !v.is_empty())
        .map(|v| truncate(v, FALLBACK_LIMIT))
        .unwrap_or_default()
}

fn apply_rule(rule: &ToolRule, input: &Map<String, Value>) -> Option<String> {
    if let Extract::Fixed(label) = rule.extract {
        return Some(label.to_string());
    }
    let value = input.get(rule.field)?.as_str()?;
    Some(match rule.extract {
        Extract::Basename => shorten_path(value),
        Extract::Truncate(limit) => truncate(value, limit),
        Extract::Verbatim => value.to_string(),
        Extract::Fixed(label) => label.to_string(),
    })
}

// ─── String helpers ───────────────────────────────────────────────────────

/// Last component of a path, or the input unchanged when it has none.
pub fn shorten_path(path: &str) -> String {
    std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

/// Flatten `s` onto one line and cap it at `limit` characters.
///
/// Strings at or under the limit come back unchanged (after newline
/// collapsing and trimming); longer ones keep `limit - 3` characters and gain
/// a `...` suffix, so the result is exactly `limit` characters.
pub fn truncate(s: &str, limit: usize) -> String {
    let flat = s.replace('\n', " ");
    let flat = flat.trim();
    if flat.chars().count() <= limit {
        return flat.to_string();
    }
    let keep = limit.saturating_sub(3);
    let mut out: String = flat.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Uppercase the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx(tool: &str, input: Value) -> String {
        tool_context(tool, input.as_object())
    }

    #[test]
    fn file_tools_show_basename() {
        for tool in ["Read", "Write", "Edit", "MultiEdit"] {
            assert_eq!(ctx(tool, json!({"file_path": "/a/b/c/main.go"})), "main.go");
        }
        assert_eq!(
            ctx("NotebookEdit", json!({"notebook_path": "/nb/analysis.ipynb"})),
            "analysis.ipynb"
        );
    }

    #[test]
    fn bash_flattens_and_truncates_to_fifty() {
        let long = "ls -la /very/long/directory/path/that/exceeds/fifty/characters";
        let out = ctx("Bash", json!({ "command": long }));
        assert_eq!(out.chars().count(), 50);
        assert!(out.ends_with("..."));
        assert!(long.starts_with(out.trim_end_matches("...")));

        assert_eq!(
            ctx("Bash", json!({"command": "  cargo fmt\ncargo test  "})),
            "cargo fmt cargo test"
        );
    }

    #[test]
    fn search_and_task_tools_cap_at_forty() {
        let long = "x".repeat(60);
        for (tool, field) in [
            ("Glob", "pattern"),
            ("Grep", "pattern"),
            ("Task", "description"),
            ("TaskOutput", "task_id"),
            ("WebSearch", "query"),
            ("BashOutput", "bash_id"),
            ("KillShell", "shell_id"),
        ] {
            let out = ctx(tool, json!({ field: long }));
            assert_eq!(out.chars().count(), 40, "{tool}");
        }
        assert_eq!(ctx("WebFetch", json!({ "url": long })).chars().count(), 50);
    }

    #[test]
    fn todo_write_has_fixed_label() {
        assert_eq!(ctx("TodoWrite", json!({"todos": []})), "updating tasks");
    }

    #[test]
    fn skill_is_verbatim() {
        let name = "a-very-long-skill-name-that-would-otherwise-be-truncated";
        assert_eq!(ctx("Skill", json!({ "skill": name })), name);
    }

    #[test]
    fn missing_field_falls_through_to_generic_keys() {
        assert_eq!(ctx("Read", json!({"path": "/src/lib.rs"})), "/src/lib.rs");
        assert_eq!(ctx("Bash", json!({"command": 42, "query": "q"})), "q");
    }

    #[test]
    fn unknown_tool_uses_first_non_empty_generic_key() {
        let input = json!({"file_path": "", "command": "make", "query": "ignored"});
        assert_eq!(ctx("mcp__custom__tool", input), "make");
    }

    #[test]
    fn nothing_to_show_gives_empty_context() {
        assert_eq!(ctx("mcp__custom__tool", json!({"other": "x"})), "");
        assert_eq!(tool_context("Read", None), "");
    }

    #[test]
    fn truncate_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("0123456789", 10), "0123456789");
        let out = truncate("0123456789a", 10);
        assert_eq!(out, "0123456...");
        assert_eq!(out.chars().count(), 10);
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        let s = "é".repeat(12);
        let out = truncate(&s, 10);
        assert_eq!(out.chars().count(), 10);
        assert_eq!(truncate(&"é".repeat(10), 10), "é".repeat(10));
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("success"), "Success");
        assert_eq!(capitalize("error_max_turns"), "Error_max_turns");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn every_rule_is_reachable() {
        for rule in TOOL_RULES {
            for tool in rule.tools {
                assert!(std::ptr::eq(rule_for(tool).unwrap(), rule), "{tool}");
            }
        }
    }
}
