use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Render rows under a header with columns padded to their widest cell.
/// Widths count characters so `✓` and friends line up.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let render = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let w = widths.get(i).copied().unwrap_or(0);
                let pad = w.saturating_sub(cell.chars().count());
                format!("{cell}{}", " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![render(headers.to_vec())];
    lines.push(
        widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        lines.push(render(row.iter().map(String::as_str).collect()));
    }
    lines
}

/// Shorten to `limit` characters with a trailing `...`.
pub fn ellipsize(s: &str, limit: usize) -> String {
    if s.chars().count() <= limit {
        return s.to_string();
    }
    let keep = limit.saturating_sub(3);
    format!("{}...", s.chars().take(keep).collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_pads_columns() {
        let lines = table(
            &["Project", "Stories"],
            &[
                vec![".../a/b/c".into(), "1/2".into()],
                vec!["x".into(), "3/3 ✓".into()],
            ],
        );
        assert_eq!(
            lines,
            vec![
                "Project    Stories",
                "---------  -------",
                ".../a/b/c  1/2",
                "x          3/3 ✓",
            ]
        );
    }

    #[test]
    fn ellipsize_caps_length() {
        assert_eq!(ellipsize("short", 15), "short");
        assert_eq!(ellipsize("a-very-long-branch-name", 15), "a-very-long-...");
    }
}
