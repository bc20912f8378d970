use super::theme::Theme;

pub const BAR_WIDTH: usize = 30;

const FILLED: char = '█';
const EMPTY: char = '░';

/// A fixed-width bar, filled in proportion to `completed / total`.
pub fn bar(t: &Theme, completed: usize, total: usize, width: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        (completed.min(total) * width + total / 2) / total
    };
    let full: String = std::iter::repeat(FILLED).take(filled).collect();
    let rest: String = std::iter::repeat(EMPTY).take(width - filled).collect();
    format!("{}{}", t.title(&full), t.subtle(&rest))
}

/// `█████░░░ 2/4 stories complete`
pub fn stories(t: &Theme, completed: usize, total: usize) -> String {
    if total == 0 {
        return t.muted("Progress: No stories loaded");
    }
    format!(
        "{} {completed}/{total} stories complete",
        bar(t, completed, total, BAR_WIDTH)
    )
}
