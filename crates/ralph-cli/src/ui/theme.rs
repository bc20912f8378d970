use crossterm::style::{Color, ContentStyle, Stylize};
use std::io::IsTerminal;

// Semantic palette.
pub const PRIMARY: Color = Color::Rgb { r: 0x7C, g: 0x3A, b: 0xED };
pub const SECONDARY: Color = Color::Rgb { r: 0xA7, g: 0x8B, b: 0xFA };
pub const SUCCESS: Color = Color::Rgb { r: 0x10, g: 0xB9, b: 0x81 };
pub const ERROR: Color = Color::Rgb { r: 0xEF, g: 0x44, b: 0x44 };
pub const WARNING: Color = Color::Rgb { r: 0xF5, g: 0x9E, b: 0x0B };
pub const FG_MUTED: Color = Color::Rgb { r: 0x9C, g: 0xA3, b: 0xAF };
pub const FG_SUBTLE: Color = Color::Rgb { r: 0x6B, g: 0x72, b: 0x80 };

pub const CHECK_ICON: &str = "✓";
pub const ERROR_ICON: &str = "×";
pub const WARNING_ICON: &str = "⚠";
pub const TOOL_ICON: &str = "●";
pub const ARROW: &str = "→";
pub const BULLET: &str = "•";

/// Width used when the terminal size cannot be read.
const FALLBACK_WIDTH: u16 = 80;

/// Styling decisions for one output target.
///
/// Passed explicitly to every formatter so tests can render without colour
/// and the run transcript can be kept free of escape codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    color: bool,
}

impl Theme {
    /// Colour only when stdout is a terminal and `NO_COLOR` is unset.
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self {
            color: !no_color && std::io::stdout().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn colored() -> Self {
        Self { color: true }
    }

    fn paint(&self, text: &str, style: ContentStyle) -> String {
        if self.color {
            style.apply(text).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn title(&self, text: &str) -> String {
        self.paint(text, ContentStyle::new().with(PRIMARY).bold())
    }

    /// Bold secondary, used for tool names and the agent header.
    pub fn accent(&self, text: &str) -> String {
        self.paint(text, ContentStyle::new().with(SECONDARY).bold())
    }

    pub fn muted(&self, text: &str) -> String {
        self.paint(text, ContentStyle::new().with(FG_MUTED))
    }

    pub fn subtle(&self, text: &str) -> String {
        self.paint(text, ContentStyle::new().with(FG_SUBTLE))
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(text, ContentStyle::new().with(SUCCESS))
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(text, ContentStyle::new().with(ERROR))
    }

    pub fn warning(&self, text: &str) -> String {
        self.paint(text, ContentStyle::new().with(WARNING))
    }

    /// White-on-red `ERROR` badge; plain text without colour.
    pub fn error_label(&self) -> String {
        if self.color {
            ContentStyle::new()
                .with(Color::White)
                .on(ERROR)
                .apply(" ERROR ")
                .to_string()
        } else {
            "ERROR".to_string()
        }
    }
}

/// Current terminal width in columns.
pub fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _)| cols)
        .unwrap_or(FALLBACK_WIDTH)
        .max(20) as usize
}
