pub mod format;
pub mod progress;
pub mod run_view;
pub mod theme;

pub use run_view::RunView;
pub use theme::Theme;
