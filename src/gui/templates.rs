//! HTML for the web GUI.
//!
//! The page is embedded at compile time using `include_str!`.

/// The single-page task viewer. The `__GUI_DIR__` marker is replaced with
/// the JSON-encoded workspace directory when the page is served.
pub const INDEX_TEMPLATE: &str = include_str!("templates/index.html");
