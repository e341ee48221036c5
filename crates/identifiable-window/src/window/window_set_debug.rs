//! Debug visualization of a host's live window set.
//!
//! ```
//! use identifiable_window::window::{HeadlessHost, WindowKind, WindowSetDebug};
//!
//! let host = HeadlessHost::new();
//! host.add_window(WindowKind::Normal, Some("main-library".into()));
//!
//! tracing::debug!(windows = %WindowSetDebug::new(&host), "window set");
//! ```
//!
//! Output looks like:
//!
//! ```text
//! Windows (3 total, 2 visible):
//! ├── #1 main-library (Normal) [main, visible]
//! ├── #2 (anonymous) (Panel) [visible]
//! └── #3 settings (Normal) [hidden]
//! ```

use std::fmt::{self, Write as FmtWrite};

use super::handle::WindowHandle;
use super::host::WindowHost;

/// Style options for window list visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStyle {
    /// ASCII characters for list branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Everything on a single line.
    Compact,
}

/// Formats a snapshot of a host's windows for logs.
///
/// The snapshot is taken when the value is formatted, so a `WindowSetDebug`
/// passed as a lazily-evaluated `tracing` field costs nothing when the level
/// is disabled.
pub struct WindowSetDebug<'a> {
    host: &'a dyn WindowHost,
    style: ListStyle,
}

impl<'a> WindowSetDebug<'a> {
    pub fn new(host: &'a dyn WindowHost) -> Self {
        Self {
            host,
            style: ListStyle::default(),
        }
    }

    pub fn with_style(mut self, style: ListStyle) -> Self {
        self.style = style;
        self
    }

    /// Render the current window set.
    pub fn format(&self) -> String {
        let windows = self.host.windows();
        let visible = windows.iter().filter(|w| w.is_visible()).count();
        let mut output = String::new();

        if self.style == ListStyle::Compact {
            let entries: Vec<String> = windows.iter().map(describe).collect();
            let _ = write!(output, "[{}]", entries.join(", "));
            return output;
        }

        let _ = writeln!(
            output,
            "Windows ({} total, {} visible):",
            windows.len(),
            visible
        );
        if windows.is_empty() {
            let _ = writeln!(output, "  (empty)");
            return output;
        }

        let (corner, last) = match self.style {
            ListStyle::Ascii => ("+--", "`--"),
            _ => ("\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
        };
        let count = windows.len();
        for (i, window) in windows.iter().enumerate() {
            let prefix = if i + 1 == count { last } else { corner };
            let _ = writeln!(output, "{} {}", prefix, describe(window));
        }

        output
    }
}

fn describe(window: &WindowHandle) -> String {
    let name = window
        .identifier()
        .map(|id| id.as_str())
        .unwrap_or("(anonymous)");

    let mut flags = Vec::new();
    if window.is_main() {
        flags.push("main");
    }
    flags.push(if window.is_visible() { "visible" } else { "hidden" });

    format!(
        "{} {} ({}) [{}]",
        window.number(),
        name,
        window.kind(),
        flags.join(", ")
    )
}

impl fmt::Display for WindowSetDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{HeadlessHost, WindowKind};

    fn sample_host() -> HeadlessHost {
        let host = HeadlessHost::new();
        let library = host.add_window(WindowKind::Normal, Some("main-library".into()));
        host.add_window(WindowKind::Panel, None);
        let settings = host.add_window(WindowKind::Normal, Some("settings".into()));
        host.set_visible(settings, false);
        host.activate(library);
        host
    }

    #[test]
    fn test_format_empty() {
        let host = HeadlessHost::new();
        let output = WindowSetDebug::new(&host).format();
        assert!(output.contains("Windows (0 total, 0 visible)"));
        assert!(output.contains("(empty)"));
    }

    #[test]
    fn test_format_unicode() {
        let host = sample_host();
        let output = WindowSetDebug::new(&host).to_string();

        assert!(output.contains("Windows (3 total, 2 visible):"));
        assert!(output.contains("#1 main-library (Normal) [main, visible]"));
        assert!(output.contains("#2 (anonymous) (Panel) [visible]"));
        assert!(output.contains("\u{2514}\u{2500}\u{2500} #3 settings (Normal) [hidden]"));
    }

    #[test]
    fn test_format_ascii_and_compact() {
        let host = sample_host();

        let ascii = WindowSetDebug::new(&host).with_style(ListStyle::Ascii).format();
        assert!(ascii.contains("+-- #1"));
        assert!(ascii.contains("`-- #3"));

        let compact = WindowSetDebug::new(&host).with_style(ListStyle::Compact).format();
        assert!(compact.starts_with('['));
        assert!(!compact.contains('\n'));
    }
}
