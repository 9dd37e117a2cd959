//! Shared rendering utilities.
//!
//! Components draw into a [`Canvas`], a list of finished terminal lines. Text
//! measurement is done on the raw strings before any ANSI styling is added,
//! always in characters rather than bytes.

use crate::ui::theme::Theme;

/// Line buffer that components append to.
#[derive(Debug, Default)]
pub struct Canvas {
    lines: Vec<String>,
}

impl Canvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Number of lines drawn so far.
    #[must_use]
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Appends blank lines until the canvas is `rows` high.
    pub fn fill_to(&mut self, rows: usize) {
        while self.lines.len() < rows {
            self.blank();
        }
    }

    #[must_use]
    pub fn into_string(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

/// Width of `text` in characters.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `width` characters, marking the cut with `…`.
///
/// ```rust
/// use dexview::ui::helpers::truncate;
///
/// assert_eq!(truncate("charizard", 5), "char…");
/// assert_eq!(truncate("mew", 5), "mew");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Spaces needed after `text` to reach `width`.
#[must_use]
pub fn padding(text: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(text_width(text)))
}

/// Centers `text` in `cols`, returning the left and right padding.
#[must_use]
pub fn center(text: &str, cols: usize) -> (String, String) {
    let free = cols.saturating_sub(text_width(text));
    let left = free / 2;
    (" ".repeat(left), " ".repeat(free - left))
}

/// Styles `text` with the theme's match highlight over the character range
/// `[start, end)`. The range is clamped to the text.
///
/// `resume` is re-applied after the highlight so surrounding styling
/// continues.
#[must_use]
pub fn highlighted_text(text: &str, range: Option<(usize, usize)>, theme: &Theme, resume: &str) -> String {
    let Some((start, end)) = range else {
        return text.to_string();
    };

    let chars: Vec<char> = text.chars().collect();
    let end = end.min(chars.len());
    let start = start.min(end);
    if start == end {
        return text.to_string();
    }

    let before: String = chars[..start].iter().collect();
    let matched: String = chars[start..end].iter().collect();
    let after: String = chars[end..].iter().collect();

    format!(
        "{before}{}{}{matched}{}{resume}{after}",
        Theme::fg(&theme.colors.match_highlight_fg),
        Theme::bg(&theme.colors.match_highlight_bg),
        Theme::reset(),
    )
}

/// A horizontal rule of `cols` characters.
#[must_use]
pub fn border(color: &str, cols: usize) -> String {
    format!("{}{}{}", Theme::fg(color), "─".repeat(cols), Theme::reset())
}
