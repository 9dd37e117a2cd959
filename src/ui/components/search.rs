//! Search bar component renderer.
//!
//! Renders the search field in a bordered box followed by the numbered
//! autocomplete entries, if any.

use crate::ui::helpers::{padding, truncate, Canvas};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Renders the search box and its suggestions.
///
/// # Layout
///
/// ```text
/// ┌──────────────────────────────┐
/// │ Search: pik                  │
/// └──────────────────────────────┘
///   0  #025 Pikachu
///   1  #172 Pichu
/// ```
pub fn render_search_bar(canvas: &mut Canvas, search: &SearchBarInfo, theme: &Theme, cols: usize) {
    let inner = cols.saturating_sub(4);
    let border_color = Theme::fg(&theme.colors.search_bar_border);
    let reset = Theme::reset();

    canvas.push(format!("{border_color}┌{}┐{reset}", "─".repeat(cols.saturating_sub(2))));

    let text = truncate(&format!("Search: {}", search.query), inner);
    canvas.push(format!(
        "{border_color}│{reset} {}{text}{}{reset} {border_color}│{reset}",
        Theme::fg(&theme.colors.text_normal),
        padding(&text, inner),
    ));

    canvas.push(format!("{border_color}└{}┘{reset}", "─".repeat(cols.saturating_sub(2))));

    for suggestion in &search.suggestions {
        let line = truncate(
            &format!("  {}  {} {}", suggestion.index, suggestion.display_id, suggestion.name),
            cols,
        );
        canvas.push(format!("{}{line}{reset}", Theme::fg(&theme.colors.text_dim)));
    }
}
