//! Footer component renderer.
//!
//! Two lines: the pagination bar (page label, range label, previous/next
//! markers) and the command hints.

use crate::ui::helpers::{truncate, Canvas};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FooterInfo, StatusLine};

pub fn render_footer(canvas: &mut Canvas, footer: &FooterInfo, theme: &Theme, cols: usize) {
    let previous = if footer.has_previous { "‹ prev" } else { "      " };
    let next = if footer.has_next { "next ›" } else { "      " };
    let range = footer
        .range_label
        .as_deref()
        .map(|label| format!("  ({label})"))
        .unwrap_or_default();

    let bar = truncate(&format!("{previous}  {}{range}  {next}", footer.page_label), cols);
    canvas.push(format!(
        "{}{}{bar}{}",
        Theme::bold(),
        Theme::fg(&theme.colors.text_normal),
        Theme::reset()
    ));

    canvas.push(format!(
        "{}{}{}{}",
        Theme::dim(),
        Theme::fg(&theme.colors.text_dim),
        truncate(&footer.hints, cols),
        Theme::reset()
    ));
}

/// Renders the loading indicator or the last notice.
pub fn render_status(canvas: &mut Canvas, status: &StatusLine, theme: &Theme, cols: usize) {
    let color = if status.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.status_fg
    };
    let marker = if status.is_loading { "⟳ " } else if status.is_error { "✗ " } else { "! " };

    canvas.push(format!(
        "{}{}{}",
        Theme::fg(color),
        truncate(&format!("{marker}{}", status.message), cols),
        Theme::reset()
    ));
}
