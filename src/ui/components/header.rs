//! Header component renderer.
//!
//! Renders the title bar: title, active mode and total, centered on one line
//! with theme colours and an optional background.

use crate::ui::helpers::{center, Canvas};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header title bar.
///
/// # Layout
///
/// ```text
/// [padding] Pokédex · Type: fire · 64 total [padding]
/// ```
pub fn render_header(canvas: &mut Canvas, header: &HeaderInfo, theme: &Theme, cols: usize) {
    let text = format!("{} · {} · {}", header.title, header.mode, header.total);
    let (left, right) = center(&text, cols);

    let background = theme
        .colors
        .header_bg
        .as_deref()
        .map(Theme::bg)
        .unwrap_or_default();

    canvas.push(format!(
        "{}{}{background}{left}{text}{right}{}",
        Theme::bold(),
        Theme::fg(&theme.colors.header_fg),
        Theme::reset(),
    ));
}
