//! Empty state component renderer.

use crate::ui::helpers::{center, Canvas};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the centered two-line empty state.
///
/// # Layout
///
/// ```text
/// [2 blank lines]
/// [padding] No results [padding]
/// [padding] Type `reset` to return to the full list [padding]
/// ```
pub fn render_empty_state(canvas: &mut Canvas, empty: &EmptyState, theme: &Theme, cols: usize) {
    canvas.blank();
    canvas.blank();

    let (left, right) = center(&empty.message, cols);
    canvas.push(format!(
        "{}{left}{}{right}{}",
        Theme::fg(&theme.colors.empty_state_fg),
        empty.message,
        Theme::reset()
    ));

    let (left, right) = center(&empty.subtitle, cols);
    canvas.push(format!(
        "{}{}{left}{}{right}{}",
        Theme::dim(),
        Theme::fg(&theme.colors.text_dim),
        empty.subtitle,
        Theme::reset()
    ));
}
