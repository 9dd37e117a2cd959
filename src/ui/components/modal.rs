//! Detail modal renderer.
//!
//! Replaces the grid while an item is open: name line, categories, image
//! locator, physical data and the stats table with its total.

use crate::ui::helpers::{padding, truncate, Canvas};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailModal;

const STAT_NAME_WIDTH: usize = 16;
const STAT_BAR_MAX: u32 = 255;
const STAT_BAR_WIDTH: u32 = 20;

/// Renders the modal box `cols` wide.
///
/// # Layout
///
/// ```text
/// ┌──────────────────────────────────────────┐
/// │ #006 Charizard                           │
/// │ Types: fire, flying                      │
/// │ Image: https://...                       │
/// │ Height: 1.7 m   Weight: 90.5 kg   Base … │
/// │                                          │
/// │ Stat             Base  EV                │
/// │ hp                 78   0  ██████        │
/// │ Total             534                    │
/// └──────────────────────────────────────────┘
/// ```
pub fn render_modal(canvas: &mut Canvas, modal: &DetailModal, theme: &Theme, cols: usize) {
    let width = cols.max(12);
    let inner = width - 4;
    let border = Theme::fg(&theme.colors.modal_border);
    let reset = Theme::reset();

    let normal = Theme::fg(&theme.colors.text_normal);
    let dim = Theme::fg(&theme.colors.text_dim);
    let bold = Theme::bold();

    let mut rows: Vec<(String, String)> = vec![
        (
            format!("{} {}", modal.display_id, modal.name),
            format!("{bold}{}", Theme::fg(&theme.colors.header_fg)),
        ),
        (format!("Types: {}", category_list(modal)), normal.clone()),
        (format!("Image: {}", modal.image), dim.clone()),
        (
            format!(
                "Height: {:.1} m   Weight: {:.1} kg   Base exp: {}",
                modal.height_m,
                modal.weight_kg,
                modal
                    .base_experience
                    .map_or_else(|| "-".to_string(), |exp| exp.to_string())
            ),
            normal.clone(),
        ),
        (String::new(), normal.clone()),
        (
            format!("{:<STAT_NAME_WIDTH$} {:>4} {:>3}", "Stat", "Base", "EV"),
            format!("{bold}{dim}"),
        ),
    ];

    rows.extend(modal.stats.iter().map(|stat| {
        let filled = (stat.base.min(STAT_BAR_MAX) * STAT_BAR_WIDTH / STAT_BAR_MAX) as usize;
        (
            format!(
                "{:<STAT_NAME_WIDTH$} {:>4} {:>3}  {}",
                stat.name,
                stat.base,
                stat.effort,
                "█".repeat(filled)
            ),
            normal.clone(),
        )
    }));

    rows.push((
        format!("{:<STAT_NAME_WIDTH$} {:>4}", "Total", modal.total),
        format!("{bold}{normal}"),
    ));
    rows.push((String::new(), normal));
    rows.push(("close: back to the list".to_string(), dim));

    canvas.push(format!("{border}┌{}┐{reset}", "─".repeat(width - 2)));
    for (text, style) in rows {
        let text = truncate(&text, inner);
        canvas.push(format!(
            "{border}│{reset} {style}{text}{reset}{} {border}│{reset}",
            padding(&text, inner)
        ));
    }
    canvas.push(format!("{border}└{}┘{reset}", "─".repeat(width - 2)));
}

fn category_list(modal: &DetailModal) -> String {
    if modal.categories.is_empty() {
        return "-".to_string();
    }
    modal
        .categories
        .iter()
        .map(|badge| badge.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
