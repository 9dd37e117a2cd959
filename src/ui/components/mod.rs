//! Composable UI component renderers.
//!
//! Each component appends finished lines to a [`Canvas`].
//!
//! # Components
//!
//! - [`header`]: Title bar with mode and total
//! - [`sidebar`]: Category entries with the active marker
//! - [`search`]: Search box and autocomplete entries
//! - [`grid`]: Item cards
//! - [`modal`]: Detail overlay
//! - [`empty`]: Empty state message
//! - [`footer`]: Status line, pagination bar and command hints
//!
//! # Layout Modes
//!
//! - [`render_list_mode`]: Header + Sidebar + Search + Grid + Footer
//! - [`render_detail_mode`]: Header + Modal + Footer

mod empty;
mod footer;
mod grid;
mod header;
mod modal;
mod search;
mod sidebar;

use crate::ui::helpers::{border, Canvas};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailModal, UIViewModel};

use empty::render_empty_state;
use footer::{render_footer, render_status};
use grid::render_grid;
use header::render_header;
use modal::render_modal;
use search::render_search_bar;
use sidebar::render_sidebar;

/// Lines reserved at the bottom: border, status, pagination bar, hints.
const FOOTER_ROWS: usize = 4;

/// Renders the browsing layout.
///
/// ```text
/// [Header]
/// [Border]
/// [Sidebar entries, when open]
/// [Search box + suggestions]
/// [Card grid or empty state]
/// [Blank padding to fill screen]
/// [Border]
/// [Status line]
/// [Pagination bar]
/// [Hints]
/// ```
pub fn render_list_mode(canvas: &mut Canvas, vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    render_top(canvas, vm, theme, cols);

    if let Some(sidebar) = &vm.sidebar {
        render_sidebar(canvas, sidebar, theme, cols);
    }
    render_search_bar(canvas, &vm.search_bar, theme, cols);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(canvas, empty, theme, cols);
    } else {
        render_grid(canvas, &vm.cards, vm.columns, theme);
    }

    render_bottom(canvas, vm, theme, rows, cols);
}

/// Renders the detail overlay in place of the grid.
pub fn render_detail_mode(
    canvas: &mut Canvas,
    vm: &UIViewModel,
    modal: &DetailModal,
    theme: &Theme,
    rows: usize,
    cols: usize,
) {
    render_top(canvas, vm, theme, cols);
    render_modal(canvas, modal, theme, cols);
    render_bottom(canvas, vm, theme, rows, cols);
}

fn render_top(canvas: &mut Canvas, vm: &UIViewModel, theme: &Theme, cols: usize) {
    render_header(canvas, &vm.header, theme, cols);
    canvas.push(border(&theme.colors.border, cols));
}

fn render_bottom(canvas: &mut Canvas, vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    canvas.fill_to(rows.saturating_sub(FOOTER_ROWS));
    canvas.push(border(&theme.colors.border, cols));

    match &vm.status {
        Some(status) => render_status(canvas, status, theme, cols),
        None => canvas.blank(),
    }
    render_footer(canvas, &vm.footer, theme, cols);
}
