//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: `AppState` → `UIViewModel`
//! 2. **Component Rendering**: the view model is drawn into a line buffer
//!
//! [`render_to_string`] returns the frame so it can be inspected in tests;
//! [`render`] clears the terminal and writes the frame to stdout.

use crate::app::AppState;
use crate::domain::Result;
use crate::ui::components;
use crate::ui::helpers::Canvas;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;
use std::io::Write;

const CLEAR_SCREEN: &str = "\u{1b}[2J\u{1b}[H";

/// Renders the current state into a frame `rows` high and `cols` wide.
///
/// Content taller than `rows` is not cut; the frame is only padded so the
/// footer sits on the last lines when there is room.
///
/// # Example
///
/// ```rust
/// use dexview::app::AppState;
/// use dexview::ui::{render_to_string, Theme};
///
/// let state = AppState::new(Theme::default());
/// let frame = render_to_string(&state, 24, 80);
/// assert!(frame.contains("No results"));
/// ```
#[must_use]
pub fn render_to_string(state: &AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(cols);
    render_viewmodel(&viewmodel, &state.theme, rows, cols)
}

/// Clears the terminal and writes the current frame to stdout.
///
/// # Errors
///
/// Returns [`DexError::Io`](crate::DexError::Io) if stdout cannot be written.
pub fn render(state: &AppState, rows: usize, cols: usize) -> Result<()> {
    let frame = render_to_string(state, rows, cols);
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(CLEAR_SCREEN.as_bytes())?;
    stdout.write_all(frame.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Chooses the layout: the modal replaces the grid while it is open.
fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) -> String {
    let mut canvas = Canvas::new();

    if let Some(modal) = &vm.modal {
        components::render_detail_mode(&mut canvas, vm, modal, theme, rows, cols);
    } else {
        components::render_list_mode(&mut canvas, vm, theme, rows, cols);
    }

    canvas.into_string()
}
