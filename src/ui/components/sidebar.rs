//! Category sidebar renderer.
//!
//! The terminal frame is line-oriented, so the sidebar is drawn as a block of
//! wrapped entries above the grid rather than a side column. The active entry
//! uses the selection colours; every other entry its category colour.

use crate::ui::helpers::{text_width, Canvas};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SidebarInfo;

const LABEL: &str = "Types: ";

pub fn render_sidebar(canvas: &mut Canvas, sidebar: &SidebarInfo, theme: &Theme, cols: usize) {
    let mut line = String::from(LABEL);
    let mut width = text_width(LABEL);

    for entry in &sidebar.entries {
        let label = if entry.is_active {
            format!("[{}]", entry.name)
        } else {
            entry.name.clone()
        };
        let label_width = text_width(&label) + 1;

        if width + label_width > cols && width > text_width(LABEL) {
            canvas.push(std::mem::replace(&mut line, " ".repeat(text_width(LABEL))));
            width = text_width(LABEL);
        }

        let styled = if entry.is_active {
            format!(
                "{}{}{label}{}",
                Theme::fg(&theme.colors.selection_fg),
                Theme::bg(&theme.colors.selection_bg),
                Theme::reset()
            )
        } else {
            format!("{}{label}{}", Theme::fg(&entry.color), Theme::reset())
        };
        line.push_str(&styled);
        line.push(' ');
        width += label_width;
    }
    canvas.push(line);

    if let Some(notice) = &sidebar.notice {
        canvas.push(format!(
            "{}{}{notice}{}",
            " ".repeat(text_width(LABEL)),
            Theme::fg(&theme.colors.text_dim),
            Theme::reset()
        ));
    }
}
