//! Card grid renderer.
//!
//! Cards are laid out left to right, `columns` per row. Each card is a small
//! bordered box with the identifier, the name (search match highlighted) and
//! the category badges.

use crate::app::state::CARD_WIDTH;
use crate::ui::helpers::{highlighted_text, padding, truncate, Canvas};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CardItem;

/// Text width inside a card: border and one space on each side.
const INNER_WIDTH: usize = CARD_WIDTH - 4;

/// Renders all cards, one grid row at a time.
pub fn render_grid(canvas: &mut Canvas, cards: &[CardItem], columns: usize, theme: &Theme) {
    for row in cards.chunks(columns.max(1)) {
        let mut top = String::new();
        let mut title = String::new();
        let mut badges = String::new();
        let mut bottom = String::new();

        for card in row {
            let border = Theme::fg(&theme.colors.card_border);
            let reset = Theme::reset();

            top.push_str(&format!("{border}┌{}┐{reset}", "─".repeat(CARD_WIDTH - 2)));
            bottom.push_str(&format!("{border}└{}┘{reset}", "─".repeat(CARD_WIDTH - 2)));

            let name = truncate(&card.name, INNER_WIDTH.saturating_sub(card.display_id.len() + 1));
            let plain = format!("{} {name}", card.display_id);
            let resume = Theme::fg(&theme.colors.text_normal);
            title.push_str(&format!(
                "{border}│{reset} {}{}{reset} {}{resume}{}{reset} {border}│{reset}",
                Theme::fg(&theme.colors.text_dim),
                card.display_id,
                highlighted_text(&name, card.highlight, theme, &resume),
                padding(&plain, INNER_WIDTH),
            ));

            badges.push_str(&format!("{border}│{reset} {} {border}│{reset}", render_badges(card, theme)));
        }

        canvas.push(top);
        canvas.push(title);
        canvas.push(badges);
        canvas.push(bottom);
    }
}

/// Category names in their colours, padded to the card's inner width.
fn render_badges(card: &CardItem, theme: &Theme) -> String {
    let mut out = String::new();
    let mut width = 0;

    for badge in &card.categories {
        let sep = usize::from(width > 0);
        let label = truncate(&badge.name, INNER_WIDTH.saturating_sub(width + sep));
        if label.is_empty() {
            break;
        }
        if sep == 1 {
            out.push(' ');
        }
        width += sep + label.chars().count();
        out.push_str(&format!(
            "{}{}{label}{}",
            Theme::bold(),
            Theme::fg(&badge.color),
            Theme::reset()
        ));
    }

    if card.categories.is_empty() {
        let none = "—";
        width = 1;
        out.push_str(&format!("{}{none}{}", Theme::fg(&theme.colors.text_dim), Theme::reset()));
    }

    out.push_str(&" ".repeat(INNER_WIDTH.saturating_sub(width)));
    out
}
