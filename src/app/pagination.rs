//! Page arithmetic shared by server and client pagination.

use crate::domain::item::{format_display_id, Item};

/// Fixed page size.
pub const ITEMS_PER_PAGE: usize = 20;

/// Offset of the first item on a 1-based page, saturating on huge pages.
///
/// ```
/// use dexview::app::pagination::offset_for;
/// assert_eq!(offset_for(1), 0);
/// assert_eq!(offset_for(3), 40);
/// ```
#[must_use]
pub const fn offset_for(page: usize) -> usize {
    page.saturating_sub(1).saturating_mul(ITEMS_PER_PAGE)
}

/// Returns `true` when `page` lies in `[1, total_pages]`.
#[must_use]
pub const fn is_valid_page(page: usize, total_pages: usize) -> bool {
    page >= 1 && page <= total_pages
}

/// Items on a 1-based page of an in-memory set. Empty past the end.
#[must_use]
pub fn page_slice(items: &[Item], page: usize) -> &[Item] {
    let start = offset_for(page).min(items.len());
    let end = (start + ITEMS_PER_PAGE).min(items.len());
    &items[start..end]
}

/// `#001 - #020` style label for the identifiers on a page.
#[must_use]
pub fn range_label(visible: &[Item]) -> Option<String> {
    let first = visible.first()?;
    let last = visible.last()?;
    Some(format!(
        "{} - {}",
        format_display_id(first.id),
        format_display_id(last.id)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sprites;

    fn items(n: u32) -> Vec<Item> {
        (1..=n)
            .map(|id| Item {
                id,
                name: format!("item-{id}"),
                categories: vec![],
                sprites: Sprites::default(),
                stats: vec![],
                height: 1,
                weight: 1,
                base_experience: None,
            })
            .collect()
    }

    #[test]
    fn slices_full_and_partial_pages() {
        let all = items(45);
        assert_eq!(page_slice(&all, 1).len(), 20);
        assert_eq!(page_slice(&all, 3).len(), 5);
        assert_eq!(page_slice(&all, 3)[0].id, 41);
        assert!(page_slice(&all, 4).is_empty());
    }

    #[test]
    fn huge_pages_saturate() {
        assert_eq!(offset_for(usize::MAX), usize::MAX);
        assert!(page_slice(&items(3), usize::MAX).is_empty());
    }

    #[test]
    fn page_validity() {
        assert!(!is_valid_page(0, 8));
        assert!(is_valid_page(8, 8));
        assert!(!is_valid_page(9, 8));
    }

    #[test]
    fn range_label_pads_identifiers() {
        let all = items(45);
        assert_eq!(range_label(page_slice(&all, 1)).as_deref(), Some("#001 - #020"));
        assert_eq!(range_label(&[]), None);
    }
}
