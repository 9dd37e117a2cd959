//! End-to-end flows through the controller and the fetch worker against an
//! in-memory catalog.

use async_trait::async_trait;
use dexview::api::{CatalogApi, ListPage};
use dexview::app::{FilterMode, Notice, SidebarStatus};
use dexview::domain::{Category, CategorySlot, ListReference, Sprites, PLACEHOLDER_IMAGE};
use dexview::worker::{FetchRequest, FetchWorker};
use dexview::{handle_event, ui, Action, AppState, DexError, Event, Item, Result, Theme};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const BASE: &str = "https://fake/api/v2";
const ARTWORK_25: &str = "https://fake/art/25.png";

const NAMES: [&str; 10] = [
    "bulbasaur",
    "ivysaur",
    "venusaur",
    "charmander",
    "charmeleon",
    "charizard",
    "squirtle",
    "wartortle",
    "blastoise",
    "caterpie",
];

/// 151 entries; `fire` holds every multiple of six.
#[derive(Default)]
struct Catalog {
    failing: HashSet<u32>,
    /// Makes every page listing fail.
    listing_down: AtomicBool,
}

impl Catalog {
    fn name(id: u32) -> String {
        NAMES
            .get(id as usize - 1)
            .map_or_else(|| format!("mon-{id}"), |name| (*name).to_string())
    }

    fn reference(id: u32) -> ListReference {
        ListReference {
            name: Self::name(id),
            url: format!("{BASE}/pokemon/{id}/"),
        }
    }
}

fn not_found(url: &str) -> DexError {
    DexError::Transport {
        url: url.to_string(),
        status: Some(404),
        message: "Not Found".to_string(),
    }
}

#[async_trait]
impl CatalogApi for Catalog {
    async fn list_page(&self, limit: usize, offset: usize) -> Result<ListPage> {
        if self.listing_down.load(Ordering::SeqCst) {
            return Err(not_found(&format!("{BASE}/pokemon?offset={offset}")));
        }
        let end = (offset + limit).min(151);
        Ok(ListPage {
            references: (offset..end).map(|i| Self::reference(i as u32 + 1)).collect(),
            total_count: 151,
        })
    }

    async fn get_detail(&self, locator: &str) -> Result<Item> {
        let id = ListReference {
            name: String::new(),
            url: locator.to_string(),
        }
        .id_hint()
        .filter(|id| !self.failing.contains(id))
        .ok_or_else(|| not_found(locator))?;

        let sprites = if id == 25 {
            Sprites {
                official_artwork: Some(ARTWORK_25.to_string()),
                ..Sprites::default()
            }
        } else {
            Sprites {
                front_default: Some(format!("https://fake/sprites/{id}.png")),
                ..Sprites::default()
            }
        };

        let mut categories = vec![CategorySlot {
            slot: 1,
            name: "normal".to_string(),
        }];
        if id % 6 == 0 {
            categories[0].name = "fire".to_string();
        }

        Ok(Item {
            id,
            name: Self::name(id),
            categories,
            sprites,
            stats: vec![],
            height: 10,
            weight: 100,
            base_experience: Some(64),
        })
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(["normal", "fire", "stellar", "unknown"]
            .into_iter()
            .map(Category::new)
            .collect())
    }

    async fn items_by_category(&self, category: &str) -> Result<Vec<ListReference>> {
        match category {
            "fire" => Ok((1..=151).filter(|id| id % 6 == 0).map(Self::reference).collect()),
            other => Err(not_found(other)),
        }
    }
}

struct Harness {
    state: AppState,
    catalog: Arc<Catalog>,
    worker: FetchWorker<Catalog>,
}

impl Harness {
    fn new(catalog: Catalog) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            state: AppState::new(Theme::default()),
            worker: FetchWorker::new(Arc::clone(&catalog)),
            catalog,
        }
    }

    fn set_listing_down(&self, down: bool) {
        self.catalog.listing_down.store(down, Ordering::SeqCst);
    }

    /// Sends an event and returns its fetch requests without running them.
    fn send(&mut self, event: Event) -> Vec<FetchRequest> {
        let (_, actions) = handle_event(&mut self.state, &event).unwrap();
        actions.iter().filter_map(Action::as_fetch).cloned().collect()
    }

    /// Runs a request and feeds its response back. Returns whether it applied.
    async fn complete(&mut self, request: FetchRequest) -> bool {
        let response = self.worker.handle(request).await;
        let (applied, actions) = handle_event(&mut self.state, &Event::Fetched(response)).unwrap();
        assert!(actions.is_empty());
        applied
    }

    /// Sends an event and completes every fetch it issues.
    async fn run(&mut self, event: Event) {
        for request in self.send(event) {
            self.complete(request).await;
        }
    }

    fn visible_ids(&self) -> Vec<u32> {
        self.state.visible_items().iter().map(|item| item.id).collect()
    }

    async fn mounted(catalog: Catalog) -> Self {
        let mut harness = Self::new(catalog);
        harness.run(Event::Mount).await;
        harness
    }
}

#[tokio::test]
async fn mount_shows_first_page_and_sidebar() {
    let harness = Harness::mounted(Catalog::default()).await;
    let state = &harness.state;

    assert_eq!(harness.visible_ids(), (1..=20).collect::<Vec<_>>());
    assert_eq!(state.total_pages(), 8);
    assert!(!state.loading);
    assert_eq!(state.sidebar.status(), &SidebarStatus::Ready);

    let names: Vec<&str> = state.sidebar.categories().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["normal", "fire"]);

    let frame = ui::render_to_string(state, 40, 120);
    assert!(frame.contains("Page 1 of 8"));
    assert!(frame.contains("#001"));
}

#[tokio::test]
async fn last_page_is_partial_and_beyond_is_ignored() {
    let mut harness = Harness::mounted(Catalog::default()).await;

    harness.run(Event::GoToPage(8)).await;
    assert_eq!(harness.state.page, 8);
    assert_eq!(harness.visible_ids(), (141..=151).collect::<Vec<_>>());

    assert!(harness.send(Event::GoToPage(9)).is_empty());
    assert!(harness.send(Event::NextPage).is_empty());
    assert_eq!(harness.state.page, 8);
}

#[tokio::test]
async fn failed_detail_is_dropped_with_a_warning() {
    let catalog = Catalog {
        failing: HashSet::from([3]),
        ..Catalog::default()
    };
    let harness = Harness::mounted(catalog).await;

    assert_eq!(harness.visible_ids().len(), 19);
    assert!(!harness.visible_ids().contains(&3));
    assert!(matches!(&harness.state.notice, Some(Notice::Warning(m)) if m.contains("1 of 20")));
}

#[tokio::test]
async fn category_pages_locally_and_show_all_returns_to_server() {
    let mut harness = Harness::mounted(Catalog::default()).await;

    harness.run(Event::FilterByCategory("Fire".to_string())).await;
    assert_eq!(harness.state.filter_mode, FilterMode::Category("fire".to_string()));
    assert_eq!(harness.state.total_pages(), 2);
    assert_eq!(harness.visible_ids().first(), Some(&6));

    // Client pages never touch the network.
    assert!(harness.send(Event::NextPage).is_empty());
    assert_eq!(harness.visible_ids(), vec![126, 132, 138, 144, 150]);

    harness.run(Event::ShowAll).await;
    assert!(harness.state.filter_mode.is_unfiltered());
    assert!(harness.state.category_buffer.is_empty());
    assert_eq!(harness.state.page, 1);
    assert_eq!(harness.state.total_pages(), 8);
}

#[tokio::test]
async fn failed_category_restores_previous_mode() {
    let mut harness = Harness::mounted(Catalog::default()).await;

    harness.run(Event::SidebarSelect("normal".to_string())).await;
    assert!(harness.state.filter_mode.is_unfiltered());
    assert!(matches!(harness.state.notice, Some(Notice::Error(_))));
    assert_eq!(harness.visible_ids().len(), 20);
}

#[tokio::test]
async fn stale_page_response_is_discarded() {
    let mut harness = Harness::mounted(Catalog::default()).await;

    let page_two = harness.send(Event::GoToPage(2));
    let fire = harness.send(Event::FilterByCategory("fire".to_string()));

    assert!(harness.complete(fire[0].clone()).await);
    assert!(!harness.complete(page_two[0].clone()).await);

    assert_eq!(harness.state.filter_mode, FilterMode::Category("fire".to_string()));
    assert!(harness.visible_ids().iter().all(|id| id % 6 == 0));
}

#[tokio::test]
async fn search_narrows_and_clearing_restores() {
    let mut harness = Harness::mounted(Catalog::default()).await;

    harness.run(Event::Search("SAUR".to_string())).await;
    assert_eq!(harness.visible_ids(), vec![1, 2, 3]);
    assert_eq!(harness.state.total_pages(), 1);

    let requests = harness.send(Event::Search(String::new()));
    assert_eq!(requests.len(), 1);
    harness.complete(requests[0].clone()).await;
    assert_eq!(harness.visible_ids(), (1..=20).collect::<Vec<_>>());

    harness.run(Event::FilterByCategory("fire".to_string())).await;
    harness.run(Event::GoToPage(2)).await;
    harness.run(Event::Search("mon-12".to_string())).await;
    assert_eq!(harness.visible_ids(), vec![12, 120, 126]);

    assert!(harness.send(Event::Search("  ".to_string())).is_empty());
    assert_eq!(harness.state.page, 2);
}

#[tokio::test]
async fn suggestions_are_capped_and_selectable() {
    let mut harness = Harness::mounted(Catalog::default()).await;

    harness.run(Event::UpdateSuggestions("m".to_string())).await;
    assert!(harness.state.suggestions.is_empty());

    harness.run(Event::UpdateSuggestions("mon".to_string())).await;
    assert_eq!(harness.state.suggestions.len(), 5);

    harness.run(Event::UpdateSuggestions("char".to_string())).await;
    assert_eq!(harness.state.suggestions.len(), 3);

    harness.run(Event::SelectSuggestion(2)).await;
    assert_eq!(harness.visible_ids(), vec![6]);
    assert_eq!(harness.state.search.term, "charizard");
    assert!(harness.state.suggestions.is_empty());
}

#[tokio::test]
async fn artwork_fallback_and_image_failure() {
    let mut harness = Harness::mounted(Catalog::default()).await;
    harness.run(Event::GoToPage(2)).await;

    let pikachu = harness.state.find_item(25).cloned().unwrap();
    assert_eq!(harness.state.image_for(&pikachu), ARTWORK_25);

    harness.run(Event::OpenDetail(25)).await;
    assert!(harness.state.modal_open);
    let frame = ui::render_to_string(&harness.state, 40, 120);
    assert!(frame.contains("#025"));

    harness.run(Event::ImageFailed(25)).await;
    assert_eq!(harness.state.image_for(&pikachu), PLACEHOLDER_IMAGE);

    harness.run(Event::Reset).await;
    assert!(!harness.state.modal_open);
    assert_eq!(harness.state.page, 1);
}

#[tokio::test]
async fn overlapping_category_failure_leaves_category_selectable() {
    let mut harness = Harness::mounted(Catalog::default()).await;

    let fire = harness.send(Event::FilterByCategory("fire".to_string()));
    let normal = harness.send(Event::FilterByCategory("normal".to_string()));

    assert!(harness.complete(normal[0].clone()).await);
    assert!(!harness.complete(fire[0].clone()).await);

    assert!(harness.state.filter_mode.is_unfiltered());
    assert!(!harness.state.loading);
    assert_eq!(harness.visible_ids(), (1..=20).collect::<Vec<_>>());

    let again = harness.send(Event::FilterByCategory("fire".to_string()));
    assert_eq!(again.len(), 1);
    assert!(harness.complete(again[0].clone()).await);
    assert_eq!(harness.state.total_pages(), 2);
}

#[tokio::test]
async fn failed_show_all_keeps_category_view() {
    let mut harness = Harness::mounted(Catalog::default()).await;
    harness.run(Event::FilterByCategory("fire".to_string())).await;
    harness.run(Event::GoToPage(2)).await;

    harness.set_listing_down(true);
    harness.run(Event::ShowAll).await;

    assert_eq!(harness.state.filter_mode, FilterMode::Category("fire".to_string()));
    assert_eq!(harness.state.page, 2);
    assert_eq!(harness.visible_ids(), vec![126, 132, 138, 144, 150]);
    assert!(matches!(harness.state.notice, Some(Notice::Error(_))));

    let frame = ui::render_to_string(&harness.state, 40, 120);
    assert!(frame.contains("Page 2 of 2"));

    // The buffer is only dropped once the full catalog actually loads.
    assert_eq!(harness.state.buffer_category.as_deref(), Some("fire"));
    harness.set_listing_down(false);
    harness.run(Event::ShowAll).await;
    assert!(harness.state.category_buffer.is_empty());
    assert_eq!(harness.send(Event::FilterByCategory("fire".to_string())).len(), 1);
}

#[tokio::test]
async fn failed_load_page_keeps_page_and_search() {
    let mut harness = Harness::mounted(Catalog::default()).await;
    harness.run(Event::GoToPage(3)).await;
    harness.run(Event::Search("mon-4".to_string())).await;
    assert_eq!(harness.visible_ids(), (41..=49).collect::<Vec<_>>());

    harness.set_listing_down(true);
    harness.run(Event::LoadPage(5)).await;

    assert_eq!(harness.state.search.term, "mon-4");
    assert_eq!(harness.visible_ids(), (41..=49).collect::<Vec<_>>());
    assert_eq!(harness.state.search.pre_search_page, Some(3));
    assert!(harness.state.restore_point.is_none());

    harness.set_listing_down(false);
    harness.run(Event::Search(String::new())).await;
    assert_eq!(harness.state.page, 1);
    assert_eq!(harness.visible_ids(), (1..=20).collect::<Vec<_>>());
}

#[tokio::test]
async fn failed_search_clear_keeps_matches() {
    let mut harness = Harness::mounted(Catalog::default()).await;
    harness.run(Event::Search("saur".to_string())).await;

    harness.set_listing_down(true);
    harness.run(Event::Search(String::new())).await;

    assert_eq!(harness.state.search.term, "saur");
    assert_eq!(harness.visible_ids(), vec![1, 2, 3]);
    assert!(matches!(harness.state.notice, Some(Notice::Error(_))));
}

#[tokio::test]
async fn clearing_refined_category_search_returns_to_pre_search_page() {
    let mut harness = Harness::mounted(Catalog::default()).await;
    harness.run(Event::FilterByCategory("fire".to_string())).await;
    harness.run(Event::GoToPage(2)).await;

    // 24 matches over two pages, then refined to three on one page.
    harness.run(Event::Search("mon".to_string())).await;
    assert_eq!(harness.state.total_pages(), 2);
    harness.run(Event::GoToPage(2)).await;
    harness.run(Event::Search("mon-12".to_string())).await;
    assert_eq!(harness.state.total_pages(), 1);
    assert_eq!(harness.state.page, 1);

    assert!(harness.send(Event::Search(String::new())).is_empty());
    assert_eq!(harness.state.page, 2);
    assert!(harness.state.page <= harness.state.total_pages());
    assert_eq!(harness.visible_ids(), vec![126, 132, 138, 144, 150]);
}
