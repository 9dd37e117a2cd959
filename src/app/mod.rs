//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the interactive shell (`main.rs`) and the
//! domain/worker layers. It never performs I/O: it turns events into state
//! changes plus actions for the shell to execute.
//!
//! # Architecture
//!
//! ```text
//! Shell command → Event → handle_event → State Mutations → Actions → Fetch worker
//!                              ↑                                          ↓
//!                              └───────── Event::Fetched(response) ───────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Filter mode and pagination source types
//! - [`pagination`]: Page size and page arithmetic
//! - [`sidebar`]: Category sidebar state
//! - [`state`]: Central state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use dexview::app::{handle_event, AppState, Event};
//! use dexview::ui::theme::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (_render, actions) = handle_event(&mut state, &Event::LoadPage(1))?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), dexview::DexError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod pagination;
pub mod sidebar;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{FilterMode, PaginationSource};
pub use pagination::ITEMS_PER_PAGE;
pub use sidebar::{Sidebar, SidebarMessage, SidebarStatus};
pub use state::{AppState, Notice, SearchState, ViewSnapshot};
