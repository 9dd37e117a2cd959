//! Actions representing side effects to be executed by the shell.
//!
//! The event handler never performs I/O itself. It returns a `Vec<Action>`
//! alongside its render flag and the shell executes them in order: fetches are
//! handed to the background worker, whose responses come back as
//! [`Event::Fetched`](super::Event::Fetched).
//!
//! # Example
//!
//! ```rust
//! use dexview::app::Action;
//! use dexview::worker::FetchRequest;
//!
//! let actions = vec![Action::Fetch(FetchRequest::page(1, 1, 20, 0))];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::worker::FetchRequest;

/// Commands produced by the event handler for the shell to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hands a request to the fetch worker.
    ///
    /// The request carries the generation current at emission time; the
    /// response is discarded if a newer request supersedes it.
    Fetch(FetchRequest),

    /// Stops the shell loop.
    Exit,
}

impl Action {
    /// Inner request for fetch actions.
    #[must_use]
    pub const fn as_fetch(&self) -> Option<&FetchRequest> {
        match self {
            Self::Fetch(request) => Some(request),
            Self::Exit => None,
        }
    }
}
