//! Domain layer for dexview.
//!
//! This module contains the core catalog types, independent of the HTTP
//! client, the controller, and the terminal renderer.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: Item, list reference, and category models
//!
//! # Examples
//!
//! ```
//! use dexview::domain::{Category, Result};
//!
//! fn fire() -> Result<Category> {
//!     Ok(Category::new("fire"))
//! }
//! assert_eq!(fire().unwrap().name, "fire");
//! ```

pub mod error;
pub mod item;

pub use error::{DexError, Result};
pub use item::{Category, CategorySlot, Item, ListReference, Sprites, Stat, PLACEHOLDER_IMAGE};
