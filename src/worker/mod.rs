//! Background fetch execution.
//!
//! The worker runs every network request on behalf of the controller so that
//! the event loop never blocks on I/O. Results come back as typed responses.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol with generation tokens
//! - `handler`: Worker implementation and fan-out/join logic

pub mod handler;
pub mod messages;

pub use handler::{FetchWorker, Resolved};
pub use messages::{FetchKind, FetchRequest, FetchResponse, Generation};
