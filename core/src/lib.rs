//! Client-side synchronization core for a remote todo collection.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A `Transport` supplied by the
//! host performs the round-trip; `TodoSync` folds each response into the
//! in-memory `ViewState`, and `App` maps user intents onto those operations
//! and derives a `Screen` to draw.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and testable with canned responses.
//! - The store is keyed by id and updated by merge-by-id.
//! - Every sync operation returns a `Result`; on failure the store is left
//!   exactly as it was.

pub mod client;
pub mod error;
pub mod http;
pub mod render;
pub mod store;
pub mod sync;
pub mod transport;
pub mod types;

pub use client::TodoClient;
pub use error::{ApiError, StoreError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use render::{App, Intent, Row, RowMode, Screen};
pub use store::{EditDraft, EditSlot, ViewState};
pub use sync::TodoSync;
pub use transport::Transport;
pub use types::{Completion, Draft, NewTodo, Todo, TodoFields, TodoId, TodoPatch};
