//! # API Module
//!
//! HTTP handlers of the web front end.
//!
//! ## Endpoints
//!
//! - [`index`] - `GET /`: obtains a client-credentials token for the
//!   session and renders the search form
//! - [`search_get`] / [`search_post`] - `GET|POST /search`: runs a lookup for
//!   `artist` and `track` (query string or form body) and renders the result;
//!   redirects to `/` when the session has no valid token
//! - [`health`] - `GET /health`: status and version for monitoring
//!
//! Handlers receive the shared [`AppState`](crate::server::AppState) through
//! an axum `Extension`; nothing is kept in globals.

mod health;
mod index;
mod page;
mod search;

pub use health::health;
pub use index::index;
pub use page::render_page;
pub use search::{search_get, search_post};
