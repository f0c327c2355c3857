//! Typed client for the Twitter v1.1 block and mute endpoints.
//!
//! # Overview
//! `Client` exposes two resource services, `block` (`blocks/`) and `mute`
//! (`mutes/users/`), each with `create`, `destroy`, `ids` and `list`.
//! Parameters travel in the query string, responses decode into `User`,
//! `CursoredIds` and `CursoredUsers`.
//!
//! # Design
//! - Requests and responses are plain data (`HttpRequest`/`HttpResponse`);
//!   a `Transport` performs the round-trip, `UreqTransport` by default.
//! - Every operation is also available as a `build_*`/`parse_*` pair for
//!   callers that execute requests themselves.
//! - A structured API error body replaces the bare HTTP error whenever the
//!   server sends one (`relevant_error`).
//! - `Pages` walks cursored collections one request per page.

pub mod client;
pub mod config;
pub mod cursor;
pub mod error;
pub mod http;
pub mod params;
pub mod service;
pub mod transport;
pub mod types;

pub use client::Client;
pub use config::Config;
pub use cursor::{Cursored, CursoredIds, CursoredUsers, Pages, FIRST_PAGE, NO_MORE_PAGES};
pub use error::{relevant_error, ApiError, Error, ErrorDetail};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use params::{CreateParams, CursorParams, DestroyParams, IdsParams, ListParams, QueryParams, TargetParams};
pub use service::{RelationshipService, Reply};
pub use transport::{Transport, UreqTransport};
pub use types::{Entities, Tweet, User};
