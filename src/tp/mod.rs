//! Targetprocess REST API client.
//!
//! The dispatch layer only sees the `EntityApi` trait; `TpClient` is the
//! concrete implementation over the REST v1 endpoints. The client owns the
//! entity-type cache whose population is triggered once at startup and
//! which falls back to a live fetch while cold.

pub mod api;
mod client;
mod error;
mod models;


pub use api::EntityApi;
pub use client::TpClient;
pub use error::{TpError, TpResult};
pub use models::{EntityTypeInfo, SearchQuery, SearchResult};
