//! # Spendlog API
//!
//! actix-web server exposing signup, login, token refresh, emailed link
//! handling and expense endpoints. Exported as a library so integration
//! tests can build the app against in-memory stores.

pub mod app;
pub mod bootstrap;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
