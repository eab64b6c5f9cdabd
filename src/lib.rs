//! BigBlueButton Gateway Service
//!
//! This library provides a typed client for a BigBlueButton-style
//! conferencing API and a web service exposing it to a meeting dashboard.
//! The conferencing server owns all meeting lifecycle and session state;
//! this service only signs requests, relays them, and interprets the
//! XML answers.
//!
//! # Modules
//!
//! - `auth`: SHA-256 checksum authentication for API requests
//! - `client`: BbbClient for the create/end/getMeetingInfo/join operations
//! - `xml`: regex-based interpreter for getMeetingInfo payloads
//! - `config`: process-wide immutable configuration and room catalogue
//! - `handlers` / `routes`: the axum HTTP surface
//!
//! # Authentication
//!
//! Every outbound request carries `checksum=<token>` as its final query
//! parameter, where the token is the SHA-256 hex digest of
//! `operation || queryString || sharedSecret` computed over the exact
//! serialized query string. The logic lives in the `auth` module.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod xml;


// Re-export the main API types for ease of use
pub use auth::BbbAuth;
pub use client::BbbClient;
pub use config::GatewayConfig;
pub use error::GatewayError;
pub use handlers::api::AppState;
pub use routes::create_router;
