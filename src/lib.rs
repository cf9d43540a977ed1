//! Authenticated relay for a microblogging API.
//!
//! Exposes `POST /tweet` and `DELETE /delete/{id}` and forwards each call
//! to the upstream API, signed with OAuth 1.0a one-legged credentials.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::RelayConfig;
pub use http::RelayServer;
pub use lifecycle::Shutdown;
pub use upstream::{Credentials, PostClient};
