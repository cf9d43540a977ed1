//! Upstream API integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (consumer key/secret, access token/secret)
//!     → credentials.rs (loaded once, immutable)
//!     → client.rs (sign, send with timeout, check status)
//!     → types.rs (payloads, UpstreamError)
//! ```
//!
//! # Security Constraints
//! - Credentials ONLY from environment variables
//! - Never log credentials or signatures
//! - Every upstream call has a bounded duration

pub mod client;
pub mod credentials;
pub mod types;

pub use client::PostClient;
pub use credentials::Credentials;
pub use types::{CreatedPost, UpstreamError, UpstreamResult};
