//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID assigned and echoed)
//!     → handlers.rs (decode input, call upstream client)
//!     → error.rs (failures mapped to 400/404/502/504)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod server;

pub use error::ApiError;
pub use handlers::PostRequest;
pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, RelayServer};
