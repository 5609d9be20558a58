//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → middleware/ (reference ID, recovery, transaction capture)
//!     → handlers.rs (demo endpoints)
//!     → response.rs (error bodies)
//! ```

pub mod context;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod server;

pub use context::{RequestContext, REFERENCE_ID_HEADER};
pub use middleware::ReferenceIdLayer;
pub use response::AppError;
pub use server::{build_router, AppState, HttpServer};
