//! Request middleware.
//!
//! # Layering
//! ```text
//! reference_id.rs (assign / propagate correlation ID)
//!     → recover.rs (panics and handler errors → 500 + reference ID)
//!     → router
//!     → capture.rs (per route: log request + response as one event)
//!     → handler
//! ```

pub mod capture;
pub mod recover;
pub mod reference_id;

pub use capture::capture_transaction;
pub use recover::recover;
pub use reference_id::{ReferenceIdLayer, ReferenceIdService};
