//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build event logger → Start listener
//!
//! Shutdown (shutdown.rs):
//!     Trigger or Ctrl+C → Stop accepting → Drain in-flight requests → Exit
//! ```
//!
//! # Design Decisions
//! - The event sink is fixed before the listener starts
//! - Shutdown is graceful: in-flight transactions still get logged

pub mod shutdown;

pub use shutdown::Shutdown;
