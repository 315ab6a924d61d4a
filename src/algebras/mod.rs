//! Capability algebras for the study assistant.
//!
//! This module defines the traits that represent the generative
//! **capability**, not any particular backend. Each trait is:
//!
//! - **Object-safe**: usable as `dyn Trait`
//! - **Documented with laws**: properties every implementation must satisfy
//! - **Async via `async_trait`**
//!
//! # Architecture
//!
//! ```text
//! Session / state manager
//!         ↓
//! Generative adapter (generation/)
//!         ↓
//! Capability algebra (algebras/)
//!         ↓
//! Backends (api/)
//! ```
//!
//! # Capability Traits
//!
//! - [`Capability`]: availability probe and instance acquisition
//! - [`CapabilityHandle`]: ready / invoke / destroy of one instance

pub mod capability;
pub mod error;

// Re-exports for convenience
pub use capability::{Availability, Capability, CapabilityHandle, DownloadProgress, ProgressObserver};
pub use error::CapabilityError;
