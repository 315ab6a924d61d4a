//! The generative capability contract.
//!
//! A capability is an on-device text primitive (summarizer or writer) with
//! an availability / create / ready / invoke / destroy lifecycle. Both
//! primitives are instances of the same two traits; callers pick one by
//! [`CapabilityKind`](crate::types::CapabilityKind) rather than by type.

use crate::types::GenerationOptions;
use async_trait::async_trait;
use std::fmt;

use super::error::CapabilityError;

/// What the backing model reports before any instance is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// Ready to use immediately.
    Available,
    /// Usable after a download; readiness must be awaited.
    Downloadable,
    /// Absent or unsupported on this device.
    Unavailable,
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Downloadable => write!(f, "downloadable"),
            Self::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// A download progress event. `loaded` is a fraction in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DownloadProgress {
    pub loaded: f64,
}

impl DownloadProgress {
    pub fn percent(&self) -> f64 {
        (self.loaded * 100.0).clamp(0.0, 100.0)
    }
}

/// Observer for download progress. Purely diagnostic.
pub type ProgressObserver<'a> = &'a (dyn Fn(DownloadProgress) + Send + Sync);

/// Factory side of the contract.
///
/// # Laws
///
/// - **L1 (Probe Independence)**: `availability()` has no effect on later
///   calls; probing twice is the same as probing once.
///
/// - **L2 (Scoped Instances)**: every handle returned by `create()` is
///   exclusively owned by its caller and unaffected by other handles.
///   ```text
///   h1 = create(o1); h2 = create(o2)
///   h1.invoke(x)  // unaffected by h2's options or lifecycle
///   ```
///
/// This trait is **object-safe** and can be used as `dyn Capability`.
#[async_trait]
pub trait Capability: Send + Sync {
    async fn availability(&self) -> Availability;

    /// Acquires an instance configured by `options`.
    async fn create(
        &self,
        options: &GenerationOptions,
    ) -> Result<Box<dyn CapabilityHandle>, CapabilityError>;
}

/// A single acquired capability instance.
///
/// # Laws
///
/// - **L1 (Ready Before Invoke)**: once `ready()` returns `Ok`, `invoke()`
///   does not need to download anything.
///
/// - **L2 (Destroy Is Final)**: `destroy()` consumes the handle; it never
///   fails from the caller's point of view.
#[async_trait]
pub trait CapabilityHandle: Send {
    /// Waits until the instance can be invoked, reporting download progress.
    async fn ready(&mut self, on_progress: ProgressObserver<'_>) -> Result<(), CapabilityError>;

    /// Runs the primitive (summarize or write) on `input`.
    async fn invoke(&mut self, input: &str) -> Result<String, CapabilityError>;

    /// Releases the instance.
    async fn destroy(self: Box<Self>);
}
