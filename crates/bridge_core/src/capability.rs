//! Capability contract shared by wrappers and embeddable providers.
//!
//! # Responsibility
//! - Define the minimal `load` / `refresh` surface a wrapper can drive.
//! - Name the well-known token providers register under.
//!
//! # Invariants
//! - Both operations are fire-and-forget: no return value, no error.
//! - Completion is observable only through the implementer's own status.

/// Well-known lookup token for explicit `Refreshable` registrations.
pub const REFRESH_TOKEN: &str = "refreshable";

/// Contract for content units that a wrapper can drive.
///
/// Implementers may start deferred work; callers never wait for it.
/// Repeated or overlapping calls are always accepted.
pub trait Refreshable {
    /// Begins a (possibly deferred) data-population operation.
    fn load(&self);

    /// Begins a (possibly deferred) re-population operation.
    fn refresh(&self);
}
