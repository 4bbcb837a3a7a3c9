//! Persistence liveness seam.

/// A database connection whose liveness commands can probe before they run.
///
/// Liveness may change between two checks; callers must not cache the answer.
pub trait Persistence: Send + Sync {
    fn is_connected(&self) -> bool;
}
