//! Entity trait: identity + a human-facing name.

use crate::Guid;

/// A remote record addressed by guid and looked up by name.
pub trait Entity {
    /// Kind label used in user-facing messages (e.g. "App", "Domain").
    const KIND: &'static str;

    fn guid(&self) -> &Guid;

    fn name(&self) -> &str;
}
