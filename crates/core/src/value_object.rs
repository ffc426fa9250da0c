//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values
/// (e.g. a `MemorySize` of 512 MB equals any other 512 MB). Entities, in
/// contrast, are compared by guid.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
