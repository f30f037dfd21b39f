//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values; they
/// carry no identity of their own. A tax id or an order summary are value
/// objects, a client or a work order are entities.
///
/// The bounds keep value objects cheap to copy, comparable and debuggable.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
