//! Identity shared by every stored entity.

use std::fmt;

/// An entity held in a resource collection.
///
/// `KIND` is the user-facing name of the entity and prefixes `NotFound`
/// messages ("Order not found").
pub trait Record: Clone + Send + Sync + 'static {
    /// Identifier type. Orders, drivers, tasks and vehicles use decimal strings,
    /// addresses use integers.
    type Id: PartialEq + Clone + fmt::Display + fmt::Debug + Send + Sync;

    /// Display name of the entity kind.
    const KIND: &'static str;

    /// Returns the record identifier.
    fn id(&self) -> &Self::Id;
}
