//! Core traits shared by the domain and data-access layers.

use std::fmt::Display;

/// Trait for entities backed by a database table.
///
/// Carries the table metadata the generic data-access layer needs:
/// table name, identifier column, and the full column list. Implemented
/// manually per entity.
pub trait Entity: Send + Sync {
    /// The entity's identifier type.
    type Id: Send + Sync + Display;

    /// Returns the backing table name.
    fn table_name() -> &'static str;

    /// Returns the primary key column name.
    fn id_column() -> &'static str;

    /// Returns every column of the backing table.
    fn columns() -> &'static [&'static str];

    /// Returns the entity's unique identifier.
    fn id(&self) -> &Self::Id;
}

/// Trait for mapping between domain entities and DTOs.
pub trait Mapper<From, To> {
    /// Maps from source type to target type.
    fn map(from: From) -> To;
}

/// Trait for bidirectional mapping between domain entities and DTOs.
pub trait BiMapper<A, B>: Mapper<A, B> {
    /// Maps from target type back to source type.
    fn map_back(from: B) -> A;
}
