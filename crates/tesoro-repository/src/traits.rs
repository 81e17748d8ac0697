//! Repository trait definitions.

use crate::params::QueryParams;
use crate::query::QueryHandle;
use async_trait::async_trait;
use tesoro_core::{Interface, PaymentMethodId, TesoroResult};
use tesoro_domain::PaymentMethod;

/// Generic repository over an entity type `T` keyed by identifier `ID`.
///
/// A uniform CRUD/query facade over the injected session: every operation
/// is a synchronous, stateless delegation to the backing store, and
/// persistence errors propagate to the caller unchanged. Queries are
/// caller-supplied strings with `:name` parameters.
///
/// There is deliberately no delete operation on this surface.
#[async_trait]
pub trait GenericRepository<T, ID>: Send + Sync
where
    T: Send + Sync,
    ID: Send + Sync,
{
    /// Lower-level query handle returned by [`create_query`](Self::create_query).
    type Query;

    /// Persists a new entity.
    async fn save(&self, entity: &T) -> TesoroResult<()>;

    /// Reloads the entity from the backing store, overwriting its
    /// in-memory fields. Fails if the entity no longer exists.
    async fn refresh(&self, entity: &mut T) -> TesoroResult<()>;

    /// Applies an update and returns the managed result, which may be a
    /// different instance than the argument. Inserts when the identifier
    /// is not yet present.
    async fn merge(&self, entity: &T) -> TesoroResult<T>;

    /// Looks up an entity by primary key. Absence is `Ok(None)`, never an
    /// error.
    async fn find(&self, id: &ID) -> TesoroResult<Option<T>>;

    /// Returns all entities matching the given query.
    async fn get(&self, query: &str, params: &QueryParams) -> TesoroResult<Vec<T>>;

    /// Returns entities matching the given query, capped at `max_results`.
    /// Ordering is whatever the query specifies.
    async fn get_limited(
        &self,
        query: &str,
        params: &QueryParams,
        max_results: u64,
    ) -> TesoroResult<Vec<T>>;

    /// Returns the single entity matching the given query. Zero matches is
    /// a no-result error; more than one is a non-unique-result error.
    async fn get_single_result(&self, query: &str, params: &QueryParams) -> TesoroResult<T>;

    /// Parameterless form of [`get_single_result`](Self::get_single_result).
    async fn get_single(&self, query: &str) -> TesoroResult<T> {
        self.get_single_result(query, &QueryParams::new()).await
    }

    /// Returns every entity of this type.
    async fn get_all(&self) -> TesoroResult<Vec<T>>;

    /// Returns a lower-level query handle. Useful to set parameters and
    /// paging manually before execution; prefer the operations above.
    fn create_query(&self, query: &str) -> Self::Query;

    /// Counts entities whose `column` equals the given string value.
    async fn count(&self, column: &str, value: &str) -> TesoroResult<u64>;
}

/// Payment method repository interface.
///
/// Fixes the generic surface to the payment method entity so the trait
/// object can be registered for dependency injection.
pub trait PaymentMethodRepository:
    GenericRepository<PaymentMethod, PaymentMethodId, Query = QueryHandle> + Interface
{
}
