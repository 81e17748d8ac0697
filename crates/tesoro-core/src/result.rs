//! Result type aliases for Tesoro.

use crate::TesoroError;

/// A specialized `Result` type for Tesoro operations.
pub type TesoroResult<T> = Result<T, TesoroError>;

/// A boxed future returning a `TesoroResult`.
pub type BoxFuture<'a, T> = std::pin::Pin<Box<dyn std::future::Future<Output = TesoroResult<T>> + Send + 'a>>;
