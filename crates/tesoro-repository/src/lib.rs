//! # Tesoro Repository
//!
//! Generic data access over an injected database session:
//!
//! ```text
//! Caller
//!   ↓  Arc<dyn PaymentMethodRepository>   (generic repository interface)
//! MySqlPaymentMethodRepository            (MySQL / SQLx implementation)
//!   ↓  Arc<dyn Session>                   (injected storage handle)
//! MySQL
//! ```
//!
//! ## Structure
//!
//! ```text
//! src/
//!   traits.rs      ← GenericRepository<T, ID> + PaymentMethodRepository
//!   session.rs     ← Session trait + SqlSession (MySQL pool wrapper)
//!   params.rs      ← QueryParams / ParamValue
//!   query.rs       ← named-parameter expansion + QueryHandle
//!   mysql/
//!     payment_method_repository.rs ← MySqlPaymentMethodRepository
//! ```
//!
//! Every repository operation is a stateless delegation to the session;
//! persistence errors propagate to the caller unchanged.

pub mod mysql;
pub mod params;
pub mod query;
pub mod session;
pub mod traits;

pub use mysql::MySqlPaymentMethodRepository;
pub use params::{ParamValue, QueryParams};
pub use query::QueryHandle;
pub use session::{Session, SqlSession};
pub use traits::{GenericRepository, PaymentMethodRepository};
