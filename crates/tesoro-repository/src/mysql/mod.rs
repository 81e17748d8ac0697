//! MySQL repository implementations.

mod payment_method_repository;

pub use payment_method_repository::MySqlPaymentMethodRepository;
