//! # Tesoro Domain
//!
//! Payment method entities and the flat DTOs used for object-to-object
//! mapping. Entities are plain data holders; no validation is applied at
//! this layer.

pub mod dto;
pub mod payment_method;

pub use dto::*;
pub use payment_method::*;
