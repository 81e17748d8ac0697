//! # Tesoro Core
//!
//! Core types, traits, and error definitions for Tesoro.
//! This crate provides the foundational abstractions shared by the domain
//! and data-access layers.

pub mod error;
pub mod id;
pub mod result;
pub mod traits;

pub use error::*;
pub use id::*;
pub use result::*;
pub use traits::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
