//! # Infrastructure Layer
//!
//! Everything that touches the outside world: exchange HTTP adapters,
//! the quote cache in front of them and service configuration.

pub mod cache;
pub mod settings;
pub mod venues;
