//! # Domain Entities
//!
//! Core business concepts of the routing engine.
//!
//! - [`Venue`]: exchange venue with its fee schedule and pair universe
//! - [`RawQuote`]: ephemeral top-of-book quote from one venue

pub mod quote;
pub mod venue;

pub use quote::RawQuote;
pub use venue::{FeeSchedule, Venue};
