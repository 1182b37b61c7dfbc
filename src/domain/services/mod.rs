//! # Domain Services
//!
//! Domain services encapsulating business logic that doesn't naturally
//! belong to a single entity or value object.
//!
//! ## Services
//!
//! - [`pricing`]: fee-adjusted effective pricing math
//! - [`dca`]: single-asset dollar-cost-averaging backtest

pub mod dca;
pub mod pricing;
