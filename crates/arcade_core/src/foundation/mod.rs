//! Foundation module - Core utilities and types
//!
//! - Math aliases and planar (x/y) helpers
//! - Frame timing and budgets
//! - Logging setup

pub mod math;
pub mod time;
pub mod logging;
