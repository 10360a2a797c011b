//! # Utilities Module
//!
//! Interpolation helpers and reachability checks shared by the generators.

pub mod connectivity;
pub mod math;

pub use connectivity::*;
pub use math::*;
