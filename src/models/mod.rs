//! Domain models
//!
//! Target identity, benchmark selection and run reports.

pub mod benchmark;
pub mod target;

pub use benchmark::*;
pub use target::*;
