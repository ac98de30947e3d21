//! Core utilities shared by every layer
//!
//! The logging macros are exported at the crate root, so this module must be
//! declared first in `lib.rs`.

#[macro_use]
pub mod utils;
pub mod math;
