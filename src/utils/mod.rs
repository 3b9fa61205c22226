//! Shared helpers.

pub mod open;
pub mod path;
