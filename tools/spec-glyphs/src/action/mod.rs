//! Implementations of the [`Action`][action]s.
//!
//! [action]: crate::cli::Action

pub mod characters;
pub mod emit;
pub mod usages;
