//! Subcommand implementations.

pub mod classify;
pub mod inspect;
pub mod resolve;
