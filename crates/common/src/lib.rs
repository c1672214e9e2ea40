//! Shared building blocks for the contact form workspace: logging setup,
//! runtime environment checks and small boundary types.

pub mod types;
pub mod utils;
pub mod env;
