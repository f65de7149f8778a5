//! CLI command implementations

pub mod config;
pub mod invert;
pub mod verify;

pub use config::execute as config;
pub use invert::execute as invert;
pub use verify::execute as verify;
