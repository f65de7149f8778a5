//! Command-line interface

pub mod args;
pub mod commands;
mod input;

pub use args::{Cli, Commands};
pub use input::load_matrix;
