//! Command-line interface module.

mod args;
pub mod build;
pub mod serve;

pub use args::{BuildArgs, Cli, Commands};
#[cfg(test)]
pub use args::{ScriptArgs, StyleArgs};
