//! Interface layer: argv CLI and the interactive shell.

pub mod cli;
pub mod shell;
