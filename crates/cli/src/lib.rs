//! Cardsmith command line.

pub mod cli;
pub mod commands;
