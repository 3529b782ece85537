//! Harvest reporting CLI library.
//!
//! This crate provides the `hv` command-line interface over the Harvest API.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, PeriodArg, UserSelection};
pub use config::Config;
