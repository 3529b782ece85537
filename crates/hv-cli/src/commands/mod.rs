//! CLI subcommand implementations.

pub mod clients;
pub mod entries;
pub mod projects;
pub mod tasks;
pub mod timers;
pub mod users;
mod util;

#[cfg(test)]
mod fixtures;
