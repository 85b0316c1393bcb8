//! CLI module for lectern
//!
//! This module contains all CLI command definitions and handlers using clap.

pub mod commands;
pub mod config;
pub mod quiz;
pub mod roster;

pub use commands::{Cli, Commands};
