//! Library entry point for the annexfour CLI.

pub mod commands;
pub mod config;
pub mod error;
pub mod path;
pub mod prompt;
pub mod runtime;
