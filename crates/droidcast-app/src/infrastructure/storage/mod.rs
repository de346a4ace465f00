//! Persistence for the application configuration.

pub mod config;
