//! Integration tests for the Groupie file grouping system

mod cli_commands;
mod config_integration;
mod repair_on_load;
mod store_lifecycle;
