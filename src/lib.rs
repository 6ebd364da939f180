//! Provision Grafana users and organization membership from a JSON file.
//!
//! A run loads the desired users, finds or creates the target organization,
//! then for every user that does not exist yet creates it and assigns its
//! role in that organization. Existing users are left alone.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod runner;
pub mod services;
pub mod utils;

pub use error::ProvisionError;
pub use runner::{exit_code, health_exit_code, run, run_exit_code};
