//! berth-cli
//!
//! Glue around the reconciliation engine: action inputs, config file,
//! AWS credentials, logging and step outputs.

pub mod aws;
pub mod config;
pub mod logging;
pub mod output;
pub mod params;
