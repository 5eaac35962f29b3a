//! polyflow_launch library
//!
//! Builds launch descriptors for Polyflow hardware nodes: a node's parameters,
//! configuration and connection lists travel to the process as JSON in
//! `POLYFLOW_*` environment variables.

pub mod config;
pub mod environment;
pub mod error;
pub mod launcher;
pub mod presets;
pub mod record;

use config::NodeLaunchConfig;
use error::Result;
use record::{CommandGenerator, LaunchDescription};
use std::path::Path;

impl LaunchDescription {
    /// Launch descriptor with a single node built from `config`
    pub fn from_config(config: &NodeLaunchConfig) -> Result<Self> {
        let node = CommandGenerator::generate_node_record(config)?;
        log::debug!(
            "Generated launch record for {}/{} as {}",
            node.package,
            node.executable,
            node.name
        );
        let mut description = Self::new();
        description.node.push(node);
        Ok(description)
    }
}

/// Launch description for the built-in ODrive S1 node
pub fn generate_launch_description() -> Result<LaunchDescription> {
    LaunchDescription::from_config(&presets::odrive_s1())
}

/// Load a node launch config file and build its launch description
pub fn load_launch_description(path: &Path) -> Result<LaunchDescription> {
    let config = config::load_config(path)?;
    LaunchDescription::from_config(&config)
}
