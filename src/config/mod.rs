//! Node launch configuration: typed records and file loading

pub mod loader;
pub mod types;

pub use loader::load_config;
pub use types::{Connection, ControlMode, NodeConfiguration, NodeLaunchConfig, NodeParameters};
