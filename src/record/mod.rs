//! Record module for building launch descriptors

pub mod generator;
pub mod types;

pub use generator::CommandGenerator;
pub use types::{LaunchDescription, NodeRecord, OutputMode};
