//! Built-in node launch configurations

use crate::{
    config::{ControlMode, NodeConfiguration, NodeLaunchConfig, NodeParameters},
    record::OutputMode,
};

pub const ODRIVE_S1_NODE_ID: &str = "694214dad1dce07ccaa7266e";
pub const ODRIVE_S1_PACKAGE: &str = "odrive_s1";
pub const ODRIVE_S1_EXECUTABLE: &str = "odrive_s1_node";

/// ODrive S1 driver on the robot base joint
pub fn odrive_s1() -> NodeLaunchConfig {
    NodeLaunchConfig {
        node_id: ODRIVE_S1_NODE_ID.to_string(),
        package: ODRIVE_S1_PACKAGE.to_string(),
        executable: ODRIVE_S1_EXECUTABLE.to_string(),
        name: Some(ODRIVE_S1_EXECUTABLE.to_string()),
        output: OutputMode::Screen,
        parameters: NodeParameters {
            joint: "6942143ad1dce07ccaa72647".to_string(),
            control_mode: ControlMode::Position,
            lower_position: 0.0,
            upper_position: 360.0,
            position_step: None,
            max_effort: 0.0,
            effort_step: 0.1,
            max_velocity: 0.0,
            velocity_step: 0.1,
        },
        configuration: NodeConfiguration {
            namespace: "/robot/base".to_string(),
            rate_hz: 150,
            lifecycle: true,
        },
        inbound_connections: Vec::new(),
        outbound_connections: Vec::new(),
    }
}
