//! Launch descriptor data structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Root structure of a launch descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchDescription {
    pub node: Vec<NodeRecord>,
}

impl LaunchDescription {
    pub fn new() -> Self {
        Self { node: Vec::new() }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for LaunchDescription {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a launched process writes its stdout/stderr
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    #[default]
    Screen,
    Log,
    Both,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutputMode::Screen => "screen",
            OutputMode::Log => "log",
            OutputMode::Both => "both",
        };
        f.write_str(s)
    }
}

/// One process to launch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub package: String,
    pub executable: String,
    pub name: String,
    pub output: OutputMode,
    /// Environment overlay applied on top of the launcher's environment
    pub env: Vec<(String, String)>,
    pub cmd: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_node() -> NodeRecord {
        NodeRecord {
            package: "odrive_s1".to_string(),
            executable: "odrive_s1_node".to_string(),
            name: "odrive_s1_node".to_string(),
            output: OutputMode::Screen,
            env: vec![("POLYFLOW_NODE_ID".to_string(), "abc".to_string())],
            cmd: vec![
                "/opt/ros/humble/lib/odrive_s1/odrive_s1_node".to_string(),
                "--ros-args".to_string(),
            ],
        }
    }

    #[test]
    fn test_empty_description() {
        let description = LaunchDescription::new();
        assert!(description.node.is_empty());
        assert!(description.to_json().unwrap().contains("\"node\""));
    }

    #[test]
    fn test_output_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&OutputMode::Screen).unwrap(), "\"screen\"");
        assert_eq!(serde_json::to_string(&OutputMode::Both).unwrap(), "\"both\"");
        assert_eq!(OutputMode::Log.to_string(), "log");
    }

    #[test]
    fn test_env_serializes_as_pairs() {
        let json = serde_json::to_string(&sample_node()).unwrap();
        assert!(json.contains("[\"POLYFLOW_NODE_ID\",\"abc\"]"));
        assert!(json.contains("\"output\":\"screen\""));
    }

    #[test]
    fn test_description_json_reads_back() {
        let mut description = LaunchDescription::new();
        description.node.push(sample_node());

        let json = description.to_json().unwrap();
        let back: LaunchDescription = serde_json::from_str(&json).unwrap();
        assert_eq!(back, description);
    }
}
