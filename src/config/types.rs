//! Configuration data structures

use crate::record::OutputMode;
use serde::{Deserialize, Serialize, Serializer};

/// Largest magnitude below which every whole `f64` is an exact integer
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Control mode the motor driver runs its loop in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlMode {
    Position,
    Velocity,
    Effort,
}

/// Control-tuning parameters handed to the node as `POLYFLOW_PARAMETERS`.
///
/// Limit keys keep their dotted wire names (`limit.max_effort`, ...) so the
/// encoded object stays flat. Whole-number limits are written as JSON
/// integers (`360`, not `360.0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeParameters {
    pub joint: String,
    pub control_mode: ControlMode,
    #[serde(rename = "limit.lower_position", serialize_with = "serialize_limit")]
    pub lower_position: f64,
    #[serde(rename = "limit.upper_position", serialize_with = "serialize_limit")]
    pub upper_position: f64,
    /// Emitted as `null` when unset; the driver decides what that means.
    #[serde(
        rename = "limit.position_step",
        serialize_with = "serialize_optional_limit"
    )]
    pub position_step: Option<f64>,
    #[serde(rename = "limit.max_effort", serialize_with = "serialize_limit")]
    pub max_effort: f64,
    #[serde(rename = "limit.effort_step", serialize_with = "serialize_limit")]
    pub effort_step: f64,
    #[serde(rename = "limit.max_velocity", serialize_with = "serialize_limit")]
    pub max_velocity: f64,
    #[serde(rename = "limit.velocity_step", serialize_with = "serialize_limit")]
    pub velocity_step: f64,
}

fn serialize_limit<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < EXACT_INTEGER_LIMIT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

fn serialize_optional_limit<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => serialize_limit(value, serializer),
        None => serializer.serialize_none(),
    }
}

/// Operational settings handed to the node as `POLYFLOW_CONFIGURATION`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeConfiguration {
    pub namespace: String,
    pub rate_hz: u32,
    pub lifecycle: bool,
}

/// A single inter-node connection descriptor.
///
/// The wiring layer owns the shape, so the descriptor is carried as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Connection(pub serde_json::Value);

/// Everything needed to launch one Polyflow node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLaunchConfig {
    pub node_id: String,
    pub package: String,
    pub executable: String,
    /// Defaults to the executable name
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub output: OutputMode,
    pub parameters: NodeParameters,
    pub configuration: NodeConfiguration,
    #[serde(default)]
    pub inbound_connections: Vec<Connection>,
    #[serde(default)]
    pub outbound_connections: Vec<Connection>,
}

impl NodeLaunchConfig {
    pub fn node_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.executable)
    }
}
