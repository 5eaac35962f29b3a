//! `POLYFLOW_*` environment encoding shared by the launcher and the node

use crate::{
    config::{Connection, NodeConfiguration, NodeLaunchConfig, NodeParameters},
    error::{LaunchError, Result},
};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

pub const NODE_ID: &str = "POLYFLOW_NODE_ID";
pub const PARAMETERS: &str = "POLYFLOW_PARAMETERS";
pub const CONFIGURATION: &str = "POLYFLOW_CONFIGURATION";
pub const INBOUND_CONNECTIONS: &str = "POLYFLOW_INBOUND_CONNECTIONS";
pub const OUTBOUND_CONNECTIONS: &str = "POLYFLOW_OUTBOUND_CONNECTIONS";

/// Every key the launcher sets, in the order it sets them
pub const KEYS: [&str; 5] = [
    NODE_ID,
    PARAMETERS,
    CONFIGURATION,
    INBOUND_CONNECTIONS,
    OUTBOUND_CONNECTIONS,
];

/// Encode a node launch config into its environment overlay.
///
/// The node id is passed through as-is; the other four values are JSON text.
pub fn encode_environment(config: &NodeLaunchConfig) -> Result<Vec<(String, String)>> {
    let env = vec![
        (NODE_ID.to_string(), config.node_id.clone()),
        (PARAMETERS.to_string(), to_json(PARAMETERS, &config.parameters)?),
        (
            CONFIGURATION.to_string(),
            to_json(CONFIGURATION, &config.configuration)?,
        ),
        (
            INBOUND_CONNECTIONS.to_string(),
            to_json(INBOUND_CONNECTIONS, &config.inbound_connections)?,
        ),
        (
            OUTBOUND_CONNECTIONS.to_string(),
            to_json(OUTBOUND_CONNECTIONS, &config.outbound_connections)?,
        ),
    ];

    for (key, value) in &env {
        log::debug!("{}={}", key, value);
    }
    Ok(env)
}

fn to_json<T: serde::Serialize>(key: &str, value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| LaunchError::json(key, e))
}

/// The node-side view of the environment overlay
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEnvironment {
    pub node_id: String,
    pub parameters: NodeParameters,
    pub configuration: NodeConfiguration,
    pub inbound_connections: Vec<Connection>,
    pub outbound_connections: Vec<Connection>,
}

impl DecodedEnvironment {
    /// Decode from the environment of the current process.
    ///
    /// Only the `POLYFLOW_*` keys must be UTF-8; other variables are skipped
    /// untouched.
    pub fn from_process_env() -> Result<Self> {
        let mut vars = Vec::with_capacity(KEYS.len());
        for (key, value) in std::env::vars_os() {
            let Some(key) = key.to_str().filter(|k| KEYS.contains(k)) else {
                continue;
            };
            let value = value
                .into_string()
                .map_err(|_| LaunchError::NonUtf8Environment(key.to_string()))?;
            vars.push((key.to_string(), value));
        }
        decode_environment(vars)
    }
}

/// Decode the five `POLYFLOW_*` variables. Unrelated variables are ignored.
pub fn decode_environment<I, K, V>(vars: I) -> Result<DecodedEnvironment>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let vars: HashMap<String, String> = vars
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .filter(|(k, _)| KEYS.contains(&k.as_str()))
        .collect();

    let lookup = |key: &str| {
        vars.get(key)
            .ok_or_else(|| LaunchError::MissingEnvironment(key.to_string()))
    };

    Ok(DecodedEnvironment {
        node_id: lookup(NODE_ID)?.clone(),
        parameters: from_json(PARAMETERS, lookup(PARAMETERS)?)?,
        configuration: from_json(CONFIGURATION, lookup(CONFIGURATION)?)?,
        inbound_connections: from_json(INBOUND_CONNECTIONS, lookup(INBOUND_CONNECTIONS)?)?,
        outbound_connections: from_json(OUTBOUND_CONNECTIONS, lookup(OUTBOUND_CONNECTIONS)?)?,
    })
}

fn from_json<T: DeserializeOwned>(key: &str, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| LaunchError::json(key, e))
}
