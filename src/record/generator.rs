//! Command-line and record generation

use crate::config::NodeLaunchConfig;
use crate::environment::encode_environment;
use crate::error::Result;
use crate::record::types::NodeRecord;
use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

const FALLBACK_PREFIX: &str = "/opt/ros/humble";

pub struct CommandGenerator;

impl CommandGenerator {
    pub fn generate_node_record(config: &NodeLaunchConfig) -> Result<NodeRecord> {
        let env = encode_environment(config)?;
        let cmd = Self::generate_node_command(config);

        Ok(NodeRecord {
            package: config.package.clone(),
            executable: config.executable.clone(),
            name: config.node_name().to_string(),
            output: config.output,
            env,
            cmd,
        })
    }

    pub fn generate_node_command(config: &NodeLaunchConfig) -> Vec<String> {
        let exec_path = Self::resolve_executable_path(&config.package, &config.executable);

        vec![
            exec_path.display().to_string(),
            "--ros-args".to_string(),
            "-r".to_string(),
            format!("__node:={}", config.node_name()),
        ]
    }

    /// Locate `lib/<package>/<executable>` under the prefixes in
    /// `AMENT_PREFIX_PATH`.
    pub fn resolve_executable_path(package: &str, executable: &str) -> PathBuf {
        let prefix_path = env::var_os("AMENT_PREFIX_PATH");
        resolve_in_prefixes(prefix_path.as_deref(), package, executable)
    }
}

pub(crate) fn resolve_in_prefixes(
    prefix_path: Option<&OsStr>,
    package: &str,
    executable: &str,
) -> PathBuf {
    let relative = Path::new("lib").join(package).join(executable);

    if let Some(prefix_path) = prefix_path {
        for prefix in env::split_paths(prefix_path) {
            let candidate = prefix.join(&relative);
            if candidate.is_file() {
                log::debug!("Resolved {} to {}", executable, candidate.display());
                return candidate;
            }
        }
    }

    let fallback = Path::new(FALLBACK_PREFIX).join(&relative);
    log::debug!(
        "{}/{} not found in AMENT_PREFIX_PATH, using {}",
        package,
        executable,
        fallback.display()
    );
    fallback
}
