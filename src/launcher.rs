//! Process spawning for launch descriptors

use crate::{
    error::{LaunchError, Result},
    record::{NodeRecord, OutputMode},
};
use std::{
    env,
    ffi::OsString,
    fs::{self, File},
    path::{Component, Path, PathBuf},
    process::{Child, Command, Stdio},
};

/// Spawns node records as OS processes
#[derive(Debug, Clone)]
pub struct Launcher {
    log_dir: PathBuf,
}

impl Launcher {
    pub fn new(log_dir: PathBuf) -> Self {
        Self { log_dir }
    }

    /// Launcher writing `log` output under the ROS log directory
    pub fn from_env() -> Self {
        Self::new(default_log_dir())
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Build the command for a record without running it
    pub fn command(&self, record: &NodeRecord) -> Result<Command> {
        let (program, args) = match record.cmd.split_first() {
            Some((program, args)) => (program.as_str(), args),
            None => (record.executable.as_str(), &[][..]),
        };

        let mut command = Command::new(program);
        command.args(args);
        command.envs(record.env.iter().cloned());

        match record.output {
            OutputMode::Screen | OutputMode::Both => {
                command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
            }
            OutputMode::Log => {
                let log_path = self.log_path(&record.name)?;
                fs::create_dir_all(&self.log_dir)?;
                let stdout = File::create(&log_path)?;
                let stderr = stdout.try_clone()?;
                log::info!("Writing output of {} to {}", record.name, log_path.display());
                command.stdout(stdout).stderr(stderr);
            }
        }

        Ok(command)
    }

    /// `<log_dir>/<name>.log`; the name must not escape the log directory
    fn log_path(&self, name: &str) -> Result<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => return Err(LaunchError::InvalidNodeName(name.to_string())),
        }
        Ok(self.log_dir.join(format!("{}.log", name)))
    }

    /// Spawn the record's process; supervising it is up to the caller
    pub fn spawn(&self, record: &NodeRecord) -> Result<Child> {
        let mut command = self.command(record)?;
        let child = command.spawn().map_err(|source| LaunchError::Spawn {
            executable: record.executable.clone(),
            source,
        })?;

        log::info!("Started {} (pid {})", record.name, child.id());
        Ok(child)
    }
}

fn default_log_dir() -> PathBuf {
    log_dir_from(
        env::var_os("ROS_LOG_DIR"),
        env::var_os("ROS_HOME"),
        env::var_os("HOME"),
    )
}

/// `ROS_LOG_DIR`, else `$ROS_HOME/log`, else `~/.ros/log`
pub(crate) fn log_dir_from(
    ros_log_dir: Option<OsString>,
    ros_home: Option<OsString>,
    home: Option<OsString>,
) -> PathBuf {
    if let Some(dir) = ros_log_dir {
        return PathBuf::from(dir);
    }
    if let Some(ros_home) = ros_home {
        return PathBuf::from(ros_home).join("log");
    }
    home.map(PathBuf::from)
        .unwrap_or_default()
        .join(".ros")
        .join("log")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    fn record(cmd: Vec<&str>, output: OutputMode) -> NodeRecord {
        NodeRecord {
            package: "demo".to_string(),
            executable: "sh".to_string(),
            name: "demo_node".to_string(),
            output,
            env: vec![("POLYFLOW_NODE_ID".to_string(), "n42".to_string())],
            cmd: cmd.into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn test_command_applies_env_overlay() {
        let launcher = Launcher::new(PathBuf::from("/tmp"));
        let command = launcher
            .command(&record(vec!["/bin/true", "--ros-args"], OutputMode::Screen))
            .unwrap();

        assert_eq!(command.get_program(), "/bin/true");
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args, ["--ros-args"]);
        let envs: Vec<_> = command.get_envs().collect();
        assert!(envs
            .iter()
            .any(|(k, v)| *k == "POLYFLOW_NODE_ID" && *v == Some(OsStr::new("n42"))));
    }

    #[test]
    fn test_empty_cmd_uses_executable() {
        let launcher = Launcher::new(PathBuf::from("/tmp"));
        let command = launcher.command(&record(vec![], OutputMode::Screen)).unwrap();
        assert_eq!(command.get_program(), "sh");
        assert_eq!(command.get_args().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_log_output_goes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let launcher = Launcher::new(dir.path().join("log"));
        let node = record(
            vec!["sh", "-c", "echo \"id=$POLYFLOW_NODE_ID\""],
            OutputMode::Log,
        );

        let status = launcher.spawn(&node).unwrap().wait().unwrap();
        assert!(status.success());

        let content = fs::read_to_string(dir.path().join("log/demo_node.log")).unwrap();
        assert_eq!(content.trim(), "id=n42");
    }

    #[test]
    fn test_log_dir_order() {
        let some = |s: &str| Some(OsString::from(s));

        assert_eq!(
            log_dir_from(some("/var/log/ros"), some("/srv/ros"), some("/home/robot")),
            PathBuf::from("/var/log/ros")
        );
        assert_eq!(
            log_dir_from(None, some("/srv/ros"), some("/home/robot")),
            PathBuf::from("/srv/ros/log")
        );
        assert_eq!(
            log_dir_from(None, None, some("/home/robot")),
            PathBuf::from("/home/robot/.ros/log")
        );
        assert_eq!(log_dir_from(None, None, None), PathBuf::from(".ros/log"));
    }

    #[test]
    fn test_from_env_follows_log_dir_order() {
        let expected = log_dir_from(
            env::var_os("ROS_LOG_DIR"),
            env::var_os("ROS_HOME"),
            env::var_os("HOME"),
        );
        assert_eq!(Launcher::from_env().log_dir(), expected);
    }

    #[test]
    fn test_log_output_rejects_escaping_names() {
        let dir = tempfile::tempdir().unwrap();
        let launcher = Launcher::new(dir.path().join("log"));

        for name in ["../escape", "nested/node", "/abs", "..", ""] {
            let mut node = record(vec!["/bin/true"], OutputMode::Log);
            node.name = name.to_string();
            let err = launcher.command(&node).unwrap_err();
            assert!(
                matches!(err, LaunchError::InvalidNodeName(ref n) if n == name),
                "{}: {}",
                name,
                err
            );
        }
        assert!(!dir.path().join("escape.log").exists());
        assert!(!dir.path().join("log").exists());
    }

    #[test]
    fn test_screen_output_ignores_name_shape() {
        let launcher = Launcher::new(PathBuf::from("/tmp"));
        let mut node = record(vec!["/bin/true"], OutputMode::Screen);
        node.name = "ns/node".to_string();
        assert!(launcher.command(&node).is_ok());
    }

    #[test]
    fn test_spawn_missing_executable() {
        let launcher = Launcher::new(PathBuf::from("/tmp"));
        let node = record(
            vec!["/nonexistent/polyflow/odrive_s1_node"],
            OutputMode::Screen,
        );

        let err = launcher.spawn(&node).unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
    }
}
