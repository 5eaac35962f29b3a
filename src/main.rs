//! polyflow_launch CLI

use clap::{Parser, Subcommand};
use polyflow_launch::{
    generate_launch_description, launcher::Launcher, load_launch_description,
    record::LaunchDescription,
};
use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    process,
};

#[derive(Parser)]
#[command(name = "polyflow_launch")]
#[command(about = "Launch Polyflow hardware nodes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the launch description as JSON
    Dump {
        /// Node launch config (YAML or JSON); defaults to the built-in ODrive S1 node
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file path (default: record.json)
        #[arg(short, long, default_value = "record.json")]
        output: PathBuf,
    },

    /// Print the node environment as KEY=value lines
    Env {
        /// Node launch config (YAML or JSON); defaults to the built-in ODrive S1 node
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Spawn the node and wait for it to exit
    Run {
        /// Node launch config (YAML or JSON); defaults to the built-in ODrive S1 node
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the command instead of running it
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Dump { config, output } => dump(config.as_deref(), &output),
        Commands::Env { config } => print_env(config.as_deref()),
        Commands::Run { config, dry_run } => run(config.as_deref(), dry_run),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

type CliResult = Result<i32, Box<dyn std::error::Error>>;

fn describe(config: Option<&Path>) -> polyflow_launch::error::Result<LaunchDescription> {
    match config {
        Some(path) => {
            log::info!("Loading node config: {}", path.display());
            load_launch_description(path)
        }
        None => generate_launch_description(),
    }
}

fn dump(config: Option<&Path>, output: &Path) -> CliResult {
    let description = describe(config)?;

    let json = description.to_json()?;
    std::fs::write(output, json)?;

    log::info!("Generated launch description: {}", output.display());
    Ok(0)
}

fn print_env(config: Option<&Path>) -> CliResult {
    let description = describe(config)?;
    write_env(&description, &mut io::stdout().lock())?;
    Ok(0)
}

fn write_env(description: &LaunchDescription, out: &mut impl Write) -> io::Result<()> {
    for node in &description.node {
        for (key, value) in &node.env {
            writeln!(out, "{}={}", key, shell_quote(value))?;
        }
    }
    Ok(())
}

fn write_dry_run(description: &LaunchDescription, out: &mut impl Write) -> io::Result<()> {
    for node in &description.node {
        for (key, value) in &node.env {
            writeln!(out, "{}={} \\", key, shell_quote(value))?;
        }
        let cmd: Vec<String> = node.cmd.iter().map(|arg| shell_quote(arg)).collect();
        writeln!(out, "{}", cmd.join(" "))?;
    }
    Ok(())
}

fn run(config: Option<&Path>, dry_run: bool) -> CliResult {
    let description = describe(config)?;

    if dry_run {
        write_dry_run(&description, &mut io::stdout().lock())?;
        return Ok(0);
    }

    let launcher = Launcher::from_env();
    let mut children = Vec::with_capacity(description.node.len());
    for node in &description.node {
        children.push((node.name.clone(), launcher.spawn(node)?));
    }

    let mut exit_code = 0;
    for (name, mut child) in children {
        let status = child.wait()?;
        log::info!("{} exited with {}", name, status);
        if !status.success() && exit_code == 0 {
            exit_code = status.code().unwrap_or(1);
        }
    }
    Ok(exit_code)
}

/// Single-quote a value for POSIX shells
fn shell_quote(value: &str) -> String {
    let plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./:=@%+,".contains(c));
    if plain {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}
