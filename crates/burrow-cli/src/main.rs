//! Burrow CLI - Test harness for the Burrow filesystem tools
//!
//! Usage:
//!   burrow -c '<json-lines>'   Execute inline tool calls
//!   burrow script.jsonl        Execute a script file
//!   burrow                     Read the script from stdin
//!
//! Each line is `{"tool": "<name>", "args": {...}}` and produces one
//! `{status, error, response}` line on stdout.

mod script;

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use burrow::FsConfig;
use burrow::tools::{FsToolbox, ToolRegistry, render_index};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Burrow CLI - run tool calls against a fresh in-memory filesystem
#[derive(Parser, Debug)]
#[command(name = "burrow")]
#[command(about = "Run a script of JSON tool calls against an in-memory filesystem")]
struct Args {
    /// Inline script to execute
    #[arg(short = 'c', conflicts_with = "script")]
    command: Option<String>,

    /// Script file to execute (stdin if omitted)
    script: Option<PathBuf>,

    /// JSON config with `initial_dirs` and `cwd`
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the available tools and exit
    #[arg(long)]
    list_tools: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => FsConfig::load(path)?,
        None => FsConfig::default(),
    };
    let mut toolbox = FsToolbox::with_config(&config).context("failed to initialize filesystem")?;

    if args.list_tools {
        print!("{}", render_index(&toolbox.registry().list_tools()));
        return Ok(ExitCode::SUCCESS);
    }

    let source = if let Some(command) = args.command {
        command
    } else if let Some(path) = &args.script {
        std::fs::read_to_string(path).with_context(|| format!("{}", path.display()))?
    } else {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        source
    };

    let responses = script::run(&mut toolbox, &source);

    let mut stdout = io::stdout().lock();
    for response in &responses {
        writeln!(stdout, "{}", response.to_json())?;
    }
    stdout.flush()?;

    // Non-zero exit if any call failed.
    if responses.iter().all(|r| r.is_ok()) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
