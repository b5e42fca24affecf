mod error;

use std::{
    fmt,
    io::{self, IsTerminal as _, Read as _, Write as _},
    path::PathBuf,
    process::ExitCode,
};

use atlas_config::Config;
use atlas_tool::ToolResult;
use clap::{ArgAction, Parser, Subcommand};
use error::Result;
use serde_json::Value;
use tracing::{error, trace};

/// Location tools for language-model agents.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten, next_help_heading = "Global Options")]
    globals: Globals,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Args)]
pub struct Globals {
    /// Path to a TOML configuration file.
    #[arg(short, long, value_name = "FILE", global = true, env = "ATLAS_CONFIG")]
    config: Option<PathBuf>,

    /// Increase verbosity of logging.
    ///
    /// Can be specified multiple times to increase verbosity.
    ///
    /// Defaults to printing "error" messages. For each increase in verbosity,
    /// the log level is set to "warn", "info", "debug", and "trace"
    /// respectively.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the definitions of all tools as JSON.
    Tools,

    /// Execute a single tool call and print its result as JSON.
    Call {
        /// Name of the tool, e.g. `getWeather`.
        tool: String,

        /// JSON arguments. Read from stdin when omitted or `-`.
        input: Option<String>,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::Tools => "tools",
            Self::Call { .. } => "call",
        }
    }
}

impl fmt::Display for Cli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entry(&"config", &self.globals.config)
            .entry(&"verbose", &self.globals.verbose)
            .entry(&"quiet", &self.globals.quiet)
            .finish()
    }
}

/// What a command produced.
enum Output {
    Json(Value),

    /// A tool call result. Failed calls still print their `{"error"}`
    /// object, but exit non-zero.
    Tool(ToolResult),
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    configure_logging(cli.globals.verbose, cli.globals.quiet);
    trace!(command = cli.command.name(), arguments = %cli, "Starting CLI run.");

    let pretty = io::stdout().is_terminal();
    let (code, value) = match run_inner(cli).await {
        Ok(Output::Json(value)) => (ExitCode::SUCCESS, value),
        Ok(Output::Tool(result)) if result.is_error() => (ExitCode::FAILURE, result.into_value()),
        Ok(Output::Tool(result)) => (ExitCode::SUCCESS, result.into_value()),
        Err(error) => {
            error!(%error, "Command failed.");
            let _ = writeln!(io::stderr().lock(), "{error}");
            return ExitCode::from(2);
        }
    };

    if let Err(error) = print_json(&value, pretty) {
        error!(%error, "Failed to write output.");
        return ExitCode::from(2);
    }

    code
}

async fn run_inner(cli: Cli) -> Result<Output> {
    let config = Config::load(cli.globals.config.as_deref())?;
    let tools = atlas_tool::toolbox(&config)?;

    match cli.command {
        Commands::Tools => Ok(Output::Json(serde_json::to_value(tools.defs())?)),
        Commands::Call { tool, input } => {
            let input = parse_input(input.as_deref())?;
            Ok(Output::Tool(tools.execute(&tool, input).await))
        }
    }
}

/// Parse the call arguments from the command line, or from stdin.
fn parse_input(input: Option<&str>) -> Result<Value> {
    let raw = match input {
        Some(raw) if raw != "-" => raw.to_owned(),
        _ => {
            let mut buf = String::new();
            io::stdin().lock().read_to_string(&mut buf)?;
            buf
        }
    };

    if raw.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }

    serde_json::from_str(&raw).map_err(Into::into)
}

fn print_json(value: &Value, pretty: bool) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }

    writeln!(stdout)?;
    stdout.flush()
}

fn configure_logging(verbose: u8, quiet: bool) {
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::fmt;

    let mut level = match verbose {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        3 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    if quiet {
        level = LevelFilter::OFF;
    }

    let mut filter = vec!["off".to_owned()];
    for krate in ["cli", "config", "geo", "tool", "weather"] {
        filter.push(format!("atlas_{krate}={level}"));
    }

    let format = fmt::format().with_target(false).compact();
    let builder = tracing_subscriber::fmt()
        .event_format(format)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .with_env_filter(filter.join(","));

    if level < LevelFilter::DEBUG {
        builder.without_time().init();
    } else {
        builder.init();
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
