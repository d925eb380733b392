mod demo;
mod logging;

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use kanban_core::app::{ApiCall, invoke};
use kanban_core::{BoardConfig, MockTaskApi};
use tracing::warn;

use crate::logging::LogLevel;

/// Kanban board runtime: demo walk-through and host-call runner against the mock store.
#[derive(Parser)]
#[command(name = "kanban-cli", version, about = "Kanban board mock runtime")]
struct Cli {
    /// Board configuration (JSON). Built-in defaults when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Bind the mock through the runtime and walk through the board operations.
    Demo,
    /// Execute JSON-lines host calls against a fresh mock and print each result.
    Run {
        /// File with one `{"method": ..., "args": [...]}` object per line.
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init(cli.log_level);

    let config = match &cli.config {
        Some(path) => BoardConfig::load(path)?,
        None => BoardConfig::default(),
    };

    match cli.command {
        Command::Demo => demo::run(config).await?,
        Command::Run { file } => run_calls(&config, &file).await?,
    }
    Ok(())
}

/// 1 行 1 呼び出し。失敗した行はエラーを出して続行する
async fn run_calls(config: &BoardConfig, file: &Path) -> Result<(), Box<dyn Error>> {
    let api = MockTaskApi::from_config(config);
    let script = std::fs::read_to_string(file)?;

    for (line_no, line) in script.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let outcome = match line.parse::<ApiCall>() {
            Ok(call) => invoke(&api, call).await,
            Err(err) => Err(err),
        };
        match outcome {
            Ok(result) => println!("{result}"),
            Err(err) => {
                warn!(line = line_no + 1, error = %err, "call failed");
                eprintln!("line {}: {err}", line_no + 1);
            }
        }
    }
    Ok(())
}
