mod config;
mod error;

use std::future::Future;
use std::path::{Path, PathBuf};

use clap::Parser;
use clap::error::ErrorKind;
use runtime::{Shell, run_session, tools};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use config::{API_KEY_ENV, Config, ENV_FILE, MODEL_ENV, load_env_file};
use error::Result;

const CONFIG_FILE: &str = "mcp-chat.toml";
const USAGE: &str = "Usage: mcp-chat <server_script_path>";

#[derive(Debug, Parser)]
#[command(name = "mcp-chat")]
#[command(about = "Chat with a model that can call tools from an MCP server", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the MCP server script (.py or .js)
    server_script: PathBuf,

    /// Configuration file (defaults to ./mcp-chat.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e)
            if matches!(
                e.kind(),
                ErrorKind::MissingRequiredArgument | ErrorKind::UnknownArgument
            ) =>
        {
            println!("{USAGE}");
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    init_tracing(cli.verbose);
    load_env_file(ENV_FILE);

    if let Err(e) = start(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn start(cli: Cli) -> Result<()> {
    block_on_detached(run(cli))?
}

/// Drive `future` to completion on a fresh runtime, then drop the runtime
/// without waiting for blocking tasks.
///
/// Tokio reads stdin on a blocking thread that cannot be cancelled; after an
/// interrupt that read is still pending and would otherwise keep the
/// process alive until the next line arrives.
fn block_on_detached<F: Future>(future: F) -> std::io::Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let output = runtime.block_on(future);
    runtime.shutdown_background();
    Ok(output)
}

async fn run(cli: Cli) -> Result<()> {
    let config =
        load_config(cli.config.as_deref())?.with_model_override(std::env::var(MODEL_ENV).ok());
    let api_key = config.api_key(std::env::var(API_KEY_ENV).ok());
    let backend = config.backend(api_key);
    tracing::debug!(%backend, "model backend ready");

    let connection = tools::connect(cli.server_script, &config.interpreters()).await?;
    let names: Vec<&str> = connection.tools.iter().map(|t| t.name.as_str()).collect();
    println!("\nConnected to server with tools: {names:?}");

    let mut shell = Shell::new(BufReader::new(tokio::io::stdin()), std::io::stdout());
    run_session(connection.channel, &backend, &mut shell, interrupted()).await?;
    Ok(())
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Ok(Config::load(path)?),
        None if Path::new(CONFIG_FILE).exists() => Ok(Config::load(CONFIG_FILE)?),
        None => Ok(Config::default()),
    }
}
