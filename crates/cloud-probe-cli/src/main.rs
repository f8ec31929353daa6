use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use cloud_probe::{LogReporter, check_cloud_server};
use cloud_probe_cli::context::{Context, Overrides};
use cloud_probe_cli::{report, telemetry};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "cloud-probe",
    about = "Check that the cloud storage server is reachable and genuine"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Cloud server base URL [env: CLOUD_BASE_URL]
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Seconds to wait for the server [env: CLOUD_TIMEOUT, default: 5]
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Stable per-installation client id [env: CLOUD_CLIENT_ID]
    #[arg(long, global = true)]
    client_id: Option<String>,

    /// More diagnostics; repeat for more.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe the cloud server (the default).
    Check {
        /// Print the outcome as JSON on stdout.
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as JSON.
    Config,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let ctx = Context::resolve(&Overrides {
        base_url: cli.base_url,
        timeout: cli.timeout,
        client_id: cli.client_id,
        verbose: cli.verbose,
    })?;

    telemetry::init(ctx.config.verbose, cli.json_logs);

    let json = match cli.command {
        Some(Commands::Config) => {
            println!("{}", serde_json::to_string_pretty(&ctx.config)?);
            return Ok(ExitCode::SUCCESS);
        }
        Some(Commands::Check { json }) => json,
        None => false,
    };

    debug!(
        client_id = ctx.identity.client_id(),
        user_agent = ctx.identity.user_agent(),
        "identity"
    );

    let outcome = check_cloud_server(&ctx.config, ctx.identity, Arc::new(LogReporter)).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", report::summary(&outcome));
    }

    Ok(if outcome.is_reachable() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
