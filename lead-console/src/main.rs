use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

use lead_console::api::{ApiClient, LeadApi};
use lead_console::cli::Command;
use lead_console::config::ConsoleConfig;
use lead_console::helpers::confirm::{AssumeYes, Confirm, PromptConfirm};
use lead_console::helpers::notify::ConsoleNotifier;
use lead_console::pages::dashboard::Dashboard;
use lead_console::pages::{ConsoleContext, Outcome};

#[derive(Parser, Debug)]
#[command(name = "leadctl", author, version, about = "Lead CRM console", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Backend API root, e.g. http://localhost:5001/api
    #[arg(long, env = "LEADCTL_API_URL", global = true)]
    api_url: Option<String>,

    /// Config file (defaults to the user config directory)
    #[arg(long, env = "LEADCTL_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    log_file_path: Option<String>,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    yes: bool,
}

fn init_tracing(log_file_path: Option<&str>) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = log_file_path {
        let log_path = std::path::Path::new(log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("leadctl.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

async fn run(args: Args) -> anyhow::Result<Outcome> {
    let config = match &args.config {
        Some(path) => ConsoleConfig::load_from(path)?,
        None => ConsoleConfig::load()?.0,
    };
    let base_url = args
        .api_url
        .clone()
        .unwrap_or_else(|| config.server.base_url.clone());
    tracing::debug!("Using backend {}", base_url);

    let api: Arc<dyn LeadApi> = Arc::new(ApiClient::new(&base_url)?);
    let notifier = Arc::new(ConsoleNotifier::new(std::io::stderr().is_terminal()));
    let confirm: Arc<dyn Confirm> = if args.yes {
        Arc::new(AssumeYes)
    } else {
        Arc::new(PromptConfirm)
    };

    let ctx = ConsoleContext::new(api, notifier, confirm);
    let mut dashboard = Dashboard::new(ctx.clone(), &config);
    args.command.execute(&ctx, &mut dashboard).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log_file_path.as_deref());

    match run(args).await {
        Ok(Outcome::Done(()) | Outcome::Cancelled) => ExitCode::SUCCESS,
        Ok(Outcome::Rejected(_) | Outcome::Failed(_)) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
