use clap::{Args, Parser, Subcommand};
use eligibility::config::AppConfig;
use eligibility::error::AppError;
use eligibility::telemetry;
use eligibility::screen;
use eligibility_api::{build_router, new_app_state};
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Eligibility Screening Engine",
    about = "Run or query the NYC benefits eligibility screening engine from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Screen a single household against the rule catalog
    Screen(ScreenArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct ScreenArgs {
    /// Path to a JSON request body. Reads stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Screen(args) => run_screen(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (app_state, prometheus_layer) = new_app_state();
    let readiness_flag = app_state.readiness.clone();
    let app = build_router(app_state, prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "eligibility screening engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_screen(args: ScreenArgs) -> Result<(), AppError> {
    let raw = match args.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let body: Value = serde_json::from_str(&raw)
        .map_err(|err| AppError::MalformedRequest(format!("invalid JSON in request body: {err}")))?;

    match screen(&body) {
        Ok(outcome) => {
            println!("{}", serde_json::to_string_pretty(&outcome).expect("outcome serializes"));
            Ok(())
        }
        Err(failure) => {
            println!("{}", serde_json::to_string_pretty(&failure).expect("failure serializes"));
            Err(AppError::Validation(failure.errors))
        }
    }
}
