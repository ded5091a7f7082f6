//! Command line front-end: runs the HTTP service or a one-off calculation.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use nomina_engine::api::{AppState, create_router};
use nomina_engine::calculation::PayrollCalculator;
use nomina_engine::config::{ConfigLoader, ConfigurationResolver, InMemoryParameterStore};
use nomina_engine::error::EngineError;
use nomina_engine::models::PayrollInput;

#[derive(Parser, Debug)]
#[command(
    name = "nomina-engine",
    about = "Compute payroll settlements and serve the payroll API",
    version
)]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Compute one payroll and print it as JSON
    Calculate(CalculateArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Directory holding parameters.yaml; built-in defaults when absent
    #[arg(long)]
    config: Option<PathBuf>,
    /// Host for the HTTP server
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    /// Port for the HTTP server
    #[arg(long, default_value_t = 3000)]
    port: u16,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            config: None,
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Args, Debug)]
struct CalculateArgs {
    /// Monthly base salary
    #[arg(long, allow_negative_numbers = true)]
    base_salary: Decimal,
    /// Daytime overtime hours
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    day_hours: i32,
    /// Night overtime hours
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    night_hours: i32,
    /// Extra bonus
    #[arg(long, default_value_t = Decimal::ZERO, allow_negative_numbers = true)]
    bonus: Decimal,
    /// Extra deduction
    #[arg(long, default_value_t = Decimal::ZERO, allow_negative_numbers = true)]
    deduction: Decimal,
    /// Include the audit trace in the output
    #[arg(long)]
    audit: bool,
    /// Round the computed amounts to cents
    #[arg(long)]
    round: bool,
    /// Directory holding parameters.yaml; built-in defaults when absent
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("invalid log filter '{value}': {message}")]
    LogFilter { value: String, message: String },
    #[error("invalid listen address {value}: {message}")]
    Address { value: String, message: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

pub(crate) async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => serve(args).await,
        Command::Calculate(args) => calculate(args),
    }
}

fn init_tracing(log_level: &str) -> Result<(), CliError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(log_level).map_err(|err| CliError::LogFilter {
            value: log_level.to_string(),
            message: err.to_string(),
        })?,
    };

    // A subscriber may already be installed; logging then goes there.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .try_init();
    Ok(())
}

fn load_store(config_dir: Option<&PathBuf>) -> Result<InMemoryParameterStore, CliError> {
    match config_dir {
        Some(dir) => {
            let loader = ConfigLoader::load(dir)?;
            info!(
                config_dir = %dir.display(),
                parameters = loader.entries().len(),
                "Loaded payroll parameters"
            );
            Ok(loader.into_store())
        }
        None => {
            info!("No configuration directory given, using built-in defaults");
            Ok(InMemoryParameterStore::new())
        }
    }
}

async fn serve(args: ServeArgs) -> Result<(), CliError> {
    let store = load_store(args.config.as_ref())?;
    let app = create_router(AppState::new(store));

    let addr_text = format!("{}:{}", args.host, args.port);
    let addr: SocketAddr = addr_text.parse().map_err(|err: std::net::AddrParseError| {
        CliError::Address {
            value: addr_text.clone(),
            message: err.to_string(),
        }
    })?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, "Payroll engine listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn calculate(args: CalculateArgs) -> Result<(), CliError> {
    let store = load_store(args.config.as_ref())?;
    let config = ConfigurationResolver::new(std::sync::Arc::new(store)).resolve();

    let input = PayrollInput::new(args.base_salary, args.day_hours, args.night_hours)
        .with_bonus(args.bonus)
        .with_deduction(args.deduction);

    let output = render(&PayrollCalculator::new(config), &input, args.audit, args.round)?;
    println!("{output}");
    Ok(())
}

fn render(
    calculator: &PayrollCalculator,
    input: &PayrollInput,
    audit: bool,
    round: bool,
) -> Result<String, CliError> {
    if audit {
        let mut calculation = calculator
            .compute_with_audit(input)
            .map_err(EngineError::from)?;
        if round {
            calculation.result = calculation.result.rounded();
        }
        Ok(serde_json::to_string_pretty(&calculation)?)
    } else {
        let mut result = calculator.compute(input).map_err(EngineError::from)?;
        if round {
            result = result.rounded();
        }
        Ok(serde_json::to_string_pretty(&result)?)
    }
}
