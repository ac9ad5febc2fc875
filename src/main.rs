use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

use attendance_engine::analysis::{AnalysisJob, ColumnMapping, spawn_analysis};
use attendance_engine::api::{AnalyzeRequest, AnalyzeResponse, AppState, create_router};
use attendance_engine::config::ConfigLoader;
use attendance_engine::report::assemble;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "attendance-engine")]
#[command(about = "Classifies clock-in/clock-out records against a shift calendar")]
struct Cli {
    /// Directory holding calendar.yaml and policy.yaml
    #[arg(long, env = "ATTENDANCE_CONFIG", default_value = "./config", global = true)]
    config: PathBuf,

    /// Address the HTTP server listens on
    #[arg(long, env = "ATTENDANCE_BIND", default_value = "127.0.0.1:3000", global = true)]
    bind: SocketAddr,

    #[arg(long, short, help = "Enable verbose output", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve POST /analyze over HTTP (the default)
    Serve,
    /// Analyze one request file and print the JSON report
    Analyze {
        /// A JSON file shaped like the /analyze request body
        input: PathBuf,
    },
}

fn init_logger(verbose: bool) {
    let default = if verbose {
        "attendance_engine=debug,info"
    } else {
        "attendance_engine=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = ConfigLoader::load(&cli.config)?;

    match cli.command {
        Some(Command::Analyze { input }) => analyze_file(config, input).await,
        Some(Command::Serve) | None => serve(config, cli.bind).await,
    }
}

async fn serve(config: ConfigLoader, bind: SocketAddr) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(address = %bind, "Attendance engine listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn analyze_file(
    config: ConfigLoader,
    input: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let request: AnalyzeRequest = serde_json::from_str(&fs::read_to_string(&input)?)?;
    let (dataset, mapping, rules) = request.into_parts();

    let mapping = match mapping {
        Some(mapping) => mapping,
        None => ColumnMapping::detect(&dataset.columns)
            .into_mapping()
            .map_err(|missing| {
                let roles: Vec<String> = missing.iter().map(ToString::to_string).collect();
                format!("could not detect columns for: {}", roles.join(", "))
            })?,
    };
    let rules = match rules {
        Some(rules) => rules.resolve()?,
        None => config.rules().clone(),
    };

    let mut handle = spawn_analysis(AnalysisJob {
        dataset,
        mapping,
        calendar: rules.calendar,
        early_leave: rules.early_leave,
        warnings: rules.warnings,
    });

    let mut last = 0;
    let outcome = loop {
        tokio::select! {
            Some(line) = handle.logs.recv() => eprintln!("{}", line),
            Some(percent) = handle.progress.recv() => {
                if percent >= last + 10 || percent == 100 {
                    eprintln!("{}%", percent);
                    last = percent;
                }
            }
            outcome = &mut handle.completion => break outcome,
        }
    };
    let outcome = outcome.map_err(|_| "analysis worker exited without reporting")?;
    for line in handle.drain_logs() {
        eprintln!("{}", line);
    }

    match outcome {
        Ok(result) => {
            let report = assemble(&result, &rules.thresholds);
            let response = AnalyzeResponse::new(result, report);
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(failure) => {
            for line in &failure.trace {
                tracing::debug!(trace = %line, "Failure detail");
            }
            Err(failure.into())
        }
    }
}
