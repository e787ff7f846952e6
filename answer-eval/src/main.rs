//! Answer-quality evaluation CLI

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use answer_eval::{
    config::{AnswererKind, Config},
    providers::create_answerer,
    reporting::{
        print_console_report, print_latency_report, JsonSummary, LatencyError, LatencyReporter,
        ReportWriter,
    },
    runner::{ConsoleProgress, EvaluationRunner},
    tasks::{load_battery_from_file, standard_battery, Expectation, TestCase},
};

#[derive(Parser)]
#[command(name = "answer-eval")]
#[command(about = "Answer-quality evaluation harness for document-grounded question answering")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a battery against the system under test
    Run {
        /// Battery file, JSON or TOML (default: built-in battery)
        #[arg(short, long)]
        battery: Option<PathBuf>,

        /// Answerer to evaluate: http or scripted
        #[arg(short, long)]
        answerer: Option<AnswererKind>,

        /// Endpoint URL for the http answerer
        #[arg(long)]
        endpoint: Option<String>,

        /// Question-to-answer JSON file for the scripted answerer
        #[arg(long)]
        responses: Option<PathBuf>,

        /// CSV report path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the JSON summary
        #[arg(long)]
        no_summary: bool,
    },

    /// Latency statistics from a saved report
    Latency {
        /// CSV report path
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// List the cases of a battery
    ListCases {
        /// Battery file, JSON or TOML (default: built-in battery)
        #[arg(short, long)]
        battery: Option<PathBuf>,
    },

    /// Generate sample configuration
    InitConfig {
        /// Output path for configuration file
        #[arg(short, long, default_value = "config/eval.toml")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("answer_eval=debug,info")
    } else {
        EnvFilter::new("answer_eval=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    if let Err(e) = execute(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn execute(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            battery,
            answerer,
            endpoint,
            responses,
            output,
            no_summary,
        } => {
            let mut config = config;
            if let Some(kind) = answerer {
                config.answerer.kind = kind;
            }
            if let Some(endpoint) = endpoint {
                config.answerer.endpoint = Some(endpoint);
            }
            if let Some(responses) = responses {
                config.answerer.responses_file = Some(responses.to_string_lossy().to_string());
            }
            if let Some(battery) = battery {
                config.evaluation.battery_file = Some(battery.to_string_lossy().to_string());
            }
            if let Some(output) = output {
                config.output.report_file = output.to_string_lossy().to_string();
            }
            if no_summary {
                config.output.generate_json = false;
            }

            run_evaluation(config).await?;
        }

        Commands::Latency { input } => {
            let input = input.unwrap_or_else(|| PathBuf::from(&config.output.report_file));
            report_latency(&input)?;
        }

        Commands::ListCases { battery } => {
            let battery = battery.or_else(|| config.evaluation.battery_file.as_ref().map(PathBuf::from));
            list_cases(battery.as_deref())?;
        }

        Commands::InitConfig { output } => {
            init_config(output)?;
        }
    }

    Ok(())
}

async fn run_evaluation(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let started_at = Utc::now();
    let run_id = started_at.format("%Y%m%d-%H%M%S").to_string();

    let battery_path = config.evaluation.battery_file.as_ref().map(PathBuf::from);
    let cases = load_cases(battery_path.as_deref())?;

    if cases.is_empty() {
        eprintln!("Error: No test cases to run");
        std::process::exit(1);
    }

    println!(
        "--- Starting Extended Chatbot Evaluation ({} Questions) ---",
        cases.len()
    );

    let scorer = config.scorer()?;

    let answerer = match create_answerer(&config.answerer) {
        Ok(answerer) => answerer,
        Err(e) => {
            println!("Failed to initialize: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Run {} against {} answerer", run_id, answerer.name());

    let runner = EvaluationRunner::new(answerer, scorer);
    let run = runner.run(&cases, &ConsoleProgress).await;

    print_console_report(&run.summary());

    let report_path = PathBuf::from(&config.output.report_file);
    ensure_parent(&report_path)?;
    ReportWriter::write_records(&report_path, &run.records)?;
    println!("\nResults saved to {}", report_path.display());

    if config.output.generate_json {
        let summary_path = config.summary_path(&report_path);
        ensure_parent(&summary_path)?;
        JsonSummary::from_run(
            &run_id,
            runner.answerer_name(),
            &run,
            report_path.to_string_lossy(),
        )
        .write_to_file(&summary_path)?;
        println!("Summary saved to {}", summary_path.display());
    }

    Ok(())
}

fn report_latency(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match LatencyReporter::report(input) {
        Ok(stats) => print_latency_report(&stats),
        Err(e @ (LatencyError::NotFound(_) | LatencyError::NoData(_))) => println!("{}", e),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn list_cases(battery: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let cases = load_cases(battery)?;

    println!("Test Cases ({}):", cases.len());
    println!("{:-<60}", "");

    for case in &cases {
        let mode = match &case.expectation {
            Expectation::Answer(rule) => rule.mode_name(),
            Expectation::Abstain => "-",
        };
        println!(
            "  {:>3} | {:<8} | {:<7} | {:<9} | {}",
            case.id,
            case.category.as_str(),
            case.behavior().as_str(),
            mode,
            case.question
        );
    }

    Ok(())
}

fn init_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();

    // Ensure parent directory exists
    ensure_parent(&output)?;

    config.save_toml(&output)?;
    println!("Configuration written to: {}", output.display());
    Ok(())
}

fn load_cases(battery: Option<&Path>) -> Result<Vec<TestCase>, Box<dyn std::error::Error>> {
    match battery {
        Some(path) => Ok(load_battery_from_file(path)?),
        None => Ok(standard_battery()),
    }
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
