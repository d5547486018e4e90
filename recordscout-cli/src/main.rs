use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use recordscout::{
    config::ConfigOverrides, parse_id, EngineConfig, ExecutionMode, ProcessReport, Record,
    RecordEngine, SearchOutput,
};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Number of worker threads for concurrent mode
    #[arg(short = 'j', long, global = true)]
    threads: Option<NonZeroUsize>,

    /// Number of synthetic records to seed
    #[arg(long, global = true)]
    seed_count: Option<usize>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG wins when set
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every record
    List,

    /// Look a record up by identifier
    Get {
        /// Record identifier
        id: String,

        /// Execution strategy (concurrent|sequential)
        #[arg(short, long)]
        mode: Option<ExecutionMode>,
    },

    /// Find records whose name contains a query, ignoring case
    Search {
        /// Text to look for in record names
        query: String,

        /// Execution strategy (concurrent|sequential)
        #[arg(short, long)]
        mode: Option<ExecutionMode>,
    },

    /// Run the heavy processing unit over every record and time it
    Process {
        /// Execution strategy (concurrent|sequential)
        #[arg(short, long)]
        mode: Option<ExecutionMode>,
    },

    /// Time a search and a processing pass in both modes
    Compare {
        /// Query used for the search comparison
        #[arg(short, long, default_value = "garcía")]
        query: String,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = EngineConfig::load_from(cli.config.as_deref())
        .context("failed to load configuration")?
        .merge_with_cli(ConfigOverrides {
            mode: None,
            thread_count: cli.threads,
            seed_count: cli.seed_count,
            log_level: cli.log_level.clone(),
        });

    init_tracing(&config.log_level);

    let engine = RecordEngine::from_config(&config)?;
    let default_mode = engine.default_mode();

    match cli.command {
        Commands::List => {
            let records = engine.list_all();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                print_records(&records);
                println!("\n{} records", records.len());
            }
        }
        Commands::Get { id, mode } => {
            let id = parse_id(&id)?;
            let record = engine.find_by_id(id, mode.unwrap_or(default_mode))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                print_records(std::slice::from_ref(&record));
            }
        }
        Commands::Search { query, mode } => {
            let output = engine.search(&query, mode.unwrap_or(default_mode))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_search_results(&output);
            }
        }
        Commands::Process { mode } => {
            let report = engine.process_all(mode.unwrap_or(default_mode));
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report_json(&report))?);
            } else {
                print_report(&report);
            }
        }
        Commands::Compare { query } => {
            let mut searches = Vec::new();
            let mut reports = Vec::new();
            for mode in [ExecutionMode::Concurrent, ExecutionMode::Sequential] {
                let start = Instant::now();
                let output = engine.search(&query, mode)?;
                searches.push((mode, output.total, start.elapsed()));
                reports.push(engine.process_all(mode));
            }

            if cli.json {
                let value = serde_json::json!({
                    "query": query,
                    "search": searches
                        .iter()
                        .map(|(mode, total, elapsed)| serde_json::json!({
                            "mode": mode.label(),
                            "total": total,
                            "elapsed_ms": elapsed.as_millis(),
                        }))
                        .collect::<Vec<_>>(),
                    "process": reports.iter().map(report_json).collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("Search for '{}':", query);
                for (mode, total, elapsed) in &searches {
                    println!(
                        "  {:<10} {} matches in {}",
                        mode.label().yellow(),
                        total,
                        format_elapsed(*elapsed)
                    );
                }
                println!("Processing:");
                for report in &reports {
                    print!("  ");
                    print_report(report);
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn format_elapsed(elapsed: Duration) -> String {
    humantime::format_duration(Duration::from_millis(elapsed.as_millis() as u64)).to_string()
}

fn report_json(report: &ProcessReport) -> serde_json::Value {
    serde_json::json!({
        "completed": report.completed,
        "elapsed_ms": report.elapsed_ms(),
        "mode": report.mode.label(),
    })
}

fn print_records(records: &[Record]) {
    for record in records {
        println!(
            "{}: {} <{}>",
            record.id.to_string().green(),
            record.name,
            record.email.blue()
        );
    }
}

fn print_search_results(output: &SearchOutput) {
    print_records(&output.records);
    println!("\nFound {} matches", output.total);
}

fn print_report(report: &ProcessReport) {
    println!(
        "Processed {} records in {} ({})",
        report.completed,
        format_elapsed(report.elapsed),
        report.mode.label().yellow()
    );
}
