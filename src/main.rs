use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lead_scorer::leads::{days_since, decode_records, row_id, Activity, LeadSnapshot};
use lead_scorer::plan::{save_plan, RecalcPlan};
use lead_scorer::scoring::{FactorContribution, ScoringEngine, ScoringError, Temperature};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable, colored on a TTY
    Table,
    Json,
    /// Tab-separated rows (recalculate only; other commands print a table)
    Tsv,
}

#[derive(Subcommand, Debug)]
enum DeltaCommand {
    /// Score change for logging an activity
    Activity {
        /// Activity type, e.g. phone_call or "Meeting attended"
        activity_type: String,
    },
    /// Score change for a status transition
    Status { from: String, to: String },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective scoring tables as YAML
    Show,
    /// Validate the config and exit
    Check,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initial score for one intake or an array of intakes
    Score { file: PathBuf },
    /// Engagement score for an activity list
    Engagement { file: PathBuf },
    /// Score deltas for activities and status changes
    #[command(subcommand)]
    Delta(DeltaCommand),
    /// Temperature band for a score
    Classify { score: u32 },
    /// Quality report for one lead or an array of leads
    Analyze { file: PathBuf },
    /// Decay pass over exported leads
    Recalculate {
        file: PathBuf,
        /// Write the update plan as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Parser, Debug)]
#[command(name = "lead-scorer")]
#[command(about = "Lead scoring and qualification", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/lead-scorer/config.yaml)
    #[arg(short, long, global = true, env = "LEAD_SCORER_CONFIG")]
    config: Option<PathBuf>,

    /// Reference time as RFC 3339 (defaults to now)
    #[arg(long, global = true)]
    now: Option<String>,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    lead_id: Option<&'a str>,
    score: u32,
    temperature: Temperature,
    fallback: bool,
    factors: &'a [FactorContribution],
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "lead_scorer=info"
    } else {
        "lead_scorer=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let now = match resolve_now(cli.now.as_deref()) {
        Ok(now) => now,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    // Config subcommands manage the file itself, so they run before the engine exists
    if let Commands::Config(command) = &cli.command {
        std::process::exit(run_config_command(command, cli.config.clone()));
    }

    let engine = match lead_scorer::config::load_engine(cli.config.clone()) {
        Ok(engine) => engine,
        Err(e) => {
            report_config_error(&e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(e) = run(&cli, &engine, now) {
        eprintln!("Error: {:#}", e);
        std::process::exit(EXIT_INPUT);
    }

    std::process::exit(EXIT_SUCCESS);
}

fn resolve_now(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        Some(s) => Ok(DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("Invalid --now timestamp '{}'", s))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

fn report_config_error(error: &anyhow::Error) {
    match error.downcast_ref::<ScoringError>() {
        Some(ScoringError::Configuration(messages)) => {
            eprintln!("Scoring config errors:");
            for message in messages {
                eprintln!("  - {}", message);
            }
        }
        _ => eprintln!("Config error: {:#}", error),
    }
}

fn run_config_command(command: &ConfigCommand, path: Option<PathBuf>) -> i32 {
    match command {
        ConfigCommand::Init { force } => {
            let target = match path {
                Some(p) => Ok(p),
                None => lead_scorer::config::get_config_path(),
            };
            let target = match target {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Config error: {:#}", e);
                    return EXIT_CONFIG;
                }
            };
            match lead_scorer::config::write_default_config(&target, *force) {
                Ok(()) => {
                    println!("Wrote default config to {}", target.display());
                    EXIT_SUCCESS
                }
                Err(e) => {
                    eprintln!("Config error: {:#}", e);
                    EXIT_CONFIG
                }
            }
        }
        ConfigCommand::Show => match lead_scorer::config::load_engine(path) {
            Ok(engine) => match serde_saphyr::to_string(engine.config()) {
                Ok(yaml) => {
                    print!("{}", yaml);
                    EXIT_SUCCESS
                }
                Err(e) => {
                    eprintln!("Config error: {}", e);
                    EXIT_CONFIG
                }
            },
            Err(e) => {
                report_config_error(&e);
                EXIT_CONFIG
            }
        },
        ConfigCommand::Check => match lead_scorer::config::load_engine(path) {
            Ok(_) => {
                println!("Config OK");
                EXIT_SUCCESS
            }
            Err(e) => {
                report_config_error(&e);
                EXIT_CONFIG
            }
        },
    }
}

fn run(cli: &Cli, engine: &ScoringEngine, now: DateTime<Utc>) -> Result<()> {
    let use_colors = lead_scorer::output::should_use_colors();
    let json = cli.format == OutputFormat::Json;

    match &cli.command {
        Commands::Score { file } => {
            // Rows are scored one at a time; an undecodable row gets the default score
            let rows: Vec<serde_json::Value> = read_json_list(file)?;
            let results: Vec<_> = rows
                .into_iter()
                .map(|row| engine.initial_score_for_row(row))
                .collect();

            if json {
                let rows: Vec<ScoreOutput> = results
                    .iter()
                    .map(|(lead_id, result)| ScoreOutput {
                        lead_id: lead_id.as_deref(),
                        score: result.score,
                        temperature: engine.classify(result.score),
                        fallback: result.fallback,
                        factors: &result.factors,
                    })
                    .collect();
                print_json(&rows)?;
            } else {
                for (lead_id, result) in &results {
                    if let Some(id) = lead_id {
                        println!("Lead {}", id);
                    }
                    println!(
                        "{}",
                        lead_scorer::output::format_initial_score(
                            result,
                            engine.classify(result.score),
                            use_colors
                        )
                    );
                }
            }
        }
        Commands::Engagement { file } => {
            let activities: Vec<Activity> = read_json_list(file)?;
            let score = engine.engagement_score(&activities, now);
            if json {
                print_json(&serde_json::json!({
                    "activities": activities.len(),
                    "engagementScore": score,
                }))?;
            } else {
                println!("Engagement: {} ({} activities)", score, activities.len());
            }
        }
        Commands::Delta(DeltaCommand::Activity { activity_type }) => {
            let delta = engine.activity_delta_for_label(activity_type);
            print_delta(json, delta)?;
        }
        Commands::Delta(DeltaCommand::Status { from, to }) => {
            let delta = engine.status_delta_for_labels(from, to);
            print_delta(json, delta)?;
        }
        Commands::Classify { score } => {
            let temperature = engine.classify(*score);
            if json {
                print_json(&serde_json::json!({
                    "score": score,
                    "temperature": temperature,
                }))?;
            } else {
                println!(
                    "{}",
                    lead_scorer::output::format_temperature(temperature, use_colors)
                );
            }
        }
        Commands::Analyze { file } => {
            let rows: Vec<serde_json::Value> = read_json_list(file)?;
            let leads: Vec<LeadSnapshot> = rows
                .into_iter()
                .enumerate()
                .filter_map(|(idx, row)| {
                    let lead_id = row_id(&row).unwrap_or_else(|| format!("#{}", idx));
                    match serde_json::from_value(row) {
                        Ok(lead) => Some(lead),
                        Err(e) => {
                            warn!(
                                operation = "analyze",
                                lead_id = %lead_id,
                                error = %e,
                                "skipping undecodable lead"
                            );
                            None
                        }
                    }
                })
                .collect();
            let reports: Vec<_> = leads.iter().map(|lead| engine.analyze(lead, now)).collect();

            if json {
                print_json(&reports)?;
            } else {
                for (lead, report) in leads.iter().zip(&reports) {
                    println!(
                        "{}",
                        lead_scorer::output::format_quality_report(report, use_colors)
                    );
                    if let Some(last) = lead.last_activity_date {
                        let idle = chrono::Duration::days(days_since(last, now) as i64);
                        println!(
                            "  Last activity: {}",
                            lead_scorer::output::format_inactivity(idle)
                        );
                    }
                    println!();
                }
            }
        }
        Commands::Recalculate { file, output } => {
            let values: Vec<serde_json::Value> = read_json_list(file)?;
            let (records, rejected) = decode_records(values);
            let report = engine.recalculate_par(&records, now).with_skipped(rejected);

            if let Some(path) = output {
                let plan = RecalcPlan::new(now, report.clone());
                save_plan(path, &plan)?;
                info!(path = %path.display(), "update plan written");
            }

            match cli.format {
                OutputFormat::Json => print_json(&RecalcPlan::new(now, report))?,
                OutputFormat::Tsv => {
                    let tsv = lead_scorer::output::format_tsv(&report);
                    if !tsv.is_empty() {
                        println!("{}", tsv);
                    }
                }
                OutputFormat::Table => {
                    println!(
                        "{}",
                        lead_scorer::output::format_recalc_table(&report, use_colors)
                    );
                    if cli.verbose {
                        eprintln!();
                        eprintln!(
                            "Total: {} leads, {} updated, {} skipped",
                            report.total,
                            report.updates.len(),
                            report.skipped.len()
                        );
                    }
                }
            }
        }
        Commands::Config(_) => {}
    }

    Ok(())
}

fn print_delta(json: bool, delta: i32) -> Result<()> {
    if json {
        print_json(&serde_json::json!({ "delta": delta }))
    } else {
        println!("{}", lead_scorer::output::format_delta(delta));
        Ok(())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

/// Read a JSON file holding either one object or an array of them
fn read_json_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file at {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        other => vec![other],
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            serde_json::from_value(item)
                .with_context(|| format!("Invalid entry #{} in {}", idx, path.display()))
        })
        .collect()
}
