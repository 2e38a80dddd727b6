use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cstandards::config::Config;
use cstandards::error::StandardsError;
use cstandards::output::OutputFormat;
use cstandards::rules::{RuleCatalog, Severity};
use cstandards::{CheckOptions, EvaluationOptions};

#[derive(Parser)]
#[command(
    name = "cstandards",
    about = "Evaluate C sources against coding-standard rules",
    version,
    author
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate files or directories
    Check {
        /// Files or directories to evaluate
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Config file path
        #[arg(long, short = 'c', default_value = ".cstandards.toml")]
        config: PathBuf,

        /// Only evaluate rules in these categories (repeatable)
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Only evaluate rules with exactly this severity (error, warning, info)
        #[arg(long)]
        severity: Option<String>,

        /// Include rules disabled in the catalog
        #[arg(long)]
        all: bool,

        /// Stop applying rules to a file once this many violations are found
        #[arg(long)]
        max_violations: Option<usize>,

        /// Output format (markdown, console, json, sarif)
        #[arg(long, short = 'f', default_value = "markdown")]
        format: String,

        /// Minimum severity to fail (info, warning, error)
        #[arg(long)]
        fail_on: Option<String>,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List the effective rule catalog
    ListRules {
        /// Config file path
        #[arg(long, short = 'c', default_value = ".cstandards.toml")]
        config: PathBuf,

        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },

    /// Generate a starter .cstandards.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check {
            paths,
            config,
            categories,
            severity,
            all,
            max_violations,
            format,
            fail_on,
            output,
        } => cmd_check(CheckArgs {
            paths,
            config,
            categories,
            severity,
            all,
            max_violations,
            format,
            fail_on,
            output,
        }),
        Commands::ListRules { config, format } => cmd_list_rules(config, format),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

struct CheckArgs {
    paths: Vec<PathBuf>,
    config: PathBuf,
    categories: Vec<String>,
    severity: Option<String>,
    all: bool,
    max_violations: Option<usize>,
    format: String,
    fail_on: Option<String>,
    output: Option<PathBuf>,
}

fn parse_severity(value: &str) -> Result<Severity, StandardsError> {
    Severity::from_str_lenient(value)
        .ok_or_else(|| StandardsError::Config(format!("unknown severity '{value}'")))
}

fn cmd_check(args: CheckArgs) -> Result<i32, StandardsError> {
    let format = OutputFormat::from_str_lenient(&args.format).unwrap_or_else(|| {
        eprintln!("Warning: unknown format '{}', using markdown", args.format);
        OutputFormat::Markdown
    });

    let severity = args.severity.as_deref().map(parse_severity).transpose()?;
    let fail_on = args.fail_on.as_deref().map(parse_severity).transpose()?;

    let categories = if args.categories.is_empty() {
        None
    } else {
        Some(args.categories.into_iter().collect::<BTreeSet<_>>())
    };

    let options = CheckOptions {
        config_path: Some(args.config),
        format,
        fail_on_override: fail_on,
        evaluation: EvaluationOptions {
            categories,
            severity,
            enabled_only: !args.all,
            max_violations: args.max_violations,
        },
    };

    // Render only after the whole batch evaluated.
    let report = cstandards::check(&args.paths, &options)?;
    let rendered = cstandards::render_report(&report, format)?;

    match args.output {
        Some(out) => std::fs::write(&out, &rendered)?,
        None => print!("{}", rendered),
    }

    // Exit code: 0 = pass, 1 = violations at or above threshold
    Ok(if report.verdict.pass { 0 } else { 1 })
}

fn cmd_list_rules(config_path: PathBuf, format_str: String) -> Result<i32, StandardsError> {
    let config = Config::load(&config_path)?;
    let rules = config.build_catalog()?.all_rules()?;

    match format_str.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&rules)?;
            println!("{}", json);
        }
        _ => {
            println!(
                "{:<26} {:<28} {:<9} {:<8} CATEGORIES",
                "ID", "NAME", "SEVERITY", "ENABLED"
            );
            println!("{}", "-".repeat(90));
            for rule in &rules {
                println!(
                    "{:<26} {:<28} {:<9} {:<8} {}",
                    rule.id,
                    rule.name,
                    rule.severity.to_string(),
                    if rule.enabled { "yes" } else { "no" },
                    rule.categories
                        .iter()
                        .map(String::as_str)
                        .collect::<Vec<_>>()
                        .join(", "),
                );
            }
        }
    }

    Ok(0)
}

fn cmd_init(force: bool) -> Result<i32, StandardsError> {
    let path = PathBuf::from(".cstandards.toml");

    if path.exists() && !force {
        eprintln!(".cstandards.toml already exists. Use --force to overwrite.");
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created .cstandards.toml");

    Ok(0)
}
