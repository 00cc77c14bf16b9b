//! BiasRx - dataset inspection CLI
//!
//! Command-line interface for exploring a CSV dataset and checking label
//! columns for class imbalance.

use biasrx::data::TabularDataset;
use biasrx::error::Result;
use biasrx::pipeline::{AnalysisConfig, Pipeline, Session};
use biasrx::profile::eligible_label_columns;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Output format for reports.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
    /// Markdown (bias reports only; other reports fall back to text)
    Markdown,
}

/// Dataset inspection and label-imbalance detection
#[derive(Parser)]
#[command(name = "biasrx")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show shape, column types, missing values and unique counts
    Explore {
        /// Path to dataset CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Number of preview rows (default: 5)
        #[arg(long, default_value = "5")]
        rows: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the value distribution of any column
    Distribution {
        /// Path to dataset CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Column to count
        #[arg(short, long)]
        column: String,

        /// Export the distribution as CSV (default name: <column>_distribution.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export to the default file name
        #[arg(long, conflicts_with = "output")]
        export: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List columns that can be used as labels
    Labels {
        /// Path to dataset CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Columns need fewer distinct values than this (default: 50)
        #[arg(long, default_value = "50")]
        max_cardinality: usize,
    },

    /// Check a label column for class imbalance
    Bias {
        /// Path to dataset CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Label column
        #[arg(short, long)]
        column: String,

        /// Analysis configuration YAML
        #[arg(long)]
        config: Option<PathBuf>,

        /// Imbalance threshold (overrides config)
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Label cardinality limit (overrides config)
        #[arg(long)]
        max_cardinality: Option<usize>,

        /// Allow columns that are not eligible labels
        #[arg(long)]
        allow_any_column: bool,

        /// Print the explanatory insight text
        #[arg(long)]
        insight: bool,

        /// Export the label distribution as CSV (default name: <column>_label_counts.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export to the default file name
        #[arg(long, conflicts_with = "output")]
        export: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Generate an example analysis configuration
    Example {
        /// Output path for the example YAML
        #[arg(short, long, default_value = "analysis.yaml")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Explore {
            input,
            rows,
            format,
        } => cmd_explore(&input, rows, format),

        Commands::Distribution {
            input,
            column,
            output,
            export,
            format,
        } => {
            let output = export_path(output, export, &column, "distribution");
            cmd_distribution(&input, &column, output.as_deref(), format)
        }

        Commands::Labels {
            input,
            max_cardinality,
        } => cmd_labels(&input, max_cardinality),

        Commands::Bias {
            input,
            column,
            config,
            threshold,
            max_cardinality,
            allow_any_column,
            insight,
            output,
            export,
            format,
        } => {
            let output = export_path(output, export, &column, "label_counts");
            cmd_bias(
                &input,
                &column,
                config.as_deref(),
                threshold,
                max_cardinality,
                allow_any_column,
                insight,
                output.as_deref(),
                format,
            )
        }

        Commands::Example { output } => cmd_example(&output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Install a stderr subscriber; `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "biasrx=debug" } else { "biasrx=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn export_path(output: Option<PathBuf>, export: bool, column: &str, suffix: &str) -> Option<PathBuf> {
    match output {
        Some(path) => Some(path),
        None if export => Some(PathBuf::from(format!("{}_{}.csv", column, suffix))),
        None => None,
    }
}

/// Profile a dataset
fn cmd_explore(input: &Path, rows: usize, format: OutputFormat) -> Result<()> {
    let config = AnalysisConfig::default().with_preview_rows(rows);
    let session = Session::from_csv(input, config)?;
    let profile = session.profile()?;

    match format {
        OutputFormat::Json => println!("{}", profile.to_json()?),
        OutputFormat::Yaml => print!("{}", profile.to_yaml()?),
        OutputFormat::Text | OutputFormat::Markdown => print!("{}", profile),
    }

    Ok(())
}

/// Show the distribution of one column
fn cmd_distribution(
    input: &Path,
    column: &str,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let session = Session::from_csv(input, AnalysisConfig::default())?;
    let distribution = session.distribution(column)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&distribution)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&distribution)?),
        OutputFormat::Text | OutputFormat::Markdown => print!("{}", distribution),
    }

    if let Some(path) = output {
        distribution.to_csv(path)?;
        info!(path = %path.display(), "wrote distribution");
    }

    Ok(())
}

/// List eligible label columns
fn cmd_labels(input: &Path, max_cardinality: usize) -> Result<()> {
    let dataset = TabularDataset::from_csv(input)?;
    let labels = eligible_label_columns(&dataset, max_cardinality);

    if labels.is_empty() {
        eprintln!(
            "No column has fewer than {} distinct values; nothing to analyze as a label.",
            max_cardinality
        );
    }
    for label in labels {
        println!("{}", label);
    }

    Ok(())
}

/// Run label bias detection
#[allow(clippy::too_many_arguments)]
fn cmd_bias(
    input: &Path,
    column: &str,
    config_path: Option<&Path>,
    threshold: Option<f64>,
    max_cardinality: Option<usize>,
    allow_any_column: bool,
    insight: bool,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => {
            info!(path = %path.display(), "loading analysis configuration");
            AnalysisConfig::from_file(path)?
        }
        None => AnalysisConfig::default(),
    };
    if let Some(threshold) = threshold {
        config = config.with_threshold(threshold);
    }
    if let Some(max_cardinality) = max_cardinality {
        config = config.with_max_label_cardinality(max_cardinality);
    }
    if allow_any_column {
        config = config.with_strict_label_selection(false);
    }

    let session = Session::from_csv(input, config)?;
    info!(
        column,
        threshold = session.config().imbalance_threshold,
        "checking label balance"
    );
    let report = session.analyze_label(column)?;

    match format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Yaml => print!("{}", report.to_yaml()?),
        OutputFormat::Markdown => print!("{}", report.to_markdown()),
        OutputFormat::Text if insight => print!("{}", report),
        OutputFormat::Text => {
            print!("{}", report.distribution);
            println!();
            println!("{}", report.headline);
            if report.advisory.has_strategies() {
                println!();
                println!("Bias Fix Suggestions");
                for strategy in &report.advisory.strategies {
                    println!("  - {}: {}", strategy.name, strategy.description);
                }
                println!();
                println!("Run with --insight for an explanation of the risks.");
            }
        }
    }

    if let Some(path) = output {
        report.distribution.to_csv(path)?;
        info!(path = %path.display(), "wrote label distribution");
    }

    Ok(())
}

/// Generate example analysis configuration
fn cmd_example(output_path: &Path) -> Result<()> {
    let pipeline = Pipeline::new()
        .name("example-label-check")
        .threshold(0.5)
        .max_label_cardinality(50)
        .strict(true);

    let config = pipeline.to_config(Some(
        "Flag label columns whose smallest class is under half the largest",
    ));
    let yaml = config.to_yaml()?;

    std::fs::write(output_path, &yaml)?;
    info!(path = %output_path.display(), "wrote example configuration");
    println!("{}", yaml);

    Ok(())
}
