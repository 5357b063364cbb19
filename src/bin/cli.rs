//! Scatterboard CLI
//!
//! Offline access to the pipeline stages:
//! - Generate the raw dataset
//! - Filter it the way the dashboard controls do
//! - Dump the chart figure as JSON
//! - Write a default config file

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use scatterboard::config::{generate_default_config, Config};
use scatterboard::dataset::parse_date;
use scatterboard::export::ExportFormat;
use scatterboard::logging;
use scatterboard::pipeline::{FilterParams, Pipeline};

#[derive(Parser)]
#[command(name = "scatterboard-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate, filter and chart synthetic business data")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the generator seed
    #[arg(short, long, global = true)]
    pub seed: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the full generated dataset
    Generate {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Print the records matching a date range and department selection
    Filter {
        #[command(flatten)]
        filter: FilterArgs,
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Print the plotly.js figure for a filter as JSON
    Chart {
        #[command(flatten)]
        filter: FilterArgs,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Generate default config file
    InitConfig {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
pub struct FilterArgs {
    /// First date, YYYY-MM-DD (default: first month)
    #[arg(long, value_parser = parse_date_arg)]
    pub from: Option<NaiveDate>,
    /// Last date, YYYY-MM-DD (default: last month)
    #[arg(long, value_parser = parse_date_arg)]
    pub to: Option<NaiveDate>,
    /// Department to include; repeat for several (default: all)
    #[arg(short, long = "department")]
    pub departments: Vec<String>,
    /// Select no departments at all
    #[arg(long, conflicts_with = "departments")]
    pub none: bool,
}

impl FilterArgs {
    fn to_params(&self) -> FilterParams {
        let departments = if self.none {
            Some(Vec::new())
        } else if self.departments.is_empty() {
            None
        } else {
            Some(self.departments.clone())
        };

        FilterParams {
            from: self.from,
            to: self.to,
            departments,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Ndjson,
    Csv,
}

impl From<OutputFormat> for ExportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Table => ExportFormat::Table,
            OutputFormat::Json => ExportFormat::Json,
            OutputFormat::Ndjson => ExportFormat::Ndjson,
            OutputFormat::Csv => ExportFormat::Csv,
        }
    }
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::from_env(),
    };
    if let Some(seed) = cli.seed {
        config.dataset.seed = seed;
    }

    // stdout carries command output only; diagnostics go to stderr at warn
    let mut logging_config = config.logging.clone();
    if std::env::var("RUST_LOG").is_err() {
        logging_config.level = "warn".to_string();
    }
    logging::init_with_writer(&logging_config, std::io::stderr);

    let spec = config.dataset_spec().context("invalid dataset configuration")?;
    let pipeline = Pipeline::new(spec, config.chart.clone());

    print!("{}", execute(cli.command, &pipeline)?);
    Ok(())
}

/// Run one subcommand, returning what belongs on stdout
fn execute(command: Commands, pipeline: &Pipeline) -> anyhow::Result<String> {
    match command {
        Commands::Generate { format } => {
            let dataset = pipeline.generate();
            Ok(ExportFormat::from(format).render(dataset.records())?)
        }

        Commands::Filter { filter, format } => {
            let rendered = pipeline.render(&filter.to_params())?;
            if let Some(warning) = rendered.warning {
                eprintln!("warning: {}", warning);
            }
            eprintln!(
                "{} of {} records selected",
                rendered.records.len(),
                rendered.dataset.len()
            );
            Ok(ExportFormat::from(format).render(&rendered.records)?)
        }

        Commands::Chart { filter, pretty } => {
            let rendered = pipeline.render(&filter.to_params())?;
            if let Some(warning) = rendered.warning {
                eprintln!("warning: {}", warning);
            }
            let mut json = if pretty {
                serde_json::to_string_pretty(&rendered.figure)?
            } else {
                serde_json::to_string(&rendered.figure)?
            };
            json.push('\n');
            Ok(json)
        }

        Commands::InitConfig { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    eprintln!("Config written to {}", path.display());
                    Ok(String::new())
                }
                None => Ok(content),
            }
        }
    }
}
