//! CLI entry point for the EDA report.

use anyhow::{Result, anyhow};
use clap::Parser;
use lex_eda::render::report_to_text;
use lex_eda::{Session, SessionReport, ViewConfig, ViewConfigBuilder};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    author = "Lex Machina Team",
    version,
    about = "Exploratory Data Analysis report for a CSV file",
    long_about = "Derives a preview, schema, missing values, summary statistics, \
                  correlation heatmap, distribution, boxplot, pair plot and target \
                  analysis from a single CSV file.\n\n\
                  EXAMPLES:\n  \
                  # Full report in the terminal\n  \
                  lex-eda -i data.csv\n\n  \
                  # Pick the columns for the distribution and boxplot views\n  \
                  lex-eda -i data.csv --hist-column age --box-column fare\n\n  \
                  # Analyse a target column\n  \
                  lex-eda -i data.csv --target Survived\n\n  \
                  # Machine-readable report with SVG charts\n  \
                  lex-eda -i data.csv --json > report.json"
)]
struct Args {
    /// Path to the CSV file to analyse
    ///
    /// Without a file the report only asks for one.
    #[arg(short, long)]
    input: Option<String>,

    /// Numeric column for the distribution view (default: first numeric column)
    #[arg(long)]
    hist_column: Option<String>,

    /// Numeric column for the boxplot view (default: first numeric column)
    #[arg(long)]
    box_column: Option<String>,

    /// Target column to analyse ("None" for no target)
    #[arg(short, long)]
    target: Option<String>,

    /// JSON file with view configuration
    ///
    /// Fields left out keep their defaults; flags below override the file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of rows shown in the data preview
    #[arg(long)]
    preview_rows: Option<usize>,

    /// Number of leading numeric columns in the pair plot
    #[arg(long)]
    pairwise_columns: Option<usize>,

    /// Boxplot whisker reach in multiples of the IQR
    #[arg(long)]
    whisker: Option<f64>,

    /// Rows scanned to infer column types (default: whole file)
    #[arg(long)]
    infer_schema_length: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and the report)
    #[arg(short, long)]
    quiet: bool,

    /// Output the report as JSON on stdout instead of text
    ///
    /// Disables all logs; only the JSON report is written.
    /// Useful for piping to other tools: `... --json | jq '.views[0]'`
    #[arg(long)]
    json: bool,

    /// Leave chart images out of the JSON report
    #[arg(long)]
    no_images: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = build_config(&args)?;
    debug!("View configuration: {:?}", config);

    let mut session = Session::new(config);

    if let Some(input) = &args.input {
        if !Path::new(input).exists() {
            return Err(anyhow!("Input file not found: {}", input));
        }

        info!("Loading dataset from: {}", input);
        session
            .upload_path(input)
            .map_err(|e| anyhow!("Could not load '{}': {}", input, e))?;
        apply_selection(&mut session, &args)?;
    }

    let report = session.render();
    if args.json {
        print_json(report, &session, &args)
    } else {
        print!("{}", report_to_text(&report));
        Ok(())
    }
}

/// Merge the config file (if any) with command line overrides.
fn build_config(args: &Args) -> Result<ViewConfig> {
    let base = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            ViewConfig::from_json_file(path)?
        }
        None => ViewConfig::default(),
    };

    let mut builder = ViewConfigBuilder::from_config(&base);
    if let Some(rows) = args.preview_rows {
        builder = builder.preview_rows(rows);
    }
    if let Some(columns) = args.pairwise_columns {
        builder = builder.pairwise_max_columns(columns);
    }
    if let Some(whisker) = args.whisker {
        builder = builder.whisker_coefficient(whisker);
    }
    if let Some(rows) = args.infer_schema_length {
        builder = builder.infer_schema_length(rows);
    }

    Ok(builder.build()?)
}

fn apply_selection(session: &mut Session, args: &Args) -> Result<()> {
    if let Some(column) = &args.hist_column {
        session
            .select_distribution_column(column)
            .map_err(|e| anyhow!("Invalid --hist-column: {}", e))?;
    }
    if let Some(column) = &args.box_column {
        session
            .select_boxplot_column(column)
            .map_err(|e| anyhow!("Invalid --box-column: {}", e))?;
    }
    if let Some(column) = &args.target {
        session
            .select_target(column)
            .map_err(|e| anyhow!("Invalid --target: {}", e))?;
    }
    Ok(())
}

#[allow(unused_mut, unused_variables)]
fn print_json(mut report: SessionReport, session: &Session, args: &Args) -> Result<()> {
    #[cfg(feature = "svg")]
    if !args.no_images {
        lex_eda::render::attach_images(&mut report, session.config());
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
