//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use glob::glob;
use tracing::{debug, warn};

use dietbridge_model::{parse_records, DietPlanRecord};
use dietbridge_pdf::{export, Composer, DirectoryTarget, Emitted};

use crate::config::Settings;
use crate::logging::init_logging;

/// Output format for the layout command
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable page outline
    #[default]
    Text,
    /// Full composed document as JSON
    Json,
}

#[derive(Parser)]
#[command(name = "dietbridge")]
#[command(author, version, about = "Diet plan PDF export", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export one diet plan as a PDF
    Export {
        /// Diet plan JSON file
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Brand named in page footers
        #[arg(long)]
        brand: Option<String>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Export every plan in a JSON array file or a directory of JSON files
    Batch {
        /// JSON file or directory
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the page layout of a plan without writing a PDF
    Layout {
        /// Diet plan JSON file
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

impl Commands {
    fn config(&self) -> Option<&Path> {
        match self {
            Commands::Export { config, .. }
            | Commands::Batch { config, .. }
            | Commands::Layout { config, .. } => config.as_deref(),
        }
    }
}

/// Result of a batch export
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Successfully written files
    pub exported: Vec<Emitted>,
    /// Records that could not be exported, with the reason
    pub failed: Vec<(String, String)>,
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(cli.command.config())?;
    init_logging(&settings.logging.level, cli.verbose);

    match cli.command {
        Commands::Export {
            input,
            output,
            brand,
            config: _,
        } => {
            export_command(&input, output.as_deref(), brand.as_deref(), &settings)?;
        }
        Commands::Batch {
            input,
            output,
            config: _,
        } => {
            let summary = batch_command(&input, output.as_deref(), &settings)?;
            if !summary.failed.is_empty() {
                anyhow::bail!(
                    "{} of {} exports failed",
                    summary.failed.len(),
                    summary.failed.len() + summary.exported.len()
                );
            }
        }
        Commands::Layout {
            input,
            format,
            config: _,
        } => {
            let output = layout_command(&input, format, &settings)?;
            print!("{}", output);
        }
    }

    Ok(())
}

/// Execute the export command
pub fn export_command(
    input: &Path,
    output_dir: Option<&Path>,
    brand: Option<&str>,
    settings: &Settings,
) -> Result<Emitted> {
    println!("dietbridge v{}", dietbridge_model::VERSION);
    println!("Exporting: {}", input.display());

    let record = read_single_record(input)?;

    let mut options = settings.layout_options();
    if let Some(brand) = brand {
        options.brand = brand.to_string();
    }

    let target = open_target(output_dir, settings)?;
    let emitted = export(&record, &target, &options)
        .with_context(|| format!("Failed to export diet plan: {}", record.title))?;

    println!("  Created: {} ({})", emitted.path.display(), emitted.route);
    Ok(emitted)
}

/// Execute the batch command
///
/// Per-record failures are collected in the summary rather than aborting the
/// run; only unreadable input is an error.
pub fn batch_command(
    input: &Path,
    output_dir: Option<&Path>,
    settings: &Settings,
) -> Result<BatchSummary> {
    println!("dietbridge v{}", dietbridge_model::VERSION);
    println!("Batch exporting: {}", input.display());

    if !input.exists() {
        anyhow::bail!("Input not found: {}", input.display());
    }

    let files = if input.is_dir() {
        json_files_in(input)?
    } else {
        vec![input.to_path_buf()]
    };

    let target = open_target(output_dir, settings)?;
    let options = settings.layout_options();
    let mut summary = BatchSummary::default();
    let mut seen_names = HashSet::new();

    for file in &files {
        let records = match read_records(file) {
            Ok(records) => records,
            Err(err) => {
                println!("  Failed: {} ({:#})", file.display(), err);
                summary.failed.push((file.display().to_string(), format!("{:#}", err)));
                continue;
            }
        };

        for record in records {
            let file_name = record.export_file_name("pdf");
            if !seen_names.insert(file_name.clone()) {
                warn!(file = %file_name, "file name repeats within batch, overwriting");
            }

            match export(&record, &target, &options) {
                Ok(emitted) => {
                    println!("  Created: {} ({})", emitted.path.display(), emitted.route);
                    summary.exported.push(emitted);
                }
                Err(err) => {
                    println!("  Failed: {} ({})", record.title, err);
                    summary.failed.push((record.title.clone(), err.to_string()));
                }
            }
        }
    }

    println!();
    println!("Batch complete!");
    println!("  Exported: {}", summary.exported.len());
    println!("  Failed: {}", summary.failed.len());

    Ok(summary)
}

/// Execute the layout command, returning the rendered report
pub fn layout_command(input: &Path, format: OutputFormat, settings: &Settings) -> Result<String> {
    let record = read_single_record(input)?;
    let document = Composer::new(settings.layout_options()).compose(&record);

    match format {
        OutputFormat::Text => Ok(document.outline()),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&document)
                .context("Failed to serialize layout")?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Load settings from a config file or use defaults
pub fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    match config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            read_settings(path)
        }
        None => find_settings(Path::new(".")),
    }
}

/// Look for `dietbridge.toml` or `.dietbridge.toml` in `dir`
///
/// A config file that exists but does not parse is an error, not a fallback
/// to defaults.
pub fn find_settings(dir: &Path) -> Result<Settings> {
    let candidates = ["dietbridge.toml", ".dietbridge.toml"];
    match candidates.iter().map(|name| dir.join(name)).find(|path| path.exists()) {
        Some(path) => read_settings(&path),
        None => Ok(Settings::default()),
    }
}

fn read_settings(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    Settings::from_toml_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))
}

fn open_target(output_dir: Option<&Path>, settings: &Settings) -> Result<DirectoryTarget> {
    let dir = output_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| settings.export.output_dir.clone());
    DirectoryTarget::create(&dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))
}

fn read_records(path: &Path) -> Result<Vec<DietPlanRecord>> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    let records = parse_records(&content)
        .with_context(|| format!("Failed to parse diet plan: {}", path.display()))?;
    debug!(file = %path.display(), records = records.len(), "loaded diet plans");
    Ok(records)
}

fn read_single_record(path: &Path) -> Result<DietPlanRecord> {
    let mut records = read_records(path)?;
    match records.len() {
        1 => Ok(records.remove(0)),
        0 => anyhow::bail!("No diet plan found in {}", path.display()),
        n => anyhow::bail!(
            "{} holds {} diet plans; use 'dietbridge batch' to export them all",
            path.display(),
            n
        ),
    }
}

/// All `*.json` files directly inside `dir`, sorted by path
fn json_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = dir.join("*.json").display().to_string();
    let mut files = Vec::new();
    for entry in glob(&pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))? {
        match entry {
            Ok(path) => files.push(path),
            Err(e) => {
                warn!(error = %e, "could not read directory entry");
            }
        }
    }
    files.sort();
    Ok(files)
}
