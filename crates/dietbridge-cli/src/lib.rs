//! dietbridge CLI - Command-line interface library
//!
//! This library provides the CLI functionality for Dietitian Bridge diet plan
//! export, including:
//! - Export: Write one diet plan record as a PDF
//! - Batch: Export every record in a JSON array or a directory of JSON files
//! - Layout: Print the composed page layout without writing a PDF
//!
//! # Binary Usage
//!
//! ```bash
//! # Export a single plan
//! dietbridge export plan.json --output exports/
//!
//! # Export a folder of plans
//! dietbridge batch plans/ --output exports/
//!
//! # Inspect the layout as JSON
//! dietbridge layout plan.json --format json
//! ```

pub mod app;
pub mod config;
pub mod logging;

// Re-export main entry point and types
pub use app::{batch_command, export_command, find_settings, layout_command, load_settings};
pub use app::{run_cli, BatchSummary, OutputFormat};
pub use config::{ExportSettings, LoggingSettings, Settings};
