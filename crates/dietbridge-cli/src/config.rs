//! Configuration Settings
//!
//! Settings are loaded from `dietbridge.toml` in the working directory:
//!
//! ```toml
//! [export]
//! brand = "Dietitian Bridge"
//! date_style = "us"        # us | iso | long
//! page_size = "a4"         # a4 | letter
//! output_dir = "exports"
//!
//! [logging]
//! level = "info"
//! ```

use std::path::PathBuf;

use dietbridge_pdf::{DateStyle, LayoutOptions, PageSize, DEFAULT_BRAND};
use serde::{Deserialize, Serialize};

/// Top-level settings structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Export settings
    pub export: ExportSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Layout options for the composer
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            brand: self.export.brand.clone(),
            page_size: self.export.page_size,
            date_style: self.export.date_style,
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Brand named in page footers
    pub brand: String,
    /// Creation date format
    pub date_style: DateStyle,
    /// Paper size
    pub page_size: PageSize,
    /// Directory PDFs are written to
    pub output_dir: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            brand: DEFAULT_BRAND.to_string(),
            date_style: DateStyle::default(),
            page_size: PageSize::default(),
            output_dir: PathBuf::from("."),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Base level when `-v` is not given
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
