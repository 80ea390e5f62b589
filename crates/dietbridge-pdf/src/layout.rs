//! Page geometry and layout options

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Brand printed in every page footer
pub const DEFAULT_BRAND: &str = "Dietitian Bridge";

/// Paper size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Width and height in millimetres
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
        }
    }
}

/// How the creation date is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateStyle {
    /// `1/15/2024`
    #[default]
    Us,
    /// `2024-01-15`
    Iso,
    /// `January 15, 2024`
    Long,
}

impl DateStyle {
    /// Format a date in this style
    pub fn format(self, date: NaiveDate) -> String {
        let pattern = match self {
            DateStyle::Us => "%-m/%-d/%Y",
            DateStyle::Iso => "%Y-%m-%d",
            DateStyle::Long => "%B %-d, %Y",
        };
        date.format(pattern).to_string()
    }
}

/// Caller-tunable layout options
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Brand named in the footer
    pub brand: String,
    /// Paper size
    pub page_size: PageSize,
    /// Creation date format
    pub date_style: DateStyle,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            brand: DEFAULT_BRAND.to_string(),
            page_size: PageSize::default(),
            date_style: DateStyle::default(),
        }
    }
}

/// Fixed positions derived from the paper size (millimetres, top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub page_width: f32,
    pub page_height: f32,
    pub top_margin: f32,
    pub left_margin: f32,
    /// Body content must end at or above this y
    pub break_limit: f32,
    /// Top of the footer line
    pub footer_y: f32,
}

impl Geometry {
    pub fn for_page(size: PageSize) -> Self {
        let (page_width, page_height) = size.dimensions();
        Self {
            page_width,
            page_height,
            top_margin: 20.0,
            left_margin: 20.0,
            break_limit: page_height - 27.0,
            footer_y: page_height - 13.0,
        }
    }

    /// Horizontal centre of the page
    pub fn center_x(&self) -> f32 {
        self.page_width / 2.0
    }
}
