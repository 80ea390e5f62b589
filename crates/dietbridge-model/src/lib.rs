//! dietbridge-model - Diet plan data model
//!
//! This crate provides the record types handed to the export pipeline: a
//! [`DietPlanRecord`] with its days, meals and nutritional breakdown, along
//! with the display labels derived from them.

pub mod error;
pub mod label;
pub mod plan;

pub use error::{ModelError, Result};
pub use label::humanize;
pub use plan::{
    parse_records, DayPlan, DietPlanRecord, Meal, NutritionalInfo, PlanSource, PlanType,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
