//! Diet plan records
//!
//! This module defines the diet plan structure exactly as the web client
//! hands it over: a record with metadata and an optional day-by-day meal plan.
//! Field names on the wire are camelCase.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::label::humanize;

/// A complete diet plan, ready for export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietPlanRecord {
    /// Opaque identifier (not used in layout)
    pub id: String,
    /// Display title, also the base of the export file name
    pub title: String,
    /// Free-text description
    pub description: String,
    /// Plan category
    #[serde(rename = "type")]
    pub plan_type: PlanType,
    /// Creation date
    #[serde(with = "created_date")]
    pub created_date: NaiveDate,
    /// Who authored the plan
    pub source: PlanSource,
    /// Dietitian name, only for dietitian-authored plans
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietitian_name: Option<String>,
    /// Day-by-day plan; absent means no detailed plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_plan: Option<Vec<DayPlan>>,
}

/// One day of a meal plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Display label, e.g. "Monday" or "Day 1"
    pub day: String,
    /// Meals in serving order
    #[serde(default)]
    pub meals: Vec<Meal>,
}

/// A single meal within a day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    /// Meal slot label (Breakfast, Lunch, Suhoor, ...)
    #[serde(rename = "type")]
    pub meal_type: String,
    /// Dish name
    pub name: String,
    /// Ingredients in listed order
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Preparation instructions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Macro breakdown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutritional_info: Option<NutritionalInfo>,
}

/// Nutritional breakdown of a meal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionalInfo {
    /// Energy in kcal
    pub calories: u32,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fats in grams
    pub fats: f64,
}

/// Plan category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanType {
    WeightLoss,
    Diabetes,
    HeartHealth,
    General,
}

impl PlanType {
    /// Wire identifier, e.g. `weight-loss`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WeightLoss => "weight-loss",
            Self::Diabetes => "diabetes",
            Self::HeartHealth => "heart-health",
            Self::General => "general",
        }
    }

    /// Human-readable label, e.g. `Weight Loss`
    pub fn label(&self) -> String {
        humanize(self.as_str())
    }
}

/// Plan author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanSource {
    Ai,
    Dietitian,
}

impl PlanSource {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ai => "AI Generated",
            Self::Dietitian => "Dietitian Created",
        }
    }
}

impl DietPlanRecord {
    /// Parse a single record from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether the record carries at least one day of meals
    pub fn has_meal_plan(&self) -> bool {
        self.meal_plan.as_ref().is_some_and(|days| !days.is_empty())
    }

    /// Days of the meal plan (empty when absent)
    pub fn days(&self) -> &[DayPlan] {
        self.meal_plan.as_deref().unwrap_or(&[])
    }

    /// Output file name: `<Title_With_Underscores>_Diet_Plan.<ext>`
    ///
    /// Whitespace runs and path separators in the title each collapse to a
    /// single underscore.
    pub fn export_file_name(&self, extension: &str) -> String {
        let mut stem = String::with_capacity(self.title.len());
        let mut in_gap = false;
        for c in self.title.trim().chars() {
            if c.is_whitespace() || c == '/' || c == '\\' {
                if !in_gap {
                    stem.push('_');
                }
                in_gap = true;
            } else {
                stem.push(c);
                in_gap = false;
            }
        }
        format!("{}_Diet_Plan.{}", stem, extension)
    }
}

/// Parse one record or an array of records
pub fn parse_records(json: &str) -> Result<Vec<DietPlanRecord>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<DietPlanRecord>),
        One(Box<DietPlanRecord>),
    }

    Ok(match serde_json::from_str(json)? {
        OneOrMany::Many(records) => records,
        OneOrMany::One(record) => vec![*record],
    })
}

/// `createdDate` accepts a bare date or a full timestamp; only the date is kept.
mod created_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let date_part = raw.split('T').next().unwrap_or_default().trim();
        NaiveDate::parse_from_str(date_part, FORMAT)
            .map_err(|e| de::Error::custom(format!("invalid createdDate '{}': {}", raw, e)))
    }
}
