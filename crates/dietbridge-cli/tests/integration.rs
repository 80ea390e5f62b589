//! Integration tests for the dietbridge CLI
//!
//! These tests run the export, batch and layout commands against plan files
//! in temporary directories.

use std::fs;
use std::path::{Path, PathBuf};

use dietbridge_cli::{
    batch_command, export_command, find_settings, layout_command, load_settings, OutputFormat,
    Settings,
};
use dietbridge_pdf::EmitRoute;
use tempfile::TempDir;

fn plan_json(title: &str) -> String {
    format!(
        r#"{{
  "id": "p-{title}",
  "title": "{title}",
  "description": "Steady changes built around whole foods.",
  "type": "diabetes",
  "createdDate": "2024-02-01",
  "source": "dietitian",
  "dietitianName": "Dr. Omar Haddad",
  "mealPlan": [
    {{
      "day": "Monday",
      "meals": [
        {{
          "type": "Breakfast",
          "name": "Greek yoghurt bowl",
          "ingredients": ["yoghurt", "walnuts", "berries"],
          "nutritionalInfo": {{ "calories": 320, "protein": 18, "carbs": 30, "fats": 12 }}
        }}
      ]
    }}
  ]
}}"#
    )
}

fn write_plan(dir: &Path, file: &str, json: &str) -> PathBuf {
    let path = dir.join(file);
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn test_export_writes_pdf_into_output_dir() {
    let temp = TempDir::new().unwrap();
    let input = write_plan(temp.path(), "plan.json", &plan_json("Ramadan Plan"));
    let out_dir = temp.path().join("exports");

    let emitted =
        export_command(&input, Some(&out_dir), None, &Settings::default()).unwrap();

    assert_eq!(emitted.route, EmitRoute::Direct);
    assert_eq!(emitted.path, out_dir.join("Ramadan_Plan_Diet_Plan.pdf"));
    assert!(fs::read(&emitted.path).unwrap().starts_with(b"%PDF"));
}

#[test]
fn test_export_uses_settings_output_dir() {
    let temp = TempDir::new().unwrap();
    let input = write_plan(temp.path(), "plan.json", &plan_json("Low Sugar"));

    let mut settings = Settings::default();
    settings.export.output_dir = temp.path().join("from-settings");

    let emitted = export_command(&input, None, None, &settings).unwrap();
    assert!(emitted.path.starts_with(temp.path().join("from-settings")));
}

#[test]
fn test_export_missing_input_fails() {
    let temp = TempDir::new().unwrap();
    let result = export_command(
        &temp.path().join("missing.json"),
        Some(temp.path()),
        None,
        &Settings::default(),
    );
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Input file not found"));
}

#[test]
fn test_export_rejects_multiple_records() {
    let temp = TempDir::new().unwrap();
    let json = format!("[{}, {}]", plan_json("One"), plan_json("Two"));
    let input = write_plan(temp.path(), "plans.json", &json);

    let err = export_command(&input, Some(temp.path()), None, &Settings::default()).unwrap_err();
    assert!(err.to_string().contains("dietbridge batch"));
}

#[test]
fn test_batch_directory_collects_failures() {
    let temp = TempDir::new().unwrap();
    let plans = temp.path().join("plans");
    fs::create_dir_all(&plans).unwrap();
    write_plan(&plans, "a.json", &plan_json("Plan A"));
    write_plan(
        &plans,
        "b.json",
        &format!("[{}, {}]", plan_json("Plan B"), plan_json("Plan C")),
    );
    write_plan(&plans, "broken.json", "{ \"title\": ");

    let out_dir = temp.path().join("out");
    let summary = batch_command(&plans, Some(&out_dir), &Settings::default()).unwrap();

    assert_eq!(summary.exported.len(), 3);
    assert_eq!(summary.failed.len(), 1);
    assert!(summary.failed[0].0.ends_with("broken.json"));
    for name in ["Plan_A", "Plan_B", "Plan_C"] {
        assert!(out_dir.join(format!("{name}_Diet_Plan.pdf")).exists());
    }
}

#[test]
fn test_batch_missing_input_fails() {
    let temp = TempDir::new().unwrap();
    let result = batch_command(&temp.path().join("nope"), Some(temp.path()), &Settings::default());
    assert!(result.is_err());
}

#[test]
fn test_layout_text_outline() {
    let temp = TempDir::new().unwrap();
    let input = write_plan(temp.path(), "plan.json", &plan_json("Ramadan Plan"));

    let outline = layout_command(&input, OutputFormat::Text, &Settings::default()).unwrap();
    assert!(outline.starts_with("Ramadan_Plan_Diet_Plan.pdf (1 pages)"));
    assert!(outline.contains("Breakfast: Greek yoghurt bowl"));
    assert!(outline.contains("Dietitian: Dr. Omar Haddad"));
    assert!(outline.contains("Generated by Dietitian Bridge - Page 1 of 1"));
}

#[test]
fn test_layout_json_honours_settings() {
    let temp = TempDir::new().unwrap();
    let input = write_plan(temp.path(), "plan.json", &plan_json("Ramadan Plan"));
    let config = write_plan(
        temp.path(),
        "dietbridge.toml",
        "[export]\nbrand = \"Green Clinic\"\ndate_style = \"iso\"\n",
    );

    let settings = load_settings(Some(&config)).unwrap();
    let json = layout_command(&input, OutputFormat::Json, &settings).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["file_name"], "Ramadan_Plan_Diet_Plan.pdf");
    assert_eq!(value["pages"].as_array().unwrap().len(), 1);
    assert!(json.contains("Generated by Green Clinic - Page 1 of 1"));
    assert!(json.contains("Created: 2024-02-01"));
}

#[test]
fn test_invalid_config_in_working_dir_is_reported() {
    let temp = TempDir::new().unwrap();
    write_plan(
        temp.path(),
        "dietbridge.toml",
        "[export]\nbrand = \"Mine\"\npage_size = \"a3\"\n",
    );

    let err = find_settings(temp.path()).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse config"));
}

#[test]
fn test_config_in_working_dir_is_applied() {
    let temp = TempDir::new().unwrap();
    write_plan(temp.path(), ".dietbridge.toml", "[export]\nbrand = \"Mine\"\n");

    let settings = find_settings(temp.path()).unwrap();
    assert_eq!(settings.export.brand, "Mine");
}

#[test]
fn test_no_config_in_working_dir_uses_defaults() {
    let temp = TempDir::new().unwrap();
    let settings = find_settings(temp.path()).unwrap();
    assert_eq!(settings.export.brand, "Dietitian Bridge");
}
