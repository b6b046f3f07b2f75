use crate::terminal::colors;
use colored::*;
use serde_json::Value;

use infoguard_common::scan::ScanReport;

/// Top-level scalar fields of a report, sorted by key.
///
/// Nested objects and arrays are left to the full JSON rendering.
pub fn scalar_fields(report: &ScanReport) -> Vec<(String, String)> {
    let Some(object) = report.as_json().as_object() else {
        return Vec::new();
    };

    object
        .iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => "null".to_string(),
                Value::Array(_) | Value::Object(_) => return None,
            };
            Some((key.clone(), text))
        })
        .collect()
}

pub fn report_to_details(report: &ScanReport) -> Vec<(String, ColoredString)> {
    scalar_fields(report)
        .into_iter()
        .map(|(key, text)| {
            let value = if key == "positives" {
                match text.parse::<u64>() {
                    Ok(0) => text.color(colors::CLEAN),
                    Ok(_) => text.color(colors::DETECTED).bold(),
                    Err(_) => text.normal(),
                }
            } else {
                text.color(colors::TEXT_DEFAULT)
            };
            (key, value)
        })
        .collect()
}
