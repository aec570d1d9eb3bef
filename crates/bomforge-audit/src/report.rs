//! Rendering a comparator result as text, JSON, or CSV.

use bomforge_core::{DiffKind, Difference};
use bomforge_formats::util::current_timestamp;
use serde_json::json;
use tracing::debug;

/// Render `differences` in the requested format. Unknown formats fall back to `text`.
pub fn render(differences: &[Difference], format: &str) -> String {
    debug!(format, count = differences.len(), "rendering difference report");
    match format.to_ascii_lowercase().as_str() {
        "json" => render_json(differences),
        "csv" => render_csv(differences),
        _ => render_text(differences),
    }
}

fn render_text(differences: &[Difference]) -> String {
    if differences.is_empty() {
        return "No differences found".to_owned();
    }
    let mut out = String::new();
    for d in differences {
        out.push_str(&format!(
            "[{}] {} {} ({:?})\n",
            d.kind.as_str().to_ascii_uppercase(),
            d.component.name,
            d.component.version,
            d.component.file_type
        ));
    }
    out
}

fn render_json(differences: &[Difference]) -> String {
    let entries: Vec<_> = differences
        .iter()
        .map(|d| {
            json!({
                "type": d.kind.as_str(),
                "component": {
                    "name": d.component.name,
                    "version": d.component.version,
                    "type": format!("{:?}", d.component.file_type),
                }
            })
        })
        .collect();
    let doc = json!({
        "timestamp": current_timestamp(),
        "differences": entries,
    });
    serde_json::to_string_pretty(&doc).unwrap_or_default()
}

fn csv_field(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn render_csv(differences: &[Difference]) -> String {
    let mut out = String::from("Type,Name,Version,Type,License,Description\n");
    for d in differences {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            csv_field(d.kind.as_str()),
            csv_field(&d.component.name),
            csv_field(&d.component.version),
            csv_field(&format!("{:?}", d.component.file_type)),
            csv_field(&d.component.license),
            csv_field(&d.component.description),
        ));
    }
    out
}
