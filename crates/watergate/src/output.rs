//! Output formatting: table, JSON, YAML.
//!
//! Every device reading is a single record, so the table format is a
//! two-column field/value view built by each command's `detail_fn`.

use std::fmt::Display;
use std::io::{self, Write};

use tabled::{Table, Tabled, settings::Style};

use crate::cli::OutputFormat;

// ── Rows ─────────────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct FieldRow {
    #[tabled(rename = "Field")]
    pub field: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

/// Format an optional field, `-` when absent.
pub fn opt<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".into(), |v| v.to_string())
}

/// Build a rounded field/value table.
pub fn detail_table(rows: Vec<(&str, String)>) -> String {
    let rows: Vec<FieldRow> = rows
        .into_iter()
        .map(|(field, value)| FieldRow {
            field: field.to_owned(),
            value,
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a single serde-serializable item in the chosen format.
pub fn render_single<T>(format: OutputFormat, data: &T, detail_fn: impl Fn(&T) -> String) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json_pretty(data),
        OutputFormat::JsonCompact => render_json_compact(data),
        OutputFormat::Yaml => render_yaml(data),
    }
}

/// Render an item the device may not have (e.g. no shut-off report yet).
///
/// Structured formats emit `null`; the table format prints `empty`.
pub fn render_optional<T>(
    format: OutputFormat,
    data: Option<&T>,
    detail_fn: impl Fn(&T) -> String,
    empty: &str,
) -> String
where
    T: serde::Serialize,
{
    match (format, data) {
        (_, Some(item)) => render_single(format, item, detail_fn),
        (OutputFormat::Table, None) => empty.to_owned(),
        (_, None) => render_single(format, &serde_json::Value::Null, |_| String::new()),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_json_pretty<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("<serialization error: {e}>"))
}

fn render_json_compact<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string(data).unwrap_or_else(|e| format!("<serialization error: {e}>"))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("<serialization error: {e}>"))
}
