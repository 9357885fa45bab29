use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod columns;
pub mod table;

pub use columns::TableRow;

use table::{Cell, Column, TableOptions};

const RECORD_COLUMNS: [Column; 2] = [Column::fixed("field"), Column::text("value")];

/// Render a single response. Tables show it as field/value pairs.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => record_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

/// Render a list of entities. Tables use the entity's own columns.
pub fn render_rows<T: Serialize + TableRow>(
    rows: &[T],
    format: OutputFormat,
) -> anyhow::Result<String> {
    if format != OutputFormat::Table {
        return render(&rows, format);
    }
    if rows.is_empty() {
        return Ok(String::from("(no rows)"));
    }
    let cells: Vec<Vec<Cell>> = rows.iter().map(TableRow::cells).collect();
    Ok(table::render(T::COLUMNS, &cells, table_options()))
}

pub fn output_rows<T: Serialize + TableRow>(rows: &[T], format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render_rows(rows, format)?);
    Ok(())
}

fn table_options() -> TableOptions {
    let prefs = ui::prefs();
    TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn record_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let rows: Vec<Vec<Cell>> = match serde_json::to_value(value)? {
        Value::Object(map) => map
            .iter()
            .map(|(field, value)| vec![Cell::plain(field.as_str()), Cell::plain(cell_text(value))])
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, value)| vec![Cell::plain((index + 1).to_string()), Cell::plain(cell_text(value))])
            .collect(),
        scalar => vec![vec![Cell::plain("value"), Cell::plain(cell_text(&scalar))]],
    };
    Ok(table::render(&RECORD_COLUMNS, &rows, table_options()))
}

/// Flatten a JSON value into one cell. Lists of ids and tags read as
/// comma-separated text; nested records stay compact JSON.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(text) => text.clone(),
        Value::Array(items) if items.is_empty() => String::from("-"),
        Value::Array(items) if items.iter().all(|item| !item.is_object() && !item.is_array()) => {
            items.iter().map(cell_text).collect::<Vec<_>>().join(", ")
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use porter_core::entities::Issue;
    use porter_core::seed;
    use serde::Serialize;

    use super::{render, render_rows};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Deleted {
        deleted: &'static str,
        linked_email_ids: Vec<&'static str>,
        email_id: Option<&'static str>,
    }

    fn deleted() -> Deleted {
        Deleted {
            deleted: "ISS-2024-004",
            linked_email_ids: vec!["EML-2024-001", "EML-2024-003"],
            email_id: None,
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&deleted(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["deleted"], "ISS-2024-004");
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&deleted(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
        assert!(out.starts_with('{'));
    }

    #[test]
    fn record_table_lists_fields() {
        let out = render(&deleted(), OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().expect("header line");
        assert!(header.starts_with("field"));
        assert!(out.contains("EML-2024-001, EML-2024-003"));
        assert!(!out.contains("null"));
    }

    #[test]
    fn issue_rows_use_issue_columns() {
        let issues = seed::issues();
        let out = render_rows(&issues, OutputFormat::Table).expect("table render should work");
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), issues.len() + 2);
        for header in ["id", "title", "status", "priority", "category", "updated", "emails"] {
            assert!(lines[0].contains(header), "missing column {header}");
        }
        assert!(lines[2].starts_with("ISS-2024-001"));
        assert!(lines[2].contains("Not started"));
    }

    #[test]
    fn issue_rows_render_as_json_array_outside_tables() {
        let issues = seed::issues();
        let out = render_rows(&issues, OutputFormat::Raw).expect("raw render should work");
        let parsed: Vec<Issue> = serde_json::from_str(&out).expect("issues should parse");
        assert_eq!(parsed, issues);
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let rows: Vec<Issue> = Vec::new();
        let out = render_rows(&rows, OutputFormat::Table).expect("table render should work");
        assert_eq!(out, "(no rows)");
    }
}
