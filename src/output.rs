use crate::error::OutputError;
use crate::types::CountryYearMatrix;
use crate::util::format_opt;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};
use tracing::info;

fn io_error(path: &Path, source: std::io::Error) -> OutputError {
    OutputError::Io {
        path: path.display().to_string(),
        source,
    }
}

pub fn ensure_dir(dir: &Path) -> Result<(), OutputError> {
    fs::create_dir_all(dir).map_err(|e| io_error(dir, e))
}

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), OutputError> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush().map_err(|e| io_error(path, e))?;
    info!(path = %path.display(), rows = rows.len(), "dataset exported");
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), OutputError> {
    let s = serde_json::to_string_pretty(value)?;
    fs::write(path, s).map_err(|e| io_error(path, e))?;
    info!(path = %path.display(), "summary written");
    Ok(())
}

/// Print a titled markdown preview of the first `max_rows` rows.
pub fn preview_table<T: Tabled>(title: &str, note: Option<&str>, rows: &[T], max_rows: usize) {
    println!("{}", title);
    if let Some(n) = note {
        println!("({})", n);
    }
    println!();
    preview_table_rows(rows, max_rows);
}

pub fn preview_table_rows<T: Tabled>(rows: &[T], max_rows: usize) {
    match render_preview(rows, max_rows) {
        Some(table) => println!("{}\n", table),
        None => println!("(no rows)\n"),
    }
}

/// Markdown table of the first `max_rows` rows, or `None` when there is
/// nothing to show.
pub fn render_preview<T: Tabled>(rows: &[T], max_rows: usize) -> Option<String> {
    if rows.is_empty() || max_rows == 0 {
        return None;
    }
    Some(Table::new(rows.iter().take(max_rows)).with(Style::markdown()).to_string())
}

/// Markdown preview of a matrix; values shown with one decimal.
pub fn preview_matrix(title: &str, matrix: &CountryYearMatrix, max_rows: usize) {
    println!("{}\n", title);
    if matrix.rows.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let mut builder = tabled::builder::Builder::default();
    let mut header = vec!["Country".to_string()];
    header.extend(matrix.years.iter().map(|y| y.to_string()));
    builder.push_record(header);
    for row in matrix.rows.iter().take(max_rows) {
        let mut record = vec![row.country.clone()];
        record.extend(row.values.iter().map(|v| format_opt(*v, 1)));
        builder.push_record(record);
    }
    let table_str = builder.build().with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

/// Print `label: value (detail)` lines for the insight block.
pub fn print_metric(label: &str, value: &str, detail: Option<&str>) {
    match detail {
        Some(d) => println!("- {}: {} ({})", label, value, d),
        None => println!("- {}: {}", label, value),
    }
}
