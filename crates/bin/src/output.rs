//! Output formatting helpers for human-readable and JSON output.

use serde::Serialize;
use shoplist::ShoppingList;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Human }
    }
}

/// Format rows as a table with aligned columns.
///
/// `headers` and each row in `rows` must have the same length. Returns no lines
/// when there are no rows.
pub fn table_lines(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    if rows.is_empty() {
        return Vec::new();
    }

    // Column width is the widest of the header and every cell
    let col_count = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(col_count) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(pad_row(headers.iter().copied(), &widths));
    for row in rows {
        lines.push(pad_row(row.iter().map(String::as_str), &widths));
    }
    lines
}

fn pad_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Print a table with aligned columns in human-readable format.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    for line in table_lines(headers, rows) {
        println!("{line}");
    }
}

/// Print any serializable value as a single line of JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

/// Print a list's items, or a notice if the list is empty.
pub fn print_list(list: &ShoppingList, format: OutputFormat) -> Result<(), serde_json::Error> {
    match format {
        OutputFormat::Human => {
            if list.is_empty() {
                println!("List '{}' has no items.", list.id);
                return Ok(());
            }
            let rows: Vec<Vec<String>> = list
                .items()
                .iter()
                .map(|item| {
                    vec![
                        item.id.to_string(),
                        item.description.clone(),
                        item.quantity.to_string(),
                        item.position.to_string(),
                    ]
                })
                .collect();
            print_table(&["ID", "DESCRIPTION", "QUANTITY", "POSITION"], &rows);
        }
        OutputFormat::Json => print_json(list)?,
    }
    Ok(())
}
