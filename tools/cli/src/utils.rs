use std::io::IsTerminal;

use anyhow::Result;
use gasless_payroll_cli::OutputFormat;
use serde::Serialize;

/// Serializes `value` for the json and yaml formats. Returns `None` for
/// table output, which each command renders itself.
pub fn render_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<Option<String>> {
    match format {
        OutputFormat::Table => Ok(None),
        OutputFormat::Json => Ok(Some(serde_json::to_string_pretty(value)?)),
        OutputFormat::Yaml => Ok(Some(serde_yaml::to_string(value)?)),
    }
}

fn border(widths: &[usize], left: &str, mid: &str, right: &str) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}", left, segments.join(mid), right)
}

fn row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!(" {:<width$} ", cell, width = width))
        .collect();
    format!("│{}│", padded.join("│"))
}

pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return "No data to display".to_string();
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for cells in rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut lines = vec![
        border(&widths, "┌", "┬", "┐"),
        row(&header_cells, &widths),
        border(&widths, "├", "┼", "┤"),
    ];
    lines.extend(rows.iter().map(|cells| row(cells, &widths)));
    lines.push(border(&widths, "└", "┴", "┘"));
    lines.join("\n")
}

/// Colors a claim status when stdout is a terminal.
pub fn colorize_status(status: &str) -> String {
    if !std::io::stdout().is_terminal() {
        return status.to_string();
    }
    match status {
        "claimable" | "gasless" => format!("\x1b[32m{}\x1b[0m", status),
        "waiting" => format!("\x1b[33m{}\x1b[0m", status),
        "inactive" | "paid gas" => format!("\x1b[90m{}\x1b[0m", status),
        _ => status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_table() {
        let table = format_table(
            &["Wallet", "Salary"],
            &[vec!["0xA".to_string(), "500".to_string()]],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "┌────────┬────────┐");
        assert_eq!(lines[1], "│ Wallet │ Salary │");
        assert_eq!(lines[3], "│ 0xA    │ 500    │");
        assert_eq!(lines[4], "└────────┴────────┘");
    }

    #[test]
    fn test_format_table_empty() {
        assert_eq!(format_table(&["A"], &[]), "No data to display");
    }

    #[test]
    fn test_render_structured() {
        let value = serde_json::json!({ "balance": 5 });
        assert!(render_structured(&value, OutputFormat::Table).unwrap().is_none());
        assert!(render_structured(&value, OutputFormat::Json)
            .unwrap()
            .unwrap()
            .contains("\"balance\": 5"));
        assert_eq!(
            render_structured(&value, OutputFormat::Yaml).unwrap().unwrap(),
            "balance: 5\n"
        );
    }
}
