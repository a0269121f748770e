use golive_core::portfolio::SkippedEngagement;
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print `rows` under `headers`, each column padded to its widest cell.
pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<String>| {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:width$}", cell, width = widths.get(i).copied().unwrap_or(0)))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    println!("{}", line(headers.iter().map(|h| h.to_string()).collect()));
    println!("{}", line(widths.iter().map(|&w| "-".repeat(w)).collect()));
    for row in rows {
        println!("{}", line(row));
    }
}

/// Signed day count as shown in tables: `+12`, `-3`, or `-` without a target.
pub fn format_days_ahead(days: Option<i64>) -> String {
    match days {
        Some(d) if d > 0 => format!("+{d}"),
        Some(d) => d.to_string(),
        None => "-".to_string(),
    }
}

/// Non-fatal warning block for engagements left out of a report.
pub fn print_skipped(skipped: &[SkippedEngagement]) {
    if skipped.is_empty() {
        return;
    }
    eprintln!();
    eprintln!("warning: {} engagement(s) skipped", skipped.len());
    for s in skipped {
        eprintln!("  {:<20} {}", s.engagement_id, s.reason);
    }
}
