use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::advisor::{Decision, Recommendation};
use crate::pipeline::SupplierRow;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format an allocation share as a percentage, e.g. "35.4%"
pub fn format_share(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a supplier name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format the ranked table with columns:
/// Index, Supplier, Score, Share, Qty, Disrupt, AdjRisk
pub fn format_supplier_table(rows: &[SupplierRow], use_colors: bool) -> String {
    if rows.is_empty() {
        return "No suppliers to rank.".to_string();
    }

    // Name column shrinks before anything else on narrow terminals
    let name_width = match get_terminal_width() {
        Some(w) if w < 72 => 12,
        _ => 20,
    };

    let header = format!(
        "{:>3} {:<name_width$} {:>7} {:>7} {:>7} {:>8} {:>8}",
        "#",
        "Supplier",
        "Score",
        "Share",
        "Qty",
        "Disrupt",
        "AdjRisk",
        name_width = name_width
    );

    let mut lines = Vec::with_capacity(rows.len() + 1);
    if use_colors {
        lines.push(header.bold().to_string());
    } else {
        lines.push(header);
    }

    for (idx, row) in rows.iter().enumerate() {
        let index_str = format!("{:>2}.", idx + 1);
        let name = truncate_name(&row.record.name, name_width);
        let body = format!(
            "{:<name_width$} {:>7.3} {:>7} {:>7} {:>7.1}% {:>8.3}",
            name,
            row.score,
            format_share(row.allocation_share),
            row.allocated_qty,
            row.disruption_probability * 100.0,
            row.adjusted_risk,
            name_width = name_width
        );

        if use_colors {
            lines.push(format!("{} {}", index_str.dimmed(), body));
        } else {
            lines.push(format!("{} {}", index_str, body));
        }
    }

    lines.join("\n")
}

/// Format a single supplier with detailed multi-line output (for verbose mode)
pub fn format_supplier_detail(row: &SupplierRow, use_colors: bool) -> String {
    if use_colors {
        format!(
            "{}\n  Cost: {:.2}\n  Quality: {:.2}\n  Delivery: {:.2}\n  Risk: {:.2}\n  \
             Score: {:.4}\n  Allocation: {} ({} units)\n  \
             Disruption probability: {:.1}%\n  Adjusted risk: {:.3}",
            row.record.name.bold(),
            row.record.cost,
            row.record.quality,
            row.record.delivery,
            row.record.risk,
            row.score,
            format_share(row.allocation_share).cyan(),
            row.allocated_qty.green(),
            row.disruption_probability * 100.0,
            row.adjusted_risk
        )
    } else {
        format!(
            "{}\n  Cost: {:.2}\n  Quality: {:.2}\n  Delivery: {:.2}\n  Risk: {:.2}\n  \
             Score: {:.4}\n  Allocation: {} ({} units)\n  \
             Disruption probability: {:.1}%\n  Adjusted risk: {:.3}",
            row.record.name,
            row.record.cost,
            row.record.quality,
            row.record.delivery,
            row.record.risk,
            row.score,
            format_share(row.allocation_share),
            row.allocated_qty,
            row.disruption_probability * 100.0,
            row.adjusted_risk
        )
    }
}

/// Format rows as tab-separated values for scripting
/// Columns: supplier, score, share, qty, disruption_probability, adjusted_risk
pub fn format_tsv(rows: &[SupplierRow]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "{}\t{:.6}\t{:.6}\t{}\t{:.6}\t{:.6}",
                row.record.name,
                row.score,
                row.allocation_share,
                row.allocated_qty,
                row.disruption_probability,
                row.adjusted_risk
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a negotiation recommendation for the terminal
pub fn format_recommendation(rec: &Recommendation, use_colors: bool) -> String {
    if use_colors {
        let decision = match rec.decision {
            Decision::Accept => rec.decision.label().green().bold().to_string(),
            Decision::Counter => rec.decision.label().yellow().bold().to_string(),
        };
        format!("Decision: {}\nStrategy: {}", decision, rec.strategy)
    } else {
        format!(
            "Decision: {}\nStrategy: {}",
            rec.decision.label(),
            rec.strategy
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SupplierRecord;

    fn sample_row() -> SupplierRow {
        SupplierRow {
            record: SupplierRecord {
                name: "Alpha".to_string(),
                cost: 95.0,
                quality: 0.92,
                delivery: 0.95,
                risk: 0.15,
            },
            score: 1.7359,
            allocation_share: 0.3541,
            allocated_qty: 354,
            disruption_probability: 0.12,
            adjusted_risk: 0.165,
        }
    }

    #[test]
    fn test_format_share() {
        assert_eq!(format_share(0.3541), "35.4%");
        assert_eq!(format_share(1.0), "100.0%");
        assert_eq!(format_share(0.0), "0.0%");
    }

    #[test]
    fn test_table_empty() {
        assert_eq!(format_supplier_table(&[], false), "No suppliers to rank.");
    }

    #[test]
    fn test_table_single_row() {
        let result = format_supplier_table(&[sample_row()], false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Supplier"));
        assert!(lines[1].contains(" 1."));
        assert!(lines[1].contains("Alpha"));
        assert!(lines[1].contains("354"));
        assert!(lines[1].contains("35.4%"));
    }

    #[test]
    fn test_table_indices_are_sequential() {
        let mut second = sample_row();
        second.record.name = "Beta".to_string();
        let result = format_supplier_table(&[sample_row(), second], false);
        let lines: Vec<&str> = result.lines().collect();
        assert!(lines[1].contains(" 1."));
        assert!(lines[2].contains(" 2."));
    }

    #[test]
    fn test_detail_contains_all_fields() {
        let result = format_supplier_detail(&sample_row(), false);
        assert!(result.contains("Alpha"));
        assert!(result.contains("Cost: 95.00"));
        assert!(result.contains("Score: 1.7359"));
        assert!(result.contains("35.4% (354 units)"));
        assert!(result.contains("Disruption probability: 12.0%"));
        assert!(result.contains("Adjusted risk: 0.165"));
    }

    #[test]
    fn test_tsv_shape() {
        let result = format_tsv(&[sample_row()]);
        let fields: Vec<&str> = result.split('\t').collect();
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[0], "Alpha");
        assert_eq!(fields[3], "354");
    }

    #[test]
    fn test_tsv_empty() {
        assert_eq!(format_tsv(&[]), "");
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Short", 20), "Short");
        assert_eq!(
            truncate_name("A Very Long Supplier Name Inc", 15),
            "A Very Long ..."
        );
        assert_eq!(truncate_name("Alpha", 3), "Alp");
    }

    #[test]
    fn test_format_recommendation() {
        let rec = Recommendation {
            decision: Decision::Counter,
            strategy: "Propose 90.00 with extended contract tenure.".to_string(),
        };
        let result = format_recommendation(&rec, false);
        assert!(result.contains("Decision: Counter Offer"));
        assert!(result.contains("Strategy: Propose 90.00"));
    }
}
