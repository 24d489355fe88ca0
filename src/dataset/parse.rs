use anyhow::{bail, Context, Result};

use crate::engine::SupplierRecord;

/// Expected CSV column order.
const COLUMNS: [&str; 5] = ["Supplier", "Cost", "Quality", "Delivery", "Risk"];

/// Parse a supplier KPI CSV into candidate rows.
///
/// Accepts an optional header line (detected by the first field matching
/// "Supplier", case-insensitive). Blank lines are skipped. Errors carry the
/// 1-based line number of the offending row. No domain validation happens
/// here; that is the engine's `validate` contract.
pub fn parse_csv(content: &str) -> Result<Vec<SupplierRecord>> {
    let mut rows = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();

        // Header detection, first non-empty line only
        if rows.is_empty() && fields[0].eq_ignore_ascii_case(COLUMNS[0]) {
            continue;
        }

        if fields.len() != COLUMNS.len() {
            bail!(
                "line {}: expected {} columns ({}), got {}",
                line_no,
                COLUMNS.len(),
                COLUMNS.join(","),
                fields.len()
            );
        }

        let record = SupplierRecord {
            name: fields[0].to_string(),
            cost: parse_field(fields[1], "Cost", line_no)?,
            quality: parse_field(fields[2], "Quality", line_no)?,
            delivery: parse_field(fields[3], "Delivery", line_no)?,
            risk: parse_field(fields[4], "Risk", line_no)?,
        };
        rows.push(record);
    }

    Ok(rows)
}

fn parse_field(raw: &str, column: &str, line_no: usize) -> Result<f64> {
    raw.parse::<f64>()
        .with_context(|| format!("line {}: {} is not a number: '{}'", line_no, column, raw))
}

/// The built-in demo dataset: four suppliers with plausible KPIs.
pub fn demo_table() -> Vec<SupplierRecord> {
    vec![
        SupplierRecord {
            name: "Alpha".to_string(),
            cost: 95.0,
            quality: 0.92,
            delivery: 0.95,
            risk: 0.15,
        },
        SupplierRecord {
            name: "Beta".to_string(),
            cost: 102.0,
            quality: 0.89,
            delivery: 0.91,
            risk: 0.25,
        },
        SupplierRecord {
            name: "Gamma".to_string(),
            cost: 98.0,
            quality: 0.94,
            delivery: 0.93,
            risk: 0.18,
        },
        SupplierRecord {
            name: "Delta".to_string(),
            cost: 110.0,
            quality: 0.87,
            delivery: 0.88,
            risk: 0.30,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_header() {
        let csv = "Supplier,Cost,Quality,Delivery,Risk\nAlpha,95,0.92,0.95,0.15\n";
        let rows = parse_csv(csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Alpha");
        assert_eq!(rows[0].cost, 95.0);
        assert_eq!(rows[0].risk, 0.15);
    }

    #[test]
    fn test_parse_without_header() {
        let csv = "Alpha,95,0.92,0.95,0.15\nBeta,102,0.89,0.91,0.25\n";
        let rows = parse_csv(csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].name, "Beta");
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let csv = "Alpha,95,0.92,0.95,0.15\n\n\nBeta,102,0.89,0.91,0.25\n";
        let rows = parse_csv(csv).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let csv = " Alpha , 95 , 0.92 , 0.95 , 0.15 \n";
        let rows = parse_csv(csv).unwrap();
        assert_eq!(rows[0].name, "Alpha");
        assert_eq!(rows[0].quality, 0.92);
    }

    #[test]
    fn test_parse_wrong_column_count() {
        let csv = "Alpha,95,0.92\n";
        let err = parse_csv(csv).unwrap_err().to_string();
        assert!(err.contains("line 1"));
        assert!(err.contains("expected 5 columns"));
    }

    #[test]
    fn test_parse_non_numeric_field() {
        let csv = "Supplier,Cost,Quality,Delivery,Risk\nAlpha,cheap,0.92,0.95,0.15\n";
        let err = format!("{:#}", parse_csv(csv).unwrap_err());
        assert!(err.contains("line 2"));
        assert!(err.contains("Cost"));
    }

    #[test]
    fn test_parse_empty_input_yields_no_rows() {
        // Empty tables are rejected later, by engine::validate
        assert!(parse_csv("").unwrap().is_empty());
        assert!(parse_csv("Supplier,Cost,Quality,Delivery,Risk\n")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_demo_table_shape() {
        let rows = demo_table();
        assert_eq!(rows.len(), 4);
        assert!(crate::engine::validate(&rows).is_ok());
    }
}
