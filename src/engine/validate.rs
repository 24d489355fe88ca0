use std::collections::HashSet;

use super::error::ValidationError;
use super::types::SupplierRecord;

/// Validate a candidate supplier table before it enters the scoring pipeline.
///
/// Scoring divides by `cost` and `risk`, so anything that would make those
/// divisions unsafe is rejected here and the scoring stage itself has no
/// error path.
///
/// Returns the first offending row; the config layer is the place that
/// collects many errors at once, the engine fails fast.
pub fn validate(rows: &[SupplierRecord]) -> Result<(), ValidationError> {
    if rows.is_empty() {
        return Err(ValidationError::EmptyTable);
    }

    let mut seen = HashSet::new();
    for (row, record) in rows.iter().enumerate() {
        let name = record.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName { row });
        }
        if !seen.insert(name.to_string()) {
            return Err(ValidationError::DuplicateName {
                row,
                name: name.to_string(),
            });
        }
        if !(record.cost > 0.0) {
            return Err(ValidationError::NonPositiveCost {
                row,
                name: name.to_string(),
                value: record.cost,
            });
        }
        if !(0.0..=1.0).contains(&record.quality) {
            return Err(ValidationError::QualityOutOfRange {
                row,
                name: name.to_string(),
                value: record.quality,
            });
        }
        if !(0.0..=1.0).contains(&record.delivery) {
            return Err(ValidationError::DeliveryOutOfRange {
                row,
                name: name.to_string(),
                value: record.delivery,
            });
        }
        if !(record.risk > 0.0 && record.risk <= 1.0) {
            return Err(ValidationError::RiskOutOfRange {
                row,
                name: name.to_string(),
                value: record.risk,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> SupplierRecord {
        SupplierRecord {
            name: name.to_string(),
            cost: 95.0,
            quality: 0.92,
            delivery: 0.95,
            risk: 0.15,
        }
    }

    #[test]
    fn test_valid_table_passes() {
        let rows = vec![record("Alpha"), record("Beta")];
        assert!(validate(&rows).is_ok());
    }

    #[test]
    fn test_empty_table_rejected() {
        assert_eq!(validate(&[]), Err(ValidationError::EmptyTable));
    }

    #[test]
    fn test_empty_name_rejected() {
        let rows = vec![record("Alpha"), record("  ")];
        assert_eq!(validate(&rows), Err(ValidationError::EmptyName { row: 1 }));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let rows = vec![record("Alpha"), record("Beta"), record("Alpha")];
        assert_eq!(
            validate(&rows),
            Err(ValidationError::DuplicateName {
                row: 2,
                name: "Alpha".to_string()
            })
        );
    }

    #[test]
    fn test_zero_cost_rejected() {
        // Must fail here, never reach scoring and divide by zero
        let mut bad = record("Alpha");
        bad.cost = 0.0;
        let result = validate(&[bad]);
        assert!(matches!(
            result,
            Err(ValidationError::NonPositiveCost { row: 0, .. })
        ));
    }

    #[test]
    fn test_negative_cost_rejected() {
        let mut bad = record("Alpha");
        bad.cost = -3.5;
        assert!(matches!(
            validate(&[bad]),
            Err(ValidationError::NonPositiveCost { .. })
        ));
    }

    #[test]
    fn test_nan_cost_rejected() {
        let mut bad = record("Alpha");
        bad.cost = f64::NAN;
        assert!(matches!(
            validate(&[bad]),
            Err(ValidationError::NonPositiveCost { .. })
        ));
    }

    #[test]
    fn test_quality_out_of_range_rejected() {
        let mut bad = record("Alpha");
        bad.quality = 1.2;
        assert!(matches!(
            validate(&[bad]),
            Err(ValidationError::QualityOutOfRange { .. })
        ));
    }

    #[test]
    fn test_delivery_out_of_range_rejected() {
        let mut bad = record("Alpha");
        bad.delivery = -0.1;
        assert!(matches!(
            validate(&[bad]),
            Err(ValidationError::DeliveryOutOfRange { .. })
        ));
    }

    #[test]
    fn test_zero_risk_rejected() {
        // Risk is a divisor in the scoring formula
        let mut bad = record("Alpha");
        bad.risk = 0.0;
        assert!(matches!(
            validate(&[bad]),
            Err(ValidationError::RiskOutOfRange { .. })
        ));
    }

    #[test]
    fn test_risk_above_one_rejected() {
        let mut bad = record("Alpha");
        bad.risk = 1.5;
        assert!(matches!(
            validate(&[bad]),
            Err(ValidationError::RiskOutOfRange { .. })
        ));
    }

    #[test]
    fn test_boundary_values_accepted() {
        let mut edge = record("Edge");
        edge.quality = 0.0;
        edge.delivery = 1.0;
        edge.risk = 1.0;
        assert!(validate(&[edge]).is_ok());
    }
}
