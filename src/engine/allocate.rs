use super::error::AllocationError;
use super::score::ScoredSupplier;

/// Per-supplier slice of total demand, aligned with the input table.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    /// Fraction of total demand, `score / sum(scores)`. Sums to 1.0 across
    /// the table up to floating-point tolerance.
    pub share: f64,
    /// `share * total_demand` truncated toward zero. Quantities are
    /// truncated independently per row, so the table-wide sum may undershoot
    /// `total_demand`; that rounding artifact is kept on purpose.
    pub qty: i64,
}

/// Split `total_demand` across the table in proportion to score.
///
/// Fails rather than producing NaN shares: an empty table, a zero score sum,
/// or negative demand are all `AllocationError`s.
pub fn allocate(
    ranked: &[ScoredSupplier],
    total_demand: i64,
) -> Result<Vec<Allocation>, AllocationError> {
    if ranked.is_empty() {
        return Err(AllocationError::EmptyTable);
    }
    if total_demand < 0 {
        return Err(AllocationError::NegativeDemand(total_demand));
    }

    let score_sum: f64 = ranked.iter().map(|s| s.score).sum();
    if score_sum == 0.0 || !score_sum.is_finite() {
        return Err(AllocationError::ZeroScoreSum);
    }

    Ok(ranked
        .iter()
        .map(|s| {
            let share = s.score / score_sum;
            let qty = (share * total_demand as f64).trunc() as i64;
            Allocation { share, qty }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::score::{rank, score};
    use crate::engine::types::{SupplierRecord, Weights};

    fn record(name: &str, cost: f64, quality: f64, delivery: f64, risk: f64) -> SupplierRecord {
        SupplierRecord {
            name: name.to_string(),
            cost,
            quality,
            delivery,
            risk,
        }
    }

    fn ranked_demo() -> Vec<ScoredSupplier> {
        let table = vec![
            record("Alpha", 95.0, 0.92, 0.95, 0.15),
            record("Beta", 102.0, 0.89, 0.91, 0.25),
            record("Gamma", 98.0, 0.94, 0.93, 0.18),
            record("Delta", 110.0, 0.87, 0.88, 0.30),
        ];
        rank(score(&table, &Weights::default()))
    }

    #[test]
    fn test_shares_sum_to_one() {
        let allocations = allocate(&ranked_demo(), 1000).unwrap();
        let total: f64 = allocations.iter().map(|a| a.share).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_qty_is_floor_of_share_times_demand() {
        let ranked = ranked_demo();
        let allocations = allocate(&ranked, 1000).unwrap();
        for (supplier, allocation) in ranked.iter().zip(&allocations) {
            let score_sum: f64 = ranked.iter().map(|s| s.score).sum();
            let expected = (supplier.score / score_sum * 1000.0).trunc() as i64;
            assert_eq!(allocation.qty, expected);
        }
    }

    #[test]
    fn test_no_negative_quantities() {
        let allocations = allocate(&ranked_demo(), 1000).unwrap();
        assert!(allocations.iter().all(|a| a.qty >= 0));
    }

    #[test]
    fn test_qty_sum_may_undershoot_demand() {
        // Independent per-row truncation loses up to (rows - 1) units;
        // that undershoot is documented behavior, not a bug
        let allocations = allocate(&ranked_demo(), 1000).unwrap();
        let total: i64 = allocations.iter().map(|a| a.qty).sum();
        assert!(total <= 1000);
        assert!(total >= 1000 - allocations.len() as i64 + 1);
    }

    #[test]
    fn test_empty_table_is_an_error() {
        assert_eq!(allocate(&[], 1000), Err(AllocationError::EmptyTable));
    }

    #[test]
    fn test_zero_score_sum_is_an_error() {
        let zeros = vec![
            ScoredSupplier {
                record: record("Alpha", 95.0, 0.92, 0.95, 0.15),
                score: 0.0,
            },
            ScoredSupplier {
                record: record("Beta", 102.0, 0.89, 0.91, 0.25),
                score: 0.0,
            },
        ];
        assert_eq!(allocate(&zeros, 1000), Err(AllocationError::ZeroScoreSum));
    }

    #[test]
    fn test_negative_demand_is_an_error() {
        assert_eq!(
            allocate(&ranked_demo(), -5),
            Err(AllocationError::NegativeDemand(-5))
        );
    }

    #[test]
    fn test_zero_demand_allocates_zero_everywhere() {
        let allocations = allocate(&ranked_demo(), 0).unwrap();
        assert!(allocations.iter().all(|a| a.qty == 0));
        let total: f64 = allocations.iter().map(|a| a.share).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}
