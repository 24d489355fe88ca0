use anyhow::{Context, Result};
use rand::Rng;

use crate::engine::{
    allocate, forecast_disruption, rank, score, simulate_disruption, validate, SupplierRecord,
    Weights,
};

/// One fully derived row of the sourcing dashboard: the supplier plus every
/// value the pipeline computes for it. Rows come back in rank order.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplierRow {
    pub record: SupplierRecord,
    pub score: f64,
    pub allocation_share: f64,
    pub allocated_qty: i64,
    pub disruption_probability: f64,
    pub adjusted_risk: f64,
}

impl SupplierRow {
    pub fn name(&self) -> &str {
        &self.record.name
    }
}

/// Run the whole pipeline over a candidate table:
/// validate, score, rank, allocate, then the two augmentation passes
/// (disruption forecast and what-if risk adjustment).
///
/// Pure apart from the injected RNG; inputs are untouched and the output is
/// a freshly derived table. Invoked in full on every input change, there is
/// no computation state carried between calls.
pub fn compute<R: Rng + ?Sized>(
    table: &[SupplierRecord],
    weights: &Weights,
    total_demand: i64,
    disruption_level: f64,
    rng: &mut R,
) -> Result<Vec<SupplierRow>> {
    validate(table).context("Supplier table failed validation")?;

    let ranked = rank(score(table, weights));
    let allocations = allocate(&ranked, total_demand).context("Demand allocation failed")?;
    let probabilities = forecast_disruption(&ranked, rng);
    let adjusted = simulate_disruption(&ranked, disruption_level);

    Ok(ranked
        .into_iter()
        .zip(allocations)
        .zip(probabilities)
        .zip(adjusted)
        .map(
            |(((scored, allocation), disruption_probability), adjusted_risk)| SupplierRow {
                record: scored.record,
                score: scored.score,
                allocation_share: allocation.share,
                allocated_qty: allocation.qty,
                disruption_probability,
                adjusted_risk,
            },
        )
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::demo_table;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_demo_pipeline_end_to_end() {
        let mut rng = StdRng::seed_from_u64(42);
        let rows = compute(&demo_table(), &Weights::default(), 1000, 10.0, &mut rng).unwrap();

        assert_eq!(rows.len(), 4);
        // Alpha: lowest cost, lowest risk, must rank first
        assert_eq!(rows[0].name(), "Alpha");

        let share_sum: f64 = rows.iter().map(|r| r.allocation_share).sum();
        assert!((share_sum - 1.0).abs() < 1e-9);

        assert!(rows.iter().all(|r| r.allocated_qty >= 0));
        assert!(rows
            .iter()
            .all(|r| (0.05..=0.30).contains(&r.disruption_probability)));
        for row in &rows {
            assert!((row.adjusted_risk - row.record.risk * 1.1).abs() < 1e-12);
        }
    }

    #[test]
    fn test_invalid_table_never_reaches_scoring() {
        let mut table = demo_table();
        table[0].cost = 0.0;
        let mut rng = StdRng::seed_from_u64(0);
        let err = compute(&table, &Weights::default(), 1000, 10.0, &mut rng).unwrap_err();
        assert!(format!("{:#}", err).contains("cost must be positive"));
    }

    #[test]
    fn test_zero_weights_fail_allocation_not_nan() {
        let weights = Weights {
            cost: 0.0,
            quality: 0.0,
            delivery: 0.0,
            risk: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(0);
        let err = compute(&demo_table(), &weights, 1000, 10.0, &mut rng).unwrap_err();
        assert!(format!("{:#}", err).contains("total score across the table is zero"));
    }

    #[test]
    fn test_input_table_is_not_mutated() {
        let table = demo_table();
        let before = table.clone();
        let mut rng = StdRng::seed_from_u64(0);
        let _ = compute(&table, &Weights::default(), 1000, 10.0, &mut rng).unwrap();
        assert_eq!(table, before);
    }

    #[test]
    fn test_recompute_changes_only_the_random_column() {
        let table = demo_table();
        let weights = Weights::default();
        let mut rng = StdRng::seed_from_u64(1);
        let a = compute(&table, &weights, 1000, 10.0, &mut rng).unwrap();
        let b = compute(&table, &weights, 1000, 10.0, &mut rng).unwrap();

        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.record, y.record);
            assert_eq!(x.score, y.score);
            assert_eq!(x.allocation_share, y.allocation_share);
            assert_eq!(x.allocated_qty, y.allocated_qty);
            assert_eq!(x.adjusted_risk, y.adjusted_risk);
        }
    }
}
