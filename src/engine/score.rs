use super::types::{SupplierRecord, Weights};

/// A supplier with its computed multi-criteria score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSupplier {
    pub record: SupplierRecord,
    pub score: f64,
}

/// Score every row of a validated table against a weight vector.
///
/// `score = w_cost * (1/cost) + w_quality * quality
///        + w_delivery * delivery + w_risk * (1/risk)`
///
/// Lower cost and lower risk raise the score because those two criteria
/// enter as reciprocals. Output preserves input order; the only reason the
/// divisions are safe is that [`super::validate`] has already excluded
/// zero and negative `cost`/`risk`.
pub fn score(table: &[SupplierRecord], weights: &Weights) -> Vec<ScoredSupplier> {
    table
        .iter()
        .map(|record| {
            let score = weights.cost * (1.0 / record.cost)
                + weights.quality * record.quality
                + weights.delivery * record.delivery
                + weights.risk * (1.0 / record.risk);
            ScoredSupplier {
                record: record.clone(),
                score,
            }
        })
        .collect()
}

/// Sort scored suppliers by score, highest first.
///
/// `Vec::sort_by` is stable, so exact ties keep their input order.
pub fn rank(mut scored: Vec<ScoredSupplier>) -> Vec<ScoredSupplier> {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored
}
