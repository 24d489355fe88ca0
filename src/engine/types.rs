use serde::{Deserialize, Serialize};

/// One row of the supplier KPI table.
///
/// `cost` is in currency units per unit; `quality` and `delivery` are rates
/// in [0, 1]; `risk` is a fraction in (0, 1] and is used as a divisor in
/// scoring, so zero is never valid. Domain constraints are enforced by
/// [`crate::engine::validate`], not by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplierRecord {
    pub name: String,
    pub cost: f64,
    pub quality: f64,
    pub delivery: f64,
    pub risk: f64,
}

impl SupplierRecord {
    /// Short display reference, e.g. "Alpha (cost 95.0)"
    pub fn short_ref(&self) -> String {
        format!("{} (cost {:.1})", self.name, self.cost)
    }
}

/// Weight vector for the four scoring criteria.
///
/// Weights are not required to sum to 1 and the scoring formula accepts any
/// real value; the config layer bounds them to [0, 1] to match the dashboard
/// sliders, but the engine stays permissive.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Weights {
    pub cost: f64,
    pub quality: f64,
    pub delivery: f64,
    pub risk: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            cost: 0.25,
            quality: 0.25,
            delivery: 0.25,
            risk: 0.25,
        }
    }
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.cost + self.quality + self.delivery + self.risk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_are_equal() {
        let w = Weights::default();
        assert_eq!(w.cost, 0.25);
        assert_eq!(w.quality, 0.25);
        assert_eq!(w.delivery, 0.25);
        assert_eq!(w.risk, 0.25);
        assert!((w.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_short_ref() {
        let record = SupplierRecord {
            name: "Alpha".to_string(),
            cost: 95.0,
            quality: 0.92,
            delivery: 0.95,
            risk: 0.15,
        };
        assert_eq!(record.short_ref(), "Alpha (cost 95.0)");
    }
}
