use rand::Rng;

use super::score::ScoredSupplier;

/// Bounds of the placeholder disruption forecast.
pub const DISRUPTION_MIN: f64 = 0.05;
pub const DISRUPTION_MAX: f64 = 0.30;

/// Draw a disruption probability per supplier, uniform in [0.05, 0.30].
///
/// This is an explicit stand-in for a predictive model that was never built:
/// the draw is independent of the record. The RNG is injected so callers and
/// tests control the source; there is no hidden global generator.
///
/// Output is aligned with the input table.
pub fn forecast_disruption<R: Rng + ?Sized>(ranked: &[ScoredSupplier], rng: &mut R) -> Vec<f64> {
    ranked
        .iter()
        .map(|_| rng.gen_range(DISRUPTION_MIN..=DISRUPTION_MAX))
        .collect()
}

/// Adjust each supplier's risk for a what-if disruption scenario.
///
/// `adjusted_risk = risk * (1 + level_percent / 100)`. The slider domain is
/// [0, 50] but the formula is well-defined for any non-negative level, so no
/// clamping happens here. Pure function, aligned with the input table.
pub fn simulate_disruption(ranked: &[ScoredSupplier], level_percent: f64) -> Vec<f64> {
    ranked
        .iter()
        .map(|s| s.record.risk * (1.0 + level_percent / 100.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{SupplierRecord, Weights};
    use crate::engine::{rank, score};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ranked_demo() -> Vec<ScoredSupplier> {
        let table = vec![
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
        ];
        rank(score(&table, &Weights::default()))
    }

    #[test]
    fn test_forecast_within_bounds_over_many_draws() {
        let ranked = ranked_demo();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..5_000 {
            // 5000 iterations x 2 suppliers = 10000 draws
            for p in forecast_disruption(&ranked, &mut rng) {
                assert!((DISRUPTION_MIN..=DISRUPTION_MAX).contains(&p));
            }
        }
    }

    #[test]
    fn test_forecast_is_reproducible_with_seeded_rng() {
        let ranked = ranked_demo();
        let a = forecast_disruption(&ranked, &mut StdRng::seed_from_u64(7));
        let b = forecast_disruption(&ranked, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_forecast_one_draw_per_supplier() {
        let ranked = ranked_demo();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(forecast_disruption(&ranked, &mut rng).len(), ranked.len());
    }

    #[test]
    fn test_zero_level_leaves_risk_unchanged() {
        let ranked = ranked_demo();
        let adjusted = simulate_disruption(&ranked, 0.0);
        for (supplier, risk) in ranked.iter().zip(&adjusted) {
            assert_eq!(*risk, supplier.record.risk);
        }
    }

    #[test]
    fn test_adjusted_risk_scales_linearly() {
        let ranked = ranked_demo();
        let at_10 = simulate_disruption(&ranked, 10.0);
        let at_50 = simulate_disruption(&ranked, 50.0);
        for ((supplier, a), b) in ranked.iter().zip(&at_10).zip(&at_50) {
            assert!((a - supplier.record.risk * 1.1).abs() < 1e-12);
            assert!((b - supplier.record.risk * 1.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_simulate_accepts_levels_beyond_slider_domain() {
        let ranked = ranked_demo();
        let adjusted = simulate_disruption(&ranked, 120.0);
        for (supplier, risk) in ranked.iter().zip(&adjusted) {
            assert!((risk - supplier.record.risk * 2.2).abs() < 1e-12);
        }
    }
}
