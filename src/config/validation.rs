use super::schema::Config;

/// Slider domains of the interactive dashboard. The engine itself is more
/// permissive; these bounds belong to the configuration surface.
const WEIGHT_RANGE: (f64, f64) = (0.0, 1.0);
const DEMAND_RANGE: (i64, i64) = (100, 10_000);
const DISRUPTION_RANGE: (f64, f64) = (0.0, 50.0);

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(weights) = &config.weights {
        for (label, value) in [
            ("cost", weights.cost),
            ("quality", weights.quality),
            ("delivery", weights.delivery),
            ("risk", weights.risk),
        ] {
            if !(WEIGHT_RANGE.0..=WEIGHT_RANGE.1).contains(&value) {
                errors.push(format!(
                    "weights.{}: must be within [{}, {}], got {}",
                    label, WEIGHT_RANGE.0, WEIGHT_RANGE.1, value
                ));
            }
        }
    }

    if let Some(demand) = config.total_demand {
        if !(DEMAND_RANGE.0..=DEMAND_RANGE.1).contains(&demand) {
            errors.push(format!(
                "total_demand: must be within [{}, {}], got {}",
                DEMAND_RANGE.0, DEMAND_RANGE.1, demand
            ));
        }
    }

    if let Some(level) = config.disruption_level {
        if !(DISRUPTION_RANGE.0..=DISRUPTION_RANGE.1).contains(&level) {
            errors.push(format!(
                "disruption_level: must be within [{}, {}], got {}",
                DISRUPTION_RANGE.0, DISRUPTION_RANGE.1, level
            ));
        }
    }

    match config.advisor_kind() {
        "rules" | "remote" => {}
        other => errors.push(format!(
            "advisor.kind: must be 'rules' or 'remote', got '{}'",
            other
        )),
    }

    if config.advisor_kind() == "remote" {
        let endpoint = config.advisor_endpoint();
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            errors.push(format!(
                "advisor.endpoint: must be an http(s) URL, got '{}'",
                endpoint
            ));
        }
        if config.advisor_model().trim().is_empty() {
            errors.push("advisor.model: must not be empty".to_string());
        }
    }

    if let Some(source) = &config.source {
        if let Err(e) = crate::dataset::DataSource::parse(source) {
            errors.push(format!("source: {}", e));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
