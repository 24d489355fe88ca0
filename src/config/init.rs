use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use super::{ensure_config_dir, get_config_path};

const STARTER_CONFIG: &str = "\
# smartprocure configuration
#
# Dataset source: \"demo\", \"file:<path>\" or \"url:<https://...>\"
# The CSV needs the columns: Supplier,Cost,Quality,Delivery,Risk
source: demo

# Total demand quantity to allocate across suppliers (100-10000)
total_demand: 1000

# What-if disruption level in percent (0-50)
disruption_level: 10

# Criteria weights, each 0.0-1.0. They do not need to sum to 1.
weights:
  cost: 0.25
  quality: 0.25
  delivery: 0.25
  risk: 0.25

# Negotiation advisor: \"rules\" is deterministic and offline.
# Switch to \"remote\" for an LLM-backed advisor; set SMARTPROCURE_API_KEY
# or you will be prompted for a key.
advisor:
  kind: rules
  # endpoint: https://api.openai.com/v1
  # model: gpt-4o-mini
";

/// Write a commented starter config and return its path.
/// Refuses to overwrite an existing file unless `force` is set.
pub fn init_config(path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
    let config_path = match path {
        Some(p) => p,
        None => {
            ensure_config_dir()?;
            get_config_path()
        }
    };

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, STARTER_CONFIG)
        .with_context(|| format!("Failed to write config file at {}", config_path.display()))?;

    Ok(config_path)
}
