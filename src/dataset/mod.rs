pub mod fetch;
pub mod parse;

pub use fetch::fetch_csv;
pub use parse::{demo_table, parse_csv};

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::engine::SupplierRecord;

/// Where the supplier KPI table comes from.
///
/// The engine never sees raw bytes; whatever the source, rows go through
/// [`parse_csv`] (except the demo fixture) and then the engine's `validate`.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// Built-in four-supplier fixture, useful without any setup.
    Demo,
    /// Local CSV file with columns Supplier,Cost,Quality,Delivery,Risk.
    File(PathBuf),
    /// Remote CSV fetched over HTTPS.
    Url(String),
}

impl DataSource {
    /// Parse a source spec: "demo", "file:<path>", "url:<https://...>",
    /// or a bare path / https URL.
    pub fn parse(spec: &str) -> Result<Self> {
        let spec = spec.trim();
        if spec.eq_ignore_ascii_case("demo") {
            return Ok(DataSource::Demo);
        }
        if let Some(path) = spec.strip_prefix("file:") {
            return Ok(DataSource::File(PathBuf::from(path)));
        }
        if let Some(url) = spec.strip_prefix("url:") {
            anyhow::ensure!(
                url.starts_with("http://") || url.starts_with("https://"),
                "Data source URL must start with http:// or https://: {}",
                url
            );
            return Ok(DataSource::Url(url.to_string()));
        }
        if spec.starts_with("http://") || spec.starts_with("https://") {
            return Ok(DataSource::Url(spec.to_string()));
        }
        if spec.is_empty() {
            anyhow::bail!("Data source is empty. Use 'demo', 'file:<path>' or 'url:<https://...>'");
        }
        Ok(DataSource::File(PathBuf::from(spec)))
    }

    pub fn describe(&self) -> String {
        match self {
            DataSource::Demo => "built-in demo dataset".to_string(),
            DataSource::File(path) => format!("file {}", path.display()),
            DataSource::Url(url) => format!("url {}", url),
        }
    }
}

/// Load candidate supplier rows from a source.
///
/// Rows returned here are unvalidated; callers must pass them through
/// `engine::validate` before scoring.
pub async fn load(source: &DataSource) -> Result<Vec<SupplierRecord>> {
    match source {
        DataSource::Demo => Ok(demo_table()),
        DataSource::File(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read dataset file {}", path.display()))?;
            parse_csv(&content)
                .with_context(|| format!("Failed to parse dataset file {}", path.display()))
        }
        DataSource::Url(url) => {
            let content = fetch_csv(url).await?;
            parse_csv(&content).with_context(|| format!("Failed to parse dataset from {}", url))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_demo_spec() {
        assert_eq!(DataSource::parse("demo").unwrap(), DataSource::Demo);
        assert_eq!(DataSource::parse("DEMO").unwrap(), DataSource::Demo);
    }

    #[test]
    fn test_parse_file_spec() {
        assert_eq!(
            DataSource::parse("file:suppliers.csv").unwrap(),
            DataSource::File(PathBuf::from("suppliers.csv"))
        );
        // Bare paths are treated as files
        assert_eq!(
            DataSource::parse("data/kpi.csv").unwrap(),
            DataSource::File(PathBuf::from("data/kpi.csv"))
        );
    }

    #[test]
    fn test_parse_url_spec() {
        assert_eq!(
            DataSource::parse("url:https://example.com/kpi.csv").unwrap(),
            DataSource::Url("https://example.com/kpi.csv".to_string())
        );
        assert_eq!(
            DataSource::parse("https://example.com/kpi.csv").unwrap(),
            DataSource::Url("https://example.com/kpi.csv".to_string())
        );
    }

    #[test]
    fn test_parse_bad_url_spec() {
        assert!(DataSource::parse("url:ftp://example.com/kpi.csv").is_err());
        assert!(DataSource::parse("").is_err());
    }
}
