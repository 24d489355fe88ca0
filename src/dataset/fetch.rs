use anyhow::{anyhow, Result};
use tokio_retry::{strategy::ExponentialBackoff, Retry};

/// Fetch a remote supplier KPI CSV.
///
/// Retry strategy: exponential backoff with 3 attempts, matching the rest of
/// the tool's network calls. Errors are mapped to messages an analyst can
/// act on rather than raw reqwest debug output.
pub async fn fetch_csv(url: &str) -> Result<String> {
    let retry_strategy = ExponentialBackoff::from_millis(100)
        .max_delay(std::time::Duration::from_secs(5))
        .take(3);

    let body = Retry::spawn(retry_strategy, || async {
        let response = reqwest::get(url)
            .await
            .map_err(|e| map_request_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status_error(url, status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| anyhow!("Failed to read dataset body from {}: {}", url, e))
    })
    .await?;

    if body.trim().is_empty() {
        return Err(anyhow!("Dataset at {} is empty", url));
    }

    Ok(body)
}

fn map_request_error(url: &str, e: &reqwest::Error) -> anyhow::Error {
    if e.is_timeout() {
        anyhow!("Timed out fetching dataset from {}. Try again later.", url)
    } else if e.is_connect() {
        anyhow!(
            "Could not connect to {}. Check the URL and your network connection.",
            url
        )
    } else {
        anyhow!("Failed to fetch dataset from {}: {}", url, e)
    }
}

fn map_status_error(url: &str, status: u16) -> anyhow::Error {
    match status {
        401 | 403 => anyhow!(
            "Access denied fetching dataset from {} (HTTP {}). The URL may require credentials.",
            url,
            status
        ),
        404 => anyhow!("Dataset not found at {} (HTTP 404). Check the URL.", url),
        500..=599 => anyhow!(
            "Server error fetching dataset from {} (HTTP {}). Try again later.",
            url,
            status
        ),
        _ => anyhow!("Unexpected HTTP {} fetching dataset from {}", status, url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_messages() {
        let url = "https://example.com/kpi.csv";
        assert!(map_status_error(url, 404).to_string().contains("not found"));
        assert!(map_status_error(url, 403)
            .to_string()
            .contains("Access denied"));
        assert!(map_status_error(url, 503)
            .to_string()
            .contains("Server error"));
        assert!(map_status_error(url, 418).to_string().contains("HTTP 418"));
    }
}
