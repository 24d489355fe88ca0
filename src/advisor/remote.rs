use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use serde_json::json;
use tokio_retry::{strategy::ExponentialBackoff, Retry};

use super::rules::RuleBasedAdvisor;
use super::{Advisor, Decision, NegotiationRequest, Recommendation};

/// Negotiation advisor backed by an OpenAI-compatible chat-completions
/// endpoint. Endpoint, model and key come from configuration; nothing here
/// is hard-coded into the scoring engine.
pub struct RemoteAdvisor {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl RemoteAdvisor {
    pub fn new(endpoint: String, model: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            model,
            api_key,
        }
    }

    fn build_prompt(request: &NegotiationRequest) -> String {
        format!(
            "You are a procurement negotiation assistant. Supplier '{}' offered \
             a unit price of {:.2}; our target price is {:.2}. Reply with one \
             word, ACCEPT or COUNTER, on the first line, then a short \
             negotiation strategy on the next line.",
            request.supplier, request.offer_price, request.target_price
        )
    }

    /// Parse the model reply into a recommendation. A reply that names no
    /// decision falls back to the deterministic rule for the decision while
    /// keeping the model's strategy text.
    fn parse_reply(request: &NegotiationRequest, reply: &str) -> Recommendation {
        let mut lines = reply.trim().lines();
        let first = lines.next().unwrap_or("").trim().to_ascii_uppercase();

        let decision = if first.starts_with("ACCEPT") {
            Some(Decision::Accept)
        } else if first.starts_with("COUNTER") {
            Some(Decision::Counter)
        } else {
            None
        };

        let strategy: String = lines.collect::<Vec<_>>().join("\n").trim().to_string();

        match decision {
            Some(decision) if !strategy.is_empty() => Recommendation { decision, strategy },
            Some(decision) => Recommendation {
                decision,
                strategy: RuleBasedAdvisor::decide(request).strategy,
            },
            None => {
                let fallback = RuleBasedAdvisor::decide(request);
                let strategy = if reply.trim().is_empty() {
                    fallback.strategy
                } else {
                    reply.trim().to_string()
                };
                Recommendation {
                    decision: fallback.decision,
                    strategy,
                }
            }
        }
    }

    async fn call_endpoint(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.endpoint.trim_end_matches('/'));
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| anyhow!("Advisor request to {} failed: {}", url, e))?;

        let status = response.status().as_u16();
        match status {
            200 => {}
            401 | 403 => {
                return Err(anyhow!(
                    "Advisor API rejected the key (HTTP {}). Check SMARTPROCURE_API_KEY.",
                    status
                ))
            }
            429 => {
                return Err(anyhow!(
                    "Advisor API rate limit exceeded. Wait a moment and try again."
                ))
            }
            _ => return Err(anyhow!("Advisor API error: HTTP {}", status)),
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("Advisor API returned an unexpected response shape")?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| anyhow!("Advisor API returned no choices"))
    }
}

impl Advisor for RemoteAdvisor {
    async fn advise(&self, request: &NegotiationRequest) -> Result<Recommendation> {
        let prompt = Self::build_prompt(request);

        let retry_strategy = ExponentialBackoff::from_millis(200)
            .max_delay(std::time::Duration::from_secs(5))
            .take(3);

        let reply = Retry::spawn(retry_strategy, || self.call_endpoint(&prompt)).await?;

        Ok(Self::parse_reply(request, &reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> NegotiationRequest {
        NegotiationRequest {
            supplier: "Alpha".to_string(),
            offer_price: 100.0,
            target_price: 90.0,
        }
    }

    #[test]
    fn test_prompt_names_supplier_and_prices() {
        let prompt = RemoteAdvisor::build_prompt(&request());
        assert!(prompt.contains("Alpha"));
        assert!(prompt.contains("100.00"));
        assert!(prompt.contains("90.00"));
    }

    #[test]
    fn test_parse_accept_reply() {
        let rec = RemoteAdvisor::parse_reply(&request(), "ACCEPT\nLock in a two-year contract.");
        assert_eq!(rec.decision, Decision::Accept);
        assert_eq!(rec.strategy, "Lock in a two-year contract.");
    }

    #[test]
    fn test_parse_counter_reply() {
        let rec = RemoteAdvisor::parse_reply(&request(), "counter\nPush back to 90.");
        assert_eq!(rec.decision, Decision::Counter);
        assert_eq!(rec.strategy, "Push back to 90.");
    }

    #[test]
    fn test_parse_reply_without_decision_falls_back_to_rule() {
        // Offer above target, so the rule says Counter
        let rec = RemoteAdvisor::parse_reply(&request(), "Try splitting the volume.");
        assert_eq!(rec.decision, Decision::Counter);
        assert_eq!(rec.strategy, "Try splitting the volume.");
    }

    #[test]
    fn test_parse_empty_reply_falls_back_entirely() {
        let rec = RemoteAdvisor::parse_reply(&request(), "  ");
        let rule = RuleBasedAdvisor::decide(&request());
        assert_eq!(rec, rule);
    }

    #[test]
    fn test_parse_decision_only_reply_uses_rule_strategy() {
        let rec = RemoteAdvisor::parse_reply(&request(), "ACCEPT");
        assert_eq!(rec.decision, Decision::Accept);
        assert!(!rec.strategy.is_empty());
    }
}
