use anyhow::Result;

use super::{Advisor, Decision, NegotiationRequest, Recommendation};

/// Deterministic two-branch negotiation rule: an offer at or under the
/// target is accepted, anything above draws a counter at the target price.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedAdvisor;

impl RuleBasedAdvisor {
    /// Synchronous core, shared with the remote advisor's fallback path.
    pub fn decide(request: &NegotiationRequest) -> Recommendation {
        if request.offer_price <= request.target_price {
            Recommendation {
                decision: Decision::Accept,
                strategy: "Proceed with long-term contract and volume commitment.".to_string(),
            }
        } else {
            Recommendation {
                decision: Decision::Counter,
                strategy: format!(
                    "Propose {:.2} with extended contract tenure and demand assurance.",
                    request.target_price
                ),
            }
        }
    }
}

impl Advisor for RuleBasedAdvisor {
    async fn advise(&self, request: &NegotiationRequest) -> Result<Recommendation> {
        Ok(Self::decide(request))
    }
}
