pub mod remote;
pub mod rules;

pub use remote::RemoteAdvisor;
pub use rules::RuleBasedAdvisor;

use anyhow::Result;

/// What the analyst is negotiating.
#[derive(Debug, Clone, PartialEq)]
pub struct NegotiationRequest {
    pub supplier: String,
    pub offer_price: f64,
    pub target_price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Counter,
}

impl Decision {
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Accept => "Accept Offer",
            Decision::Counter => "Counter Offer",
        }
    }
}

/// Advisor output: a decision plus free-text strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub decision: Decision,
    pub strategy: String,
}

/// Seam between the sourcing desk and whatever produces negotiation advice.
///
/// The scoring engine never calls an advisor; it only supplies the ranked
/// supplier list the caller picks a negotiation target from.
pub trait Advisor {
    fn advise(
        &self,
        request: &NegotiationRequest,
    ) -> impl std::future::Future<Output = Result<Recommendation>> + Send;
}

/// The advisor selected by configuration. Rule-based is the offline default;
/// remote calls out to a chat-completions endpoint.
pub enum ConfiguredAdvisor {
    Rules(RuleBasedAdvisor),
    Remote(RemoteAdvisor),
}

impl ConfiguredAdvisor {
    pub async fn advise(&self, request: &NegotiationRequest) -> Result<Recommendation> {
        match self {
            ConfiguredAdvisor::Rules(advisor) => advisor.advise(request).await,
            ConfiguredAdvisor::Remote(advisor) => advisor.advise(request).await,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            ConfiguredAdvisor::Rules(_) => "rule-based advisor",
            ConfiguredAdvisor::Remote(_) => "remote advisor",
        }
    }
}
