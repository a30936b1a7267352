//! Recommendation text: an optional external provider with a rule-based fallback.
//!
//! The provider is injected explicitly. A [`Recommender`] without one is the
//! "not configured" state and always produces rule-based text.

pub mod fallback;
#[cfg(feature = "llm")]
pub mod openai;
pub mod prompt;
mod provider;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::RecommendationConfig;
use crate::engine::roi::{ControlSettings, RoiResult};

pub use fallback::fallback_text;
pub use prompt::{RecommendationPrompt, build_prompt};
pub use provider::{ProviderError, RecommendationProvider};

/// Default bound on a single external call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Which path produced the recommendation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationSource {
    /// Text came from the external provider.
    External,
    /// Text came from the deterministic formatter.
    RuleBased,
}

impl RecommendationSource {
    /// Wire tag, as serialized.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::External => "external",
            Self::RuleBased => "rule-based",
        }
    }
}

/// Generated text and its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    /// Narrative text shown to the user.
    pub text: String,
    /// Path that produced `text`.
    pub source: RecommendationSource,
}

impl Recommendation {
    fn rule_based(roi: &RoiResult, controls: &ControlSettings) -> Self {
        Self {
            text: fallback_text(roi, controls),
            source: RecommendationSource::RuleBased,
        }
    }
}

/// Produces recommendation text with at most one bounded external attempt.
#[derive(Clone)]
pub struct Recommender {
    provider: Option<Arc<dyn RecommendationProvider>>,
    timeout: Duration,
}

impl Recommender {
    /// A recommender with no external provider.
    pub fn rule_based() -> Self {
        Self {
            provider: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// A recommender that tries `provider` once, bounded by `timeout`.
    pub fn with_provider(provider: Arc<dyn RecommendationProvider>, timeout: Duration) -> Self {
        Self {
            provider: Some(provider),
            timeout,
        }
    }

    /// Whether an external provider is configured.
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Generates text for `roi` and `controls`.
    ///
    /// Any provider error, timeout, or empty response falls back to
    /// [`fallback_text`]; the returned source reflects the path taken.
    /// `company_name` only appears in the prompt.
    pub async fn recommend(
        &self,
        company_name: &str,
        roi: &RoiResult,
        controls: &ControlSettings,
    ) -> Recommendation {
        let Some(provider) = &self.provider else {
            return Recommendation::rule_based(roi, controls);
        };

        let prompt = build_prompt(company_name, roi, controls);
        let outcome = match tokio::time::timeout(self.timeout, provider.complete(&prompt)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(self.timeout)),
        };

        match outcome {
            Ok(text) if !text.trim().is_empty() => {
                tracing::info!(provider = provider.name(), "external recommendation generated");
                Recommendation {
                    text,
                    source: RecommendationSource::External,
                }
            }
            Ok(_) => {
                tracing::warn!(
                    provider = provider.name(),
                    "provider returned empty text, falling back to rule-based"
                );
                Recommendation::rule_based(roi, controls)
            }
            Err(err) => {
                tracing::warn!(
                    provider = provider.name(),
                    error = %err,
                    "provider failed, falling back to rule-based"
                );
                Recommendation::rule_based(roi, controls)
            }
        }
    }
}

/// Builds the recommender described by `cfg`.
///
/// `api_key` is the value of `cfg.api_key_env`, read by the caller. An
/// `"openai"` provider without a key, or in a build without the `llm`
/// feature, degrades to rule-based text with a warning.
pub fn from_config(cfg: &RecommendationConfig, api_key: Option<String>) -> Recommender {
    if cfg.provider != "openai" {
        return Recommender::rule_based();
    }
    let timeout = Duration::from_secs(cfg.timeout_secs);
    let Some(api_key) = api_key.filter(|k| !k.trim().is_empty()) else {
        tracing::warn!(
            env = %cfg.api_key_env,
            "no API key set, using rule-based recommendations"
        );
        return Recommender::rule_based();
    };

    external(cfg, api_key, timeout)
}

#[cfg(feature = "llm")]
fn external(cfg: &RecommendationConfig, api_key: String, timeout: Duration) -> Recommender {
    let config = openai::OpenAiConfig {
        api_key,
        base_url: cfg.base_url.clone(),
        model: cfg.model.clone(),
        timeout,
    };
    match openai::OpenAiProvider::new(config) {
        Ok(provider) => Recommender::with_provider(Arc::new(provider), timeout),
        Err(err) => {
            tracing::warn!(error = %err, "openai provider unavailable, using rule-based recommendations");
            Recommender::rule_based()
        }
    }
}

#[cfg(not(feature = "llm"))]
fn external(_cfg: &RecommendationConfig, _api_key: String, _timeout: Duration) -> Recommender {
    tracing::warn!("built without the `llm` feature, using rule-based recommendations");
    Recommender::rule_based()
}

impl Default for Recommender {
    fn default() -> Self {
        Self::rule_based()
    }
}
