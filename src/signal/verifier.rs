//! Verification and trend client
//!
//! Wraps a [`GroundedModel`] with the two fixed request shapes LiveSignal
//! uses and the parsing that turns replies into structured results.

use crate::gemini::{GroundedModel, GroundedPrompt};
use crate::signal::error::{DegradedTrend, VerificationFailure};
use crate::signal::parser;
use crate::signal::types::{VerificationResult, DEFAULT_CATEGORY};
use std::sync::Arc;

/// Topics returned whenever a trend listing cannot be produced
pub const TRENDING_FALLBACK: [&str; 5] = [
    "AI Regulation updates",
    "Semiconductor market shifts",
    "Space exploration milestones",
    "Global climate policy",
    "Cybersecurity breakthroughs",
];

const NO_ANALYSIS: &str = "Unable to generate analysis.";

const VERIFY_INSTRUCTION: &str = "\
You are LiveSignal, an autonomous verification agent.
Your goal is to provide a real-time assessment of a claim or topic.

Structure your response carefully:
1. VERDICT: Start with one word (True, False, Misleading, Unconfirmed, or Developing).
2. CONFIDENCE: Provide a numeric score from 0-100 based on source quality.
3. SUMMARY: A 2-sentence executive summary.
4. DETAILED ANALYSIS: Cluster narratives (Official, Witness, Expert), identify contradictions, and mention what is still unclear.
5. TIMESTAMP: State the current effective data time.

Use a clinical, objective tone. Focus on facts found in the provided search results.";

const TRENDING_REQUEST: &str = "List 5 current high-interest trending news topics or claims \
currently circulating in technology, global politics, or science as of today. \
Return ONLY a bulleted list of short phrases.";

/// Generation settings for verification requests
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Low temperature favours factual consistency
    pub temperature: f64,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self { temperature: 0.2 }
    }
}

/// Verification client over a grounded model
pub struct SignalVerifier {
    model: Arc<dyn GroundedModel>,
    config: VerifierConfig,
}

impl SignalVerifier {
    /// Create a verifier over the given model
    pub fn new(model: Arc<dyn GroundedModel>, config: VerifierConfig) -> Self {
        Self { model, config }
    }

    fn verification_prompt(&self, query: &str) -> GroundedPrompt {
        GroundedPrompt::new(format!("Current query to verify: \"{}\"", query))
            .system_instruction(VERIFY_INSTRUCTION)
            .temperature(self.config.temperature)
    }

    /// Verify a claim
    ///
    /// The query must already be non-blank; no validation happens here.
    /// Malformed model text never fails: the verdict and confidence fall
    /// back to `Unconfirmed` and 50.
    pub async fn submit(
        &self,
        query: &str,
        category: Option<&str>,
    ) -> Result<VerificationResult, VerificationFailure> {
        let category = category.unwrap_or(DEFAULT_CATEGORY);

        let reply = self
            .model
            .generate(&self.verification_prompt(query))
            .await
            .map_err(|source| {
                tracing::error!(query = %query, error = %source, "Verification request failed");
                VerificationFailure {
                    query: query.to_string(),
                    source,
                }
            })?;

        let analysis = reply
            .text
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| NO_ANALYSIS.to_string());
        let verdict = parser::parse_verdict(&analysis);
        let confidence = parser::parse_confidence(&analysis);
        let sources = parser::extract_sources(&reply.citations);

        tracing::info!(
            query = %query,
            verdict = %verdict,
            confidence = confidence.value(),
            sources = sources.len(),
            "Claim verified"
        );

        Ok(VerificationResult::new(
            query, category, verdict, confidence, analysis, sources,
        ))
    }

    /// List up to five trending topics
    ///
    /// Never fails: any error yields [`TRENDING_FALLBACK`].
    pub async fn list_trending(&self) -> Vec<String> {
        match self.fetch_trending().await {
            Ok(topics) => topics,
            Err(e) => {
                tracing::warn!(error = %e, "Using fallback trending topics");
                TRENDING_FALLBACK.iter().map(|t| t.to_string()).collect()
            }
        }
    }

    async fn fetch_trending(&self) -> Result<Vec<String>, DegradedTrend> {
        let reply = self
            .model
            .generate(&GroundedPrompt::new(TRENDING_REQUEST))
            .await?;

        let text = reply.text.ok_or(DegradedTrend::EmptyResponse)?;
        let topics = parser::parse_trending(&text);
        if topics.is_empty() {
            return Err(DegradedTrend::NoTopics);
        }

        tracing::debug!(count = topics.len(), "Fetched trending topics");
        Ok(topics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::{Citation, GeminiError, GroundedReply};
    use crate::signal::types::{Confidence, GroundingSource, Verdict};
    use async_trait::async_trait;
    use std::sync::Mutex;

    enum Script {
        Reply(GroundedReply),
        Fail,
    }

    struct ScriptedModel {
        script: Script,
        prompts: Mutex<Vec<GroundedPrompt>>,
    }

    impl ScriptedModel {
        fn replying(text: &str, citations: Vec<Citation>) -> Arc<Self> {
            Arc::new(Self {
                script: Script::Reply(GroundedReply {
                    text: Some(text.to_string()),
                    citations,
                }),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn with(script: Script) -> Arc<Self> {
            Arc::new(Self {
                script,
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl GroundedModel for ScriptedModel {
        async fn generate(&self, prompt: &GroundedPrompt) -> Result<GroundedReply, GeminiError> {
            self.prompts.lock().unwrap().push(prompt.clone());
            match &self.script {
                Script::Reply(reply) => Ok(reply.clone()),
                Script::Fail => Err(GeminiError::Unavailable),
            }
        }
    }

    fn verifier(model: Arc<ScriptedModel>) -> SignalVerifier {
        SignalVerifier::new(model, VerifierConfig::default())
    }

    #[tokio::test]
    async fn test_submit_parses_reply() {
        let model = ScriptedModel::replying(
            "verdict: false\nCONFIDENCE: 73\nSUMMARY: Debunked.",
            vec![
                Citation::web("https://one.example", "One"),
                Citation::default(),
                Citation {
                    uri: Some("https://two.example".to_string()),
                    title: None,
                },
            ],
        );
        let result = verifier(Arc::clone(&model))
            .submit("The moon landing was staged", None)
            .await
            .unwrap();

        assert_eq!(result.verdict, Verdict::False);
        assert_eq!(result.confidence.value(), 73);
        assert_eq!(result.category, "General");
        assert_eq!(result.query, "The moon landing was staged");
        assert_eq!(
            result.analysis,
            "verdict: false\nCONFIDENCE: 73\nSUMMARY: Debunked."
        );
        assert_eq!(
            result.sources,
            vec![
                GroundingSource::new("https://one.example", "One"),
                GroundingSource::new("https://two.example", "Source"),
            ]
        );
    }

    #[tokio::test]
    async fn test_submit_sends_grounded_low_temperature_prompt() {
        let model = ScriptedModel::replying("VERDICT: True", Vec::new());
        verifier(Arc::clone(&model))
            .submit("Water boils at 100C at sea level", Some("Science"))
            .await
            .unwrap();

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        let prompt = &prompts[0];
        assert!(prompt.search_grounding);
        assert_eq!(prompt.temperature, Some(0.2));
        assert_eq!(
            prompt.contents,
            "Current query to verify: \"Water boils at 100C at sea level\""
        );
        let instruction = prompt.system_instruction.as_deref().unwrap();
        assert!(instruction.contains("VERDICT:"));
        assert!(instruction.contains("CONFIDENCE:"));
    }

    #[tokio::test]
    async fn test_submit_defaults_for_unstructured_text() {
        let model = ScriptedModel::replying("Reports are mixed.", Vec::new());
        let result = verifier(model)
            .submit("Something happened", Some("Politics"))
            .await
            .unwrap();

        assert_eq!(result.verdict, Verdict::Unconfirmed);
        assert_eq!(result.confidence, Confidence::NEUTRAL);
        assert_eq!(result.category, "Politics");
        assert!(result.sources.is_empty());
    }

    #[tokio::test]
    async fn test_submit_without_text_uses_placeholder() {
        let model = ScriptedModel::with(Script::Reply(GroundedReply::default()));
        let result = verifier(model).submit("claim", None).await.unwrap();

        assert_eq!(result.analysis, NO_ANALYSIS);
        assert_eq!(result.verdict, Verdict::Unconfirmed);
        assert_eq!(result.confidence, Confidence::NEUTRAL);
    }

    #[tokio::test]
    async fn test_submit_with_empty_text_uses_placeholder() {
        let model = ScriptedModel::replying("", Vec::new());
        let result = verifier(model).submit("claim", None).await.unwrap();

        assert_eq!(result.analysis, NO_ANALYSIS);
        assert_eq!(result.verdict, Verdict::Unconfirmed);
        assert_eq!(result.confidence, Confidence::NEUTRAL);
    }

    #[tokio::test]
    async fn test_submit_assigns_fresh_ids() {
        let model = ScriptedModel::replying("VERDICT: True", Vec::new());
        let verifier = verifier(model);
        let a = verifier.submit("claim", None).await.unwrap();
        let b = verifier.submit("claim", None).await.unwrap();
        assert_ne!(a.id, b.id);
        assert!(b.timestamp >= a.timestamp);
    }

    #[tokio::test]
    async fn test_submit_transport_failure() {
        let model = ScriptedModel::with(Script::Fail);
        let err = verifier(model).submit("claim", None).await.unwrap_err();

        assert_eq!(err.query, "claim");
        assert!(matches!(err.source, GeminiError::Unavailable));
    }

    #[tokio::test]
    async fn test_list_trending_parses_bullets() {
        let model = ScriptedModel::replying("- Topic A\n* Topic B\n• Topic C\nHi\n", Vec::new());
        let topics = verifier(Arc::clone(&model)).list_trending().await;
        assert_eq!(topics, vec!["Topic A", "Topic B", "Topic C"]);

        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].search_grounding);
        assert!(prompts[0].system_instruction.is_none());
        assert!(prompts[0].temperature.is_none());
    }

    #[tokio::test]
    async fn test_list_trending_falls_back_on_failure() {
        let model = ScriptedModel::with(Script::Fail);
        let topics = verifier(model).list_trending().await;
        assert_eq!(topics, TRENDING_FALLBACK);
    }

    #[tokio::test]
    async fn test_list_trending_falls_back_on_empty_text() {
        let model = ScriptedModel::with(Script::Reply(GroundedReply::default()));
        assert_eq!(verifier(model).list_trending().await, TRENDING_FALLBACK);

        let model = ScriptedModel::replying("ok\n-\n", Vec::new());
        assert_eq!(verifier(model).list_trending().await, TRENDING_FALLBACK);
    }
}
