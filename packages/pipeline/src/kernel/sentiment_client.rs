//! Sentiment classifier backed by the Hugging Face inference API.
//!
//! Calls the hosted `distilbert-base-uncased-finetuned-sst-2-english` model by
//! default. The endpoint returns every label with a score; the highest scoring
//! label wins.
//!
//! # Example
//!
//! ```rust,ignore
//! let classifier = HuggingFaceSentimentClassifier::new(DEFAULT_SENTIMENT_MODEL)
//!     .with_token(token);
//!
//! let prediction = classifier.classify("love this jacket").await?;
//! assert_eq!(prediction.label, "POSITIVE");
//! ```

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use super::{BaseSentimentClassifier, SentimentPrediction};
use crate::config::DEFAULT_SENTIMENT_API_URL;

/// Sentiment API errors.
#[derive(Debug, Error)]
pub enum SentimentApiError {
    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response (model loading, rate limit, bad token)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (unexpected response shape, no labels)
    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Serialize)]
struct ClassificationRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

/// Text classification responses come back nested per input, but some
/// deployments flatten single-input responses.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassificationResponse {
    fn best(self) -> Option<LabelScore> {
        let scores = match self {
            ClassificationResponse::Nested(outer) => outer.into_iter().next().unwrap_or_default(),
            ClassificationResponse::Flat(scores) => scores,
        };
        scores.into_iter().max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

fn parse_prediction(body: &str) -> std::result::Result<SentimentPrediction, SentimentApiError> {
    let response: ClassificationResponse =
        serde_json::from_str(body).map_err(|e| SentimentApiError::Parse(e.to_string()))?;

    response
        .best()
        .map(|best| SentimentPrediction {
            label: best.label,
            score: best.score,
        })
        .ok_or_else(|| SentimentApiError::Parse("No labels in classifier response".into()))
}

#[derive(Clone)]
pub struct HuggingFaceSentimentClassifier {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
    api_token: Option<String>,
}

impl HuggingFaceSentimentClassifier {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: DEFAULT_SENTIMENT_API_URL.to_string(),
            model: model.into(),
            api_token: None,
        }
    }

    /// Set a custom base URL (self-hosted inference, proxies, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.model)
    }

    pub async fn predict(
        &self,
        text: &str,
    ) -> std::result::Result<SentimentPrediction, SentimentApiError> {
        let start = std::time::Instant::now();

        let mut request = self
            .http_client
            .post(self.endpoint())
            .json(&ClassificationRequest { inputs: text });
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Sentiment request failed");
            SentimentApiError::Network(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SentimentApiError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!(status = %status, error = %body, "Sentiment API error");
            return Err(SentimentApiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let prediction = parse_prediction(&body)?;

        debug!(
            model = %self.model,
            label = %prediction.label,
            duration_ms = start.elapsed().as_millis(),
            "Sentiment classification"
        );

        Ok(prediction)
    }
}

#[async_trait]
impl BaseSentimentClassifier for HuggingFaceSentimentClassifier {
    async fn classify(&self, text: &str) -> Result<SentimentPrediction> {
        Ok(self.predict(text).await?)
    }
}
