// Test dependencies - mock implementations for testing
//
// Provides mock collaborators that can be injected into PipelineDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::{BaseCommentSource, BaseSentimentClassifier, SentimentPrediction};
use crate::domains::comments::CommentRecord;

// =============================================================================
// Mock Comment Source
// =============================================================================

/// Queued fetch outcomes. Once the queue is drained every call returns the
/// last configured listing (or an empty one).
pub struct MockCommentSource {
    responses: Arc<Mutex<VecDeque<std::result::Result<Vec<CommentRecord>, String>>>>,
    fallback: Arc<Mutex<Vec<CommentRecord>>>,
    calls: Arc<Mutex<usize>>,
}

impl MockCommentSource {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            fallback: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Queue a successful listing
    pub fn with_comments(self, comments: Vec<CommentRecord>) -> Self {
        *self.fallback.lock().unwrap() = comments.clone();
        self.responses.lock().unwrap().push_back(Ok(comments));
        self
    }

    /// Queue a listing built from body strings
    pub fn with_bodies(self, bodies: &[&str]) -> Self {
        let comments = bodies
            .iter()
            .enumerate()
            .map(|(i, body)| CommentRecord {
                id: Some(serde_json::Value::from(i + 1)),
                body: Some(body.to_string()),
            })
            .collect();
        self.with_comments(comments)
    }

    /// Queue a failure
    pub fn with_error(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl Default for MockCommentSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseCommentSource for MockCommentSource {
    async fn fetch_comments(&self) -> Result<Vec<CommentRecord>> {
        *self.calls.lock().unwrap() += 1;

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(comments)) => Ok(comments),
            Some(Err(message)) => Err(anyhow::anyhow!(message)),
            None => Ok(self.fallback.lock().unwrap().clone()),
        }
    }
}

// =============================================================================
// Mock Sentiment Classifier
// =============================================================================

/// Keyword classifier: text containing any negative keyword is `NEGATIVE`,
/// everything else is `POSITIVE`.
pub struct MockSentimentClassifier {
    negative_keywords: Vec<String>,
    failures_remaining: Arc<Mutex<usize>>,
    always_fail: bool,
    label_override: Option<String>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockSentimentClassifier {
    pub fn new() -> Self {
        Self {
            negative_keywords: vec![
                "bad".to_string(),
                "awful".to_string(),
                "hate".to_string(),
                "ugly".to_string(),
            ],
            failures_remaining: Arc::new(Mutex::new(0)),
            always_fail: false,
            label_override: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_negative_keywords(mut self, keywords: &[&str]) -> Self {
        self.negative_keywords = keywords.iter().map(|k| k.to_string()).collect();
        self
    }

    /// Fail the next `n` calls, then behave normally
    pub fn failing_times(self, n: usize) -> Self {
        *self.failures_remaining.lock().unwrap() = n;
        self
    }

    /// Fail every call
    pub fn always_failing(mut self) -> Self {
        self.always_fail = true;
        self
    }

    /// Return this raw label for every call
    pub fn with_label(mut self, label: &str) -> Self {
        self.label_override = Some(label.to_string());
        self
    }

    /// Texts classified so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockSentimentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseSentimentClassifier for MockSentimentClassifier {
    async fn classify(&self, text: &str) -> Result<SentimentPrediction> {
        self.calls.lock().unwrap().push(text.to_string());

        if self.always_fail {
            anyhow::bail!("mock classifier failure");
        }
        {
            let mut remaining = self.failures_remaining.lock().unwrap();
            if *remaining > 0 {
                *remaining -= 1;
                anyhow::bail!("mock classifier transient failure");
            }
        }

        if let Some(label) = &self.label_override {
            return Ok(SentimentPrediction {
                label: label.clone(),
                score: 0.5,
            });
        }

        let lowered = text.to_lowercase();
        let negative = self
            .negative_keywords
            .iter()
            .any(|keyword| lowered.contains(keyword.as_str()));

        Ok(SentimentPrediction {
            label: if negative { "NEGATIVE" } else { "POSITIVE" }.to_string(),
            score: 0.99,
        })
    }
}
