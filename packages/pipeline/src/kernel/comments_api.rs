//! HTTP client for the public comments endpoint.

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use super::BaseCommentSource;
use crate::domains::comments::CommentRecord;

/// Comments API errors.
#[derive(Debug, Error)]
pub enum CommentsApiError {
    /// Connection failed, timed out, or the body could not be read
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Body was not a JSON array of comment objects
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct CommentsApiClient {
    client: reqwest::Client,
    url: String,
}

impl CommentsApiClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Build a client whose requests give up after `timeout`.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// GET the listing and decode it.
    pub async fn get_comments(&self) -> std::result::Result<Vec<CommentRecord>, CommentsApiError> {
        let resp = self.client.get(&self.url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(url = %self.url, status = %status, "Comments API returned an error status");
            return Err(CommentsApiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        let comments: Vec<CommentRecord> = serde_json::from_str(&body)?;
        debug!(url = %self.url, count = comments.len(), "Decoded comments payload");

        Ok(comments)
    }
}

#[async_trait]
impl BaseCommentSource for CommentsApiClient {
    async fn fetch_comments(&self) -> Result<Vec<CommentRecord>> {
        Ok(self.get_comments().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn respond_with(server: &MockServer, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/comments"))
            .respond_with(response)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn decodes_comment_array() {
        let server = MockServer::start().await;
        respond_with(
            &server,
            ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"postId": 1, "id": 1, "name": "a", "email": "a@x.io", "body": "first"},
                {"postId": 1, "id": 2, "name": "b", "email": "b@x.io", "body": "second"}
            ])),
        )
        .await;

        let client = CommentsApiClient::new(format!("{}/comments", server.uri()));
        let comments = client.get_comments().await.unwrap();

        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].text(), Some("first"));
        assert_eq!(comments[1].id, Some(serde_json::Value::from(2)));
    }

    #[tokio::test]
    async fn string_and_float_ids_do_not_fail_the_listing() {
        let server = MockServer::start().await;
        respond_with(
            &server,
            ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "c-1", "body": "nice coat"},
                {"id": 1.5, "body": "ok"},
                {"id": 3, "body": 42}
            ])),
        )
        .await;

        let client = CommentsApiClient::new(format!("{}/comments", server.uri()));
        let comments = client.fetch_comments().await.unwrap();

        let texts: Vec<_> = comments.iter().map(|c| c.text()).collect();
        assert_eq!(texts, vec![Some("nice coat"), Some("ok"), None]);
    }

    #[tokio::test]
    async fn server_error_is_api_error() {
        let server = MockServer::start().await;
        respond_with(&server, ResponseTemplate::new(500).set_body_string("boom")).await;

        let client = CommentsApiClient::new(format!("{}/comments", server.uri()));
        let err = client.get_comments().await.unwrap_err();

        match err {
            CommentsApiError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_array_body_is_parse_error() {
        let server = MockServer::start().await;
        respond_with(
            &server,
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"comments": []})),
        )
        .await;

        let client = CommentsApiClient::new(format!("{}/comments", server.uri()));
        let err = client.get_comments().await.unwrap_err();

        assert!(matches!(err, CommentsApiError::Parse(_)));
    }
}
