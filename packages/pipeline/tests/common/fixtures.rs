//! Test fixtures for wiring pipeline runs against mocks.

use comment_pipeline::domains::comments::CommentRecord;
use comment_pipeline::kernel::{
    BaseCommentSource, BaseSentimentClassifier, CommentsApiClient, MockCommentSource,
    MockSentimentClassifier, PipelineDeps,
};
use comment_pipeline::pipeline::RunContext;
use serde_json::{json, Value};
use sqlx::PgPool;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Records shaped like the public API: `{"postId", "id", "name", "email", "body"}`
pub fn api_comments(bodies: &[&str]) -> Value {
    let items: Vec<Value> = bodies
        .iter()
        .enumerate()
        .map(|(i, body)| {
            json!({
                "postId": 1,
                "id": i + 1,
                "name": format!("commenter {}", i + 1),
                "email": format!("user{}@example.com", i + 1),
                "body": body,
            })
        })
        .collect();
    Value::Array(items)
}

/// Bodies `"text 1"`..`"text n"`
pub fn numbered_bodies(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("text {}", i)).collect()
}

pub fn records(bodies: &[&str]) -> Vec<CommentRecord> {
    bodies
        .iter()
        .enumerate()
        .map(|(i, body)| CommentRecord {
            id: Some(Value::from(i + 1)),
            body: Some(body.to_string()),
        })
        .collect()
}

/// Start a mock comments endpoint at `/comments`.
pub async fn comments_server(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/comments"))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

pub fn api_client(server: &MockServer) -> CommentsApiClient {
    CommentsApiClient::new(format!("{}/comments", server.uri()))
}

pub fn run_context(
    pool: &PgPool,
    source: impl BaseCommentSource + 'static,
    classifier: impl BaseSentimentClassifier + 'static,
) -> RunContext {
    RunContext::new(PipelineDeps::new(
        pool.clone(),
        Arc::new(source),
        Arc::new(classifier),
    ))
}

/// Context whose collaborators are never expected to be called.
pub fn idle_context(pool: &PgPool) -> RunContext {
    run_context(pool, MockCommentSource::new(), MockSentimentClassifier::new())
}
