//! Integration tests for the analyze stage against a real Postgres.

mod common;

use crate::common::*;
use comment_pipeline::common::CommentId;
use comment_pipeline::domains::sentiment::{Sentiment, SentimentResult};
use comment_pipeline::pipeline::{analyze_sentiment, save_comments, PipelineError, StageOutcome};
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn failure_mid_insert_rolls_back_every_sentiment_row(ctx: &TestHarness) {
    let run = idle_context(&ctx.db_pool);
    let fetched = StageOutcome::Completed(records(&["good", "also good"]));

    let staged = save_comments(&run, &StageOutcome::Completed(records(&["good"])))
        .await
        .unwrap()
        .completed()
        .unwrap();
    // No such comment: the foreign key rejects the second insert.
    let persisted = StageOutcome::Completed(vec![staged[0], CommentId::new(999_999)]);

    let err = analyze_sentiment(&run, &fetched, &persisted).await.unwrap_err();

    assert!(matches!(err, PipelineError::Analysis(_)));
    assert_eq!(SentimentResult::count(&ctx.db_pool).await.unwrap(), 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn stores_one_label_per_paired_comment(ctx: &TestHarness) {
    let run = idle_context(&ctx.db_pool);
    let fetched = StageOutcome::Completed(records(&["love this jacket", "awful stitching"]));
    let persisted = save_comments(&run, &fetched).await.unwrap();

    let results = analyze_sentiment(&run, &fetched, &persisted)
        .await
        .unwrap()
        .completed()
        .unwrap();

    let labels: Vec<_> = results.iter().map(|r| r.sentiment).collect();
    assert_eq!(labels, vec![Sentiment::Positive, Sentiment::Negative]);
    assert_eq!(SentimentResult::count(&ctx.db_pool).await.unwrap(), 2);
}
