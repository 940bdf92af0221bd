//! Kernel module - collaborator clients and dependencies.

pub mod comments_api;
pub mod deps;
pub mod sentiment_client;
pub mod test_dependencies;
pub mod traits;

pub use comments_api::{CommentsApiClient, CommentsApiError};
pub use deps::PipelineDeps;
pub use sentiment_client::{HuggingFaceSentimentClassifier, SentimentApiError};
pub use test_dependencies::{MockCommentSource, MockSentimentClassifier};
pub use traits::*;
