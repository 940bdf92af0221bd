pub mod sentiment_result;

pub use sentiment_result::{Sentiment, SentimentResult};
