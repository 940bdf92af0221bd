// Business domains
pub mod comments;
pub mod sentiment;
