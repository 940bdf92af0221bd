// Fashion comment pipeline - core library
//
// Fetches a page of comments from a public API, stages them in Postgres and
// stores a sentiment label for each one. Stages live in `pipeline`,
// collaborator clients in `kernel`, table models in `domains`.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod pipeline;

pub use config::*;
