//! Typed ID definitions for stored rows.
//!
//! `fashion_comments.id` is a `SERIAL` column, so IDs wrap `i32` rather than
//! the UUIDs used elsewhere.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Store-assigned identifier of a `fashion_comments` row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct CommentId(i32);

impl CommentId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }
}

impl Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_bare_integer() {
        let id = CommentId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        assert_eq!(id.to_string(), "42");
    }
}
