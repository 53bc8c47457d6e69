//! Broadcast target specification.

use serde::{Deserialize, Serialize};

/// Which audience a broadcast notification reaches. Transient value
/// object — consumed by the audience resolver, never persisted.
///
/// `department` assumes the caller already narrowed by institution; the
/// resolver does not cross-validate the pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BroadcastTarget {
    All,
    Institution { institution_id: i64 },
    Department { department_id: i64 },
    Shop { shop_id: i64 },
    User { user_id: i64 },
}

/// Admin broadcast request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastRequest {
    pub title: String,
    pub message: String,
    pub target: BroadcastTarget,
}

/// Broadcast result: how many notification rows were written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastResult {
    pub sent_count: usize,
}
