use chrono::NaiveDateTime;

use crate::domain::types::{UserId, VoteTarget, VoteValue};

/// A stored vote. Only `Up` and `Down` are ever persisted.
#[derive(Debug, Clone)]
pub struct Vote {
    pub user_id: UserId,
    pub target: VoteTarget,
    pub value: VoteValue,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Net score of an entity and the caller's own contribution to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteTally {
    pub score: i64,
    pub user_vote: Option<VoteValue>,
}

/// Sums vote values. Order does not matter.
pub fn net_score<I>(values: I) -> i64
where
    I: IntoIterator<Item = VoteValue>,
{
    values.into_iter().map(|v| i64::from(v.get())).sum()
}
