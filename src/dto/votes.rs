use serde::Serialize;

use crate::domain::vote::VoteTally;

/// Current score of an entity as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteTallyDto {
    pub vote_count: i64,
    pub user_vote: Option<i32>,
}

impl From<VoteTally> for VoteTallyDto {
    fn from(value: VoteTally) -> Self {
        Self {
            vote_count: value.score,
            user_vote: value.user_vote.map(|v| v.get()),
        }
    }
}

/// Acknowledgement of a cast vote carrying the fresh score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResultDto {
    pub success: bool,
    pub message: String,
    pub vote_count: i64,
    pub user_vote: Option<i32>,
}
