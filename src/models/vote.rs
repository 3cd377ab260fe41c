use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{TypeConstraintError, VoteTarget, VoteValue};
use crate::domain::vote::Vote as DomainVote;

/// Diesel model representing the `votes` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::votes)]
pub struct Vote {
    pub id: i32,
    pub user_id: i32,
    pub entity_type: String,
    pub entity_id: i32,
    pub value: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Vote`]; also the conflict-update payload.
#[derive(Insertable)]
#[diesel(table_name = crate::schema::votes)]
pub struct NewVote<'a> {
    pub user_id: i32,
    pub entity_type: &'a str,
    pub entity_id: i32,
    pub value: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Vote> for DomainVote {
    type Error = TypeConstraintError;

    fn try_from(vote: Vote) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: vote.user_id.try_into()?,
            target: VoteTarget::from_parts(&vote.entity_type, vote.entity_id)?,
            value: VoteValue::try_from(vote.value)?,
            created_at: vote.created_at,
            updated_at: vote.updated_at,
        })
    }
}
