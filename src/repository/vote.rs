use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::upsert::excluded;

use crate::domain::types::{UserId, VoteTarget, VoteValue};
use crate::domain::vote::Vote;
use crate::models::vote::{NewVote as DbNewVote, Vote as DbVote};
use crate::repository::{
    DieselRepository, RepositoryError, RepositoryResult, VoteReader, VoteWriter,
};

impl VoteReader for DieselRepository {
    fn vote_score(&self, target: VoteTarget) -> RepositoryResult<i64> {
        use crate::schema::votes;

        let mut conn = self.conn()?;

        let score = votes::table
            .filter(votes::entity_type.eq(target.entity_type().as_str()))
            .filter(votes::entity_id.eq(target.entity_id()))
            .select(diesel::dsl::sum(votes::value))
            .first::<Option<i64>>(&mut conn)?;

        Ok(score.unwrap_or(0))
    }

    fn get_vote(&self, user_id: UserId, target: VoteTarget) -> RepositoryResult<Option<Vote>> {
        use crate::schema::votes;

        let mut conn = self.conn()?;

        let vote = votes::table
            .filter(votes::user_id.eq(user_id.get()))
            .filter(votes::entity_type.eq(target.entity_type().as_str()))
            .filter(votes::entity_id.eq(target.entity_id()))
            .first::<DbVote>(&mut conn)
            .optional()?;

        Ok(vote.map(TryInto::try_into).transpose()?)
    }
}

impl VoteWriter for DieselRepository {
    fn upsert_vote(
        &self,
        user_id: UserId,
        target: VoteTarget,
        value: VoteValue,
        now: NaiveDateTime,
    ) -> RepositoryResult<usize> {
        use crate::schema::votes;

        if value == VoteValue::Clear {
            return Err(RepositoryError::ValidationError(
                "a cleared vote is deleted, not stored".to_string(),
            ));
        }

        let mut conn = self.conn()?;

        let affected = diesel::insert_into(votes::table)
            .values(DbNewVote {
                user_id: user_id.get(),
                entity_type: target.entity_type().as_str(),
                entity_id: target.entity_id(),
                value: value.get(),
                created_at: now,
                updated_at: now,
            })
            .on_conflict((votes::user_id, votes::entity_type, votes::entity_id))
            .do_update()
            .set((
                votes::value.eq(excluded(votes::value)),
                votes::updated_at.eq(excluded(votes::updated_at)),
            ))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_vote(&self, user_id: UserId, target: VoteTarget) -> RepositoryResult<usize> {
        use crate::schema::votes;

        let mut conn = self.conn()?;

        let affected = diesel::delete(
            votes::table
                .filter(votes::user_id.eq(user_id.get()))
                .filter(votes::entity_type.eq(target.entity_type().as_str()))
                .filter(votes::entity_id.eq(target.entity_id())),
        )
        .execute(&mut conn)?;

        Ok(affected)
    }
}
