use chrono::Utc;

use crate::auth::AuthContext;
use crate::domain::types::{UserId, VoteTarget, VoteValue};
use crate::domain::vote::VoteTally;
use crate::dto::votes::{VoteResultDto, VoteTallyDto};
use crate::forms::votes::VoteFormPayload;
use crate::repository::{PostReader, TopicReader, UserReader, VoteReader, VoteWriter};

use super::auth::{current_user, optional_user};
use super::{ServiceError, ServiceResult, read_error, write_error};

fn ensure_target<R>(target: VoteTarget, repo: &R) -> ServiceResult<()>
where
    R: TopicReader + PostReader,
{
    let exists = match target {
        VoteTarget::Topic(id) => repo.get_topic_by_id(id).map(|t| t.is_some()),
        VoteTarget::Post(id) => repo.get_post_by_id(id).map(|p| p.is_some()),
    };
    match exists {
        Ok(true) => Ok(()),
        Ok(false) => Err(ServiceError::NotFound),
        Err(e) => Err(read_error("look up vote target", e)),
    }
}

fn tally<R>(target: VoteTarget, user_id: Option<UserId>, repo: &R) -> ServiceResult<VoteTally>
where
    R: VoteReader,
{
    let score = repo
        .vote_score(target)
        .map_err(|e| read_error("sum votes", e))?;
    let user_vote = match user_id {
        Some(user_id) => repo
            .get_vote(user_id, target)
            .map_err(|e| read_error("load vote", e))?
            .map(|vote| vote.value),
        None => None,
    };
    Ok(VoteTally { score, user_vote })
}

/// Record the caller's vote on a topic or post.
///
/// A user holds at most one vote per entity: voting again replaces the
/// previous value, and voting 0 withdraws it. Returns the fresh score.
pub fn cast_vote<R>(
    target: VoteTarget,
    payload: VoteFormPayload,
    auth: &AuthContext,
    repo: &R,
) -> ServiceResult<VoteResultDto>
where
    R: UserReader + TopicReader + PostReader + VoteReader + VoteWriter,
{
    let user = current_user(auth, repo)?;
    ensure_target(target, repo)?;

    let message = match payload.value {
        VoteValue::Clear => {
            repo.delete_vote(user.profile_id, target)
                .map_err(|e| write_error("remove vote", e))?;
            "Vote removed"
        }
        value => {
            repo.upsert_vote(user.profile_id, target, value, Utc::now().naive_utc())
                .map_err(|e| write_error("record vote", e))?;
            "Vote recorded"
        }
    };

    log::info!(
        "User {} voted {} on {target}",
        user.profile_id,
        payload.value.get()
    );

    let tally = tally(target, Some(user.profile_id), repo)?;
    Ok(VoteResultDto {
        success: true,
        message: message.to_string(),
        vote_count: tally.score,
        user_vote: tally.user_vote.map(|v| v.get()),
    })
}

/// Current score of a topic or post, with the caller's own vote when there
/// is a session.
pub fn vote_tally<R>(target: VoteTarget, auth: &AuthContext, repo: &R) -> ServiceResult<VoteTallyDto>
where
    R: UserReader + TopicReader + PostReader + VoteReader,
{
    ensure_target(target, repo)?;
    let user = optional_user(auth, repo)?;
    Ok(tally(target, user.map(|u| u.profile_id), repo)?.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{PostId, TopicId};
    use crate::repository::test::TestRepository;
    use crate::services::auth::tests::register_user;
    use crate::services::topics::create_topic;
    use crate::services::topics::tests::{category, topic_payload};

    fn vote(value: VoteValue) -> VoteFormPayload {
        VoteFormPayload { value }
    }

    fn setup() -> (TestRepository, AuthContext, TopicId, PostId) {
        let repo = TestRepository::new();
        let auth = register_user(&repo, "alice");
        let category_id = category(&repo, &auth, "General");
        let created =
            create_topic(category_id, topic_payload("Poll", "opening"), &auth, &repo).unwrap();
        let topic_id = TopicId::new(created.topic.id).unwrap();
        let post_id = PostId::new(created.initial_post.id).unwrap();
        (repo, auth, topic_id, post_id)
    }

    #[test]
    fn voting_again_replaces_the_previous_vote() {
        let (repo, auth, topic_id, _) = setup();
        let target = VoteTarget::Topic(topic_id);

        cast_vote(target, vote(VoteValue::Up), &auth, &repo).unwrap();
        let result = cast_vote(target, vote(VoteValue::Down), &auth, &repo).unwrap();

        assert!(result.success);
        assert_eq!(result.vote_count, -1);
        assert_eq!(result.user_vote, Some(-1));
        assert_eq!(repo.vote_rows(), 1);
    }

    #[test]
    fn repeated_identical_votes_count_once() {
        let (repo, auth, _, post_id) = setup();
        let target = VoteTarget::Post(post_id);

        for _ in 0..3 {
            cast_vote(target, vote(VoteValue::Up), &auth, &repo).unwrap();
        }

        assert_eq!(vote_tally(target, &auth, &repo).unwrap().vote_count, 1);
        assert_eq!(repo.vote_rows(), 1);
    }

    #[test]
    fn zero_withdraws_and_is_idempotent() {
        let (repo, auth, topic_id, _) = setup();
        let target = VoteTarget::Topic(topic_id);
        cast_vote(target, vote(VoteValue::Up), &auth, &repo).unwrap();

        let first = cast_vote(target, vote(VoteValue::Clear), &auth, &repo).unwrap();
        let second = cast_vote(target, vote(VoteValue::Clear), &auth, &repo).unwrap();

        assert_eq!(first.vote_count, 0);
        assert_eq!(first.user_vote, None);
        assert_eq!(second, first);
        assert_eq!(repo.vote_rows(), 0);
    }

    #[test]
    fn score_does_not_depend_on_vote_order() {
        let (repo, alice, topic_id, _) = setup();
        let bob = register_user(&repo, "bob");
        let carol = register_user(&repo, "carol");
        let target = VoteTarget::Topic(topic_id);

        cast_vote(target, vote(VoteValue::Down), &carol, &repo).unwrap();
        cast_vote(target, vote(VoteValue::Up), &alice, &repo).unwrap();
        cast_vote(target, vote(VoteValue::Up), &bob, &repo).unwrap();

        let tally = vote_tally(target, &AuthContext::anonymous(), &repo).unwrap();
        assert_eq!(tally.vote_count, 1);
        assert_eq!(tally.user_vote, None);
        assert_eq!(repo.vote_rows(), 3);
    }

    #[test]
    fn topic_and_post_votes_are_separate() {
        let (repo, auth, topic_id, post_id) = setup();
        // Ids may coincide across entity types; the tallies must not mix.
        cast_vote(VoteTarget::Topic(topic_id), vote(VoteValue::Up), &auth, &repo).unwrap();

        let post_tally = vote_tally(VoteTarget::Post(post_id), &auth, &repo).unwrap();
        assert_eq!(post_tally.vote_count, 0);
        assert_eq!(post_tally.user_vote, None);
    }

    #[test]
    fn voting_on_missing_entities_is_not_found() {
        let (repo, auth, _, _) = setup();
        let target = VoteTarget::Post(PostId::new(999).unwrap());

        assert_eq!(
            cast_vote(target, vote(VoteValue::Up), &auth, &repo).unwrap_err(),
            ServiceError::NotFound
        );
        assert_eq!(repo.vote_rows(), 0);
    }

    #[test]
    fn anonymous_callers_cannot_vote() {
        let (repo, _, topic_id, _) = setup();

        assert_eq!(
            cast_vote(
                VoteTarget::Topic(topic_id),
                vote(VoteValue::Up),
                &AuthContext::anonymous(),
                &repo
            )
            .unwrap_err(),
            ServiceError::Unauthorized
        );
    }
}
