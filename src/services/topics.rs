use crate::auth::AuthContext;
use crate::domain::types::{CategoryId, TopicId, VoteTarget};
use crate::dto::posts::PostDto;
use crate::dto::topics::{CreatedTopicDto, TopicDetailDto, TopicDto};
use crate::forms::topics::AddTopicFormPayload;
use crate::repository::{
    CategoryReader, PostReader, TopicReader, TopicWriter, UserReader, VoteReader,
};

use super::auth::current_user;
use super::{ServiceError, ServiceResult, read_error, write_error};

/// Topics of a category, most recently active first.
pub fn list_topics<R>(category_id: CategoryId, repo: &R) -> ServiceResult<Vec<TopicDto>>
where
    R: CategoryReader + TopicReader,
{
    match repo.get_category_by_id(category_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => return Err(read_error("get category", e)),
    }

    match repo.list_topics(category_id) {
        Ok(topics) => Ok(topics.into_iter().map(TopicDto::from).collect()),
        Err(e) => Err(read_error("list topics", e)),
    }
}

/// A single topic with its post count and net score.
pub fn show_topic<R>(topic_id: TopicId, repo: &R) -> ServiceResult<TopicDetailDto>
where
    R: TopicReader + PostReader + VoteReader,
{
    let summary = match repo.get_topic_summary(topic_id) {
        Ok(Some(summary)) => summary,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => return Err(read_error("get topic", e)),
    };

    let post_count = repo
        .count_posts(topic_id)
        .map_err(|e| read_error("count posts", e))?;
    let vote_count = repo
        .vote_score(VoteTarget::Topic(topic_id))
        .map_err(|e| read_error("sum topic votes", e))?;

    Ok(TopicDetailDto {
        topic: summary.into(),
        post_count,
        vote_count,
    })
}

/// Open a topic in `category_id` together with its first post.
///
/// Both rows are written in one transaction, so a failure never leaves a
/// topic without posts behind.
pub fn create_topic<R>(
    category_id: CategoryId,
    payload: AddTopicFormPayload,
    auth: &AuthContext,
    repo: &R,
) -> ServiceResult<CreatedTopicDto>
where
    R: UserReader + CategoryReader + TopicWriter,
{
    let user = current_user(auth, repo)?;

    if payload.category_id.is_some_and(|id| id != category_id) {
        return Err(ServiceError::Form(
            "categoryId does not match the category in the path".to_string(),
        ));
    }

    let category = match repo.get_category_by_id(category_id) {
        Ok(Some(category)) => category,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => return Err(read_error("get category", e)),
    };

    let new_topic = payload.into_new_topic(category.id, user.profile_id);
    let (topic, post) = repo
        .create_topic(&new_topic)
        .map_err(|e| write_error("create topic", e))?;

    log::info!(
        "User {} opened topic {} in category {}",
        user.profile_id,
        topic.id,
        category.id
    );

    let author_name = user.username.into_inner();
    let initial_post = PostDto::new(post, Some(author_name.clone()));
    Ok(CreatedTopicDto::new(
        topic,
        initial_post,
        author_name,
        category.name.into_inner(),
    ))
}
