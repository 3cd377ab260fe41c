use std::collections::HashMap;

use crate::auth::AuthContext;
use crate::domain::post::Post;
use crate::domain::thread::layout_thread;
use crate::domain::types::{TopicId, UserId};
use crate::dto::posts::{PostDto, PostPageDto, ThreadedPostDto};
use crate::forms::posts::AddPostFormPayload;
use crate::pagination::{PageInfo, Pagination};
use crate::repository::{PostListQuery, PostReader, PostWriter, TopicReader, UserReader};

use super::auth::current_user;
use super::{ServiceError, ServiceResult, read_error, write_error};

/// Map author ids to usernames for a batch of posts.
fn author_names<R>(posts: &[Post], repo: &R) -> ServiceResult<HashMap<UserId, String>>
where
    R: UserReader,
{
    let mut ids: Vec<UserId> = posts.iter().map(|p| p.author_id).collect();
    ids.sort();
    ids.dedup();

    match repo.list_profiles_by_ids(&ids) {
        Ok(profiles) => Ok(profiles
            .into_iter()
            .map(|p| (p.id, p.username.into_inner()))
            .collect()),
        Err(e) => Err(read_error("load post authors", e)),
    }
}

fn ensure_topic<R>(topic_id: TopicId, repo: &R) -> ServiceResult<()>
where
    R: TopicReader,
{
    match repo.get_topic_by_id(topic_id) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(read_error("get topic", e)),
    }
}

/// One page of a topic's posts in chronological order.
pub fn list_posts<R>(
    topic_id: TopicId,
    pagination: Pagination,
    repo: &R,
) -> ServiceResult<PostPageDto>
where
    R: TopicReader + PostReader + UserReader,
{
    ensure_topic(topic_id, repo)?;

    let (total, posts) = repo
        .list_posts(PostListQuery::new(topic_id).paginate(pagination))
        .map_err(|e| read_error("list posts", e))?;

    let names = author_names(&posts, repo)?;
    let posts = posts
        .into_iter()
        .map(|post| {
            let name = names.get(&post.author_id).cloned();
            PostDto::new(post, name)
        })
        .collect();

    Ok(PostPageDto {
        posts,
        pagination: PageInfo::new(pagination, total),
    })
}

/// Every post of a topic laid out as a reply tree.
pub fn show_thread<R>(topic_id: TopicId, repo: &R) -> ServiceResult<Vec<ThreadedPostDto>>
where
    R: TopicReader + PostReader + UserReader,
{
    ensure_topic(topic_id, repo)?;

    let (_, posts) = repo
        .list_posts(PostListQuery::new(topic_id))
        .map_err(|e| read_error("list posts", e))?;

    let names = author_names(&posts, repo)?;
    Ok(layout_thread(posts)
        .into_iter()
        .map(|threaded| {
            let name = names.get(&threaded.post.author_id).cloned();
            ThreadedPostDto::new(threaded, name)
        })
        .collect())
}

/// Reply in a topic, optionally to a specific post of the same topic.
pub fn create_post<R>(
    topic_id: TopicId,
    payload: AddPostFormPayload,
    auth: &AuthContext,
    repo: &R,
) -> ServiceResult<PostDto>
where
    R: UserReader + TopicReader + PostReader + PostWriter,
{
    let user = current_user(auth, repo)?;

    let topic = match repo.get_topic_by_id(topic_id) {
        Ok(Some(topic)) => topic,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => return Err(read_error("get topic", e)),
    };
    if topic.is_locked {
        return Err(ServiceError::Form("Topic is locked".to_string()));
    }

    if let Some(parent_id) = payload.parent_post_id {
        match repo.get_post_by_id(parent_id) {
            Ok(Some(parent)) if parent.topic_id == topic_id => {}
            Ok(Some(_)) => {
                return Err(ServiceError::Form(
                    "Parent post belongs to another topic".to_string(),
                ));
            }
            Ok(None) => return Err(ServiceError::NotFound),
            Err(e) => return Err(read_error("get parent post", e)),
        }
    }

    let post = repo
        .create_post(&payload.into_new_post(topic_id, user.profile_id))
        .map_err(|e| write_error("create post", e))?;

    log::info!(
        "User {} posted {} in topic {}",
        user.profile_id,
        post.id,
        topic_id
    );
    Ok(PostDto::new(post, Some(user.username.into_inner())))
}
