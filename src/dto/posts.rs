use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::post::Post;
use crate::domain::thread::ThreadedPost;
use crate::dto::topics::UNKNOWN_USER;
use crate::pagination::PageInfo;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    pub id: i32,
    pub topic_id: i32,
    pub author_id: i32,
    pub author_name: String,
    pub content: String,
    pub parent_post_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl PostDto {
    /// Builds the DTO; a missing author renders as the unknown-user placeholder.
    pub fn new(post: Post, author_name: Option<String>) -> Self {
        Self {
            id: post.id.get(),
            topic_id: post.topic_id.get(),
            author_id: post.author_id.get(),
            author_name: author_name.unwrap_or_else(|| UNKNOWN_USER.to_string()),
            content: post.content.into_inner(),
            parent_post_id: post.parent_post_id.map(|id| id.get()),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// One page of a topic's posts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostPageDto {
    pub posts: Vec<PostDto>,
    pub pagination: PageInfo,
}

/// A post positioned in the depth-first thread layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadedPostDto {
    #[serde(flatten)]
    pub post: PostDto,
    pub depth: usize,
}

impl ThreadedPostDto {
    pub fn new(threaded: ThreadedPost, author_name: Option<String>) -> Self {
        Self {
            post: PostDto::new(threaded.post, author_name),
            depth: threaded.depth,
        }
    }
}
