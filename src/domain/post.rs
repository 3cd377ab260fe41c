use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{PostContent, PostId, TopicId, UserId};

/// A message within a topic, optionally replying to another post of the
/// same topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub topic_id: TopicId,
    pub author_id: UserId,
    pub content: PostContent,
    pub parent_post_id: Option<PostId>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

/// Data required to insert a new [`Post`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub topic_id: TopicId,
    pub author_id: UserId,
    pub content: PostContent,
    pub parent_post_id: Option<PostId>,
    pub created_at: NaiveDateTime,
}
