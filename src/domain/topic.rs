use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, PostContent, Slug, TopicId, TopicTitle, UserId};

/// A forum thread inside exactly one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub title: TopicTitle,
    pub slug: Slug,
    pub category_id: CategoryId,
    pub author_id: UserId,
    pub created_at: NaiveDateTime,
    /// Sort key for "recently active" listings, bumped by every new post.
    pub last_activity_at: NaiveDateTime,
    pub is_locked: bool,
    pub is_pinned: bool,
}

/// A new topic together with the body of its first post.
///
/// Both rows are written in one transaction; the initial post takes the
/// topic's author and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTopic {
    pub title: TopicTitle,
    pub slug: Slug,
    pub category_id: CategoryId,
    pub author_id: UserId,
    pub content: PostContent,
    pub created_at: NaiveDateTime,
}

/// A topic joined with the display names of its relations.
///
/// Either name is `None` when the referenced row no longer resolves.
#[derive(Debug, Clone)]
pub struct TopicSummary {
    pub topic: Topic,
    pub author_name: Option<String>,
    pub category_name: Option<String>,
}
