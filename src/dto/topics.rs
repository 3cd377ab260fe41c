use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::topic::{Topic, TopicSummary};
use crate::dto::posts::PostDto;

/// Placeholder shown when a topic's author no longer resolves.
pub const UNKNOWN_USER: &str = "Unknown User";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicCategoryDto {
    pub id: i32,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicAuthorDto {
    pub id: i32,
    pub name: String,
}

/// A topic row as shown in listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicDto {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub created_at: NaiveDateTime,
    pub last_activity_at: NaiveDateTime,
    pub is_locked: bool,
    pub is_pinned: bool,
    pub category: TopicCategoryDto,
    pub author: TopicAuthorDto,
}

impl TopicDto {
    fn build(topic: Topic, author_name: Option<String>, category_name: Option<String>) -> Self {
        Self {
            id: topic.id.get(),
            title: topic.title.into_inner(),
            slug: topic.slug.into_inner(),
            created_at: topic.created_at,
            last_activity_at: topic.last_activity_at,
            is_locked: topic.is_locked,
            is_pinned: topic.is_pinned,
            category: TopicCategoryDto {
                id: topic.category_id.get(),
                name: category_name,
            },
            author: TopicAuthorDto {
                id: topic.author_id.get(),
                name: author_name.unwrap_or_else(|| UNKNOWN_USER.to_string()),
            },
        }
    }
}

impl From<TopicSummary> for TopicDto {
    fn from(value: TopicSummary) -> Self {
        Self::build(value.topic, value.author_name, value.category_name)
    }
}

/// A single topic with its aggregate counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicDetailDto {
    #[serde(flatten)]
    pub topic: TopicDto,
    pub post_count: usize,
    pub vote_count: i64,
}

/// Response of topic creation: the topic and the post it was opened with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedTopicDto {
    #[serde(flatten)]
    pub topic: TopicDto,
    pub initial_post: PostDto,
}

impl CreatedTopicDto {
    pub fn new(
        topic: Topic,
        initial_post: PostDto,
        author_name: String,
        category_name: String,
    ) -> Self {
        Self {
            topic: TopicDto::build(topic, Some(author_name), Some(category_name)),
            initial_post,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::domain::types::{CategoryId, Slug, TopicId, TopicTitle, UserId};

    fn orphaned_summary() -> TopicSummary {
        let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap().naive_utc();
        TopicSummary {
            topic: Topic {
                id: TopicId::new(7).unwrap(),
                title: TopicTitle::new("Hello").unwrap(),
                slug: Slug::from_title("Hello"),
                category_id: CategoryId::new(3).unwrap(),
                author_id: UserId::new(9).unwrap(),
                created_at: at,
                last_activity_at: at,
                is_locked: false,
                is_pinned: false,
            },
            author_name: None,
            category_name: None,
        }
    }

    #[test]
    fn unresolved_relations_use_placeholders() {
        let dto = TopicDto::from(orphaned_summary());

        assert_eq!(dto.author.id, 9);
        assert_eq!(dto.author.name, UNKNOWN_USER);
        assert_eq!(dto.category.id, 3);
        assert_eq!(dto.category.name, None);
    }

    #[test]
    fn missing_category_name_serializes_as_null() {
        let json = serde_json::to_value(TopicDto::from(orphaned_summary())).unwrap();

        assert_eq!(json["author"]["name"], "Unknown User");
        assert_eq!(json["category"]["name"], serde_json::Value::Null);
        assert_eq!(json["lastActivityAt"], "2023-11-14T22:13:20");
    }
}
