use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::topic::{NewTopic as DomainNewTopic, Topic as DomainTopic};
use crate::domain::types::{Slug, TopicTitle, TypeConstraintError};

/// Diesel model representing the `topics` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::topics)]
pub struct Topic {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub category_id: i32,
    pub author_id: i32,
    pub created_at: NaiveDateTime,
    pub last_activity_at: NaiveDateTime,
    pub is_locked: bool,
    pub is_pinned: bool,
}

/// Insertable form of [`Topic`]. New topics are never locked or pinned.
#[derive(Insertable)]
#[diesel(table_name = crate::schema::topics)]
pub struct NewTopic<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub category_id: i32,
    pub author_id: i32,
    pub created_at: NaiveDateTime,
    pub last_activity_at: NaiveDateTime,
}

impl TryFrom<Topic> for DomainTopic {
    type Error = TypeConstraintError;

    fn try_from(topic: Topic) -> Result<Self, Self::Error> {
        Ok(Self {
            id: topic.id.try_into()?,
            title: TopicTitle::new(topic.title)?,
            slug: Slug::from_stored(topic.slug),
            category_id: topic.category_id.try_into()?,
            author_id: topic.author_id.try_into()?,
            created_at: topic.created_at,
            last_activity_at: topic.last_activity_at,
            is_locked: topic.is_locked,
            is_pinned: topic.is_pinned,
        })
    }
}

impl<'a> From<&'a DomainNewTopic> for NewTopic<'a> {
    fn from(topic: &'a DomainNewTopic) -> Self {
        Self {
            title: topic.title.as_str(),
            slug: topic.slug.as_str(),
            category_id: topic.category_id.get(),
            author_id: topic.author_id.get(),
            created_at: topic.created_at,
            last_activity_at: topic.created_at,
        }
    }
}
