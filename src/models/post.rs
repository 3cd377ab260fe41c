use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::post::{NewPost as DomainNewPost, Post as DomainPost};
use crate::domain::types::{PostContent, PostId, TypeConstraintError};

/// Diesel model representing the `posts` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::posts)]
pub struct Post {
    pub id: i32,
    pub topic_id: i32,
    pub author_id: i32,
    pub content: String,
    pub parent_post_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

/// Insertable form of [`Post`].
#[derive(Insertable)]
#[diesel(table_name = crate::schema::posts)]
pub struct NewPost<'a> {
    pub topic_id: i32,
    pub author_id: i32,
    pub content: &'a str,
    pub parent_post_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Post> for DomainPost {
    type Error = TypeConstraintError;

    fn try_from(post: Post) -> Result<Self, Self::Error> {
        Ok(Self {
            id: post.id.try_into()?,
            topic_id: post.topic_id.try_into()?,
            author_id: post.author_id.try_into()?,
            content: PostContent::new(post.content)?,
            parent_post_id: post.parent_post_id.map(PostId::new).transpose()?,
            created_at: post.created_at,
            updated_at: post.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewPost> for NewPost<'a> {
    fn from(post: &'a DomainNewPost) -> Self {
        Self {
            topic_id: post.topic_id.get(),
            author_id: post.author_id.get(),
            content: post.content.as_str(),
            parent_post_id: post.parent_post_id.map(PostId::get),
            created_at: post.created_at,
        }
    }
}
