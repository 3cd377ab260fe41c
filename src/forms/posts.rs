use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::post::NewPost;
use crate::domain::types::{PostContent, PostId, TopicId, TypeConstraintError, UserId};
use crate::pagination::Pagination;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddPostForm {
    #[validate(length(min = 1, max = 20000))]
    pub content: String,
    pub parent_post_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddPostFormPayload {
    pub content: PostContent,
    pub parent_post_id: Option<PostId>,
}

impl AddPostFormPayload {
    pub fn into_new_post(self, topic_id: TopicId, author_id: UserId) -> NewPost {
        NewPost {
            topic_id,
            author_id,
            content: self.content,
            parent_post_id: self.parent_post_id,
            created_at: Utc::now().naive_utc(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AddPostFormError {
    #[error("Add post form validation failed: {0}")]
    Validation(String),
    #[error("Add post form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddPostFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddPostFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddPostForm> for AddPostFormPayload {
    type Error = AddPostFormError;

    fn try_from(value: AddPostForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            content: PostContent::new(value.content)?,
            parent_post_id: value.parent_post_id.map(PostId::new).transpose()?,
        })
    }
}

/// Query string of the post listing endpoint.
#[derive(Deserialize, Debug, Default)]
pub struct PostListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl From<PostListParams> for Pagination {
    fn from(value: PostListParams) -> Self {
        Pagination::clamped(value.page, value.limit)
    }
}
