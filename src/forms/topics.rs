use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::topic::NewTopic;
use crate::domain::types::{
    CategoryId, PostContent, Slug, TopicTitle, TypeConstraintError, UserId,
};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddTopicForm {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 20000))]
    pub content: String,
    /// Optional echo of the category in the path; must match it when sent.
    pub category_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddTopicFormPayload {
    pub title: TopicTitle,
    pub slug: Slug,
    pub content: PostContent,
    pub category_id: Option<CategoryId>,
}

impl AddTopicFormPayload {
    pub fn into_new_topic(self, category_id: CategoryId, author_id: UserId) -> NewTopic {
        NewTopic {
            title: self.title,
            slug: self.slug,
            category_id,
            author_id,
            content: self.content,
            created_at: Utc::now().naive_utc(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AddTopicFormError {
    #[error("Add topic form validation failed: {0}")]
    Validation(String),
    #[error("Add topic form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddTopicFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddTopicFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddTopicForm> for AddTopicFormPayload {
    type Error = AddTopicFormError;

    fn try_from(value: AddTopicForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let title = TopicTitle::new(value.title)?;

        Ok(Self {
            slug: Slug::from_title(title.as_str()),
            title,
            content: PostContent::new(value.content)?,
            category_id: value.category_id.map(CategoryId::new).transpose()?,
        })
    }
}
