use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{TypeConstraintError, VoteValue};

/// Vote request body. Post votes historically send `voteType`, topic votes
/// send `vote`; both name the same signed value.
#[derive(Deserialize, Validate)]
pub struct VoteForm {
    #[serde(alias = "voteType")]
    #[validate(range(min = -1, max = 1))]
    pub vote: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoteFormPayload {
    pub value: VoteValue,
}

#[derive(Debug, Error)]
pub enum VoteFormError {
    #[error("Vote form validation failed: {0}")]
    Validation(String),
    #[error("Vote form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for VoteFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for VoteFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<VoteForm> for VoteFormPayload {
    type Error = VoteFormError;

    fn try_from(value: VoteForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            value: VoteValue::try_from(value.vote)?,
        })
    }
}
