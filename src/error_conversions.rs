//! Error conversion glue between the form, domain and service layers.
//!
//! The domain layer must not depend on service error types, so the
//! conversions live here instead of next to either side.

use crate::domain::types::TypeConstraintError;
use crate::forms::auth::{LoginFormError, RegisterFormError};
use crate::forms::categories::AddCategoryFormError;
use crate::forms::posts::AddPostFormError;
use crate::forms::topics::AddTopicFormError;
use crate::forms::votes::VoteFormError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

macro_rules! form_error_into_service_error {
    ($($error:ty),+ $(,)?) => {
        $(
            impl From<$error> for ServiceError {
                fn from(val: $error) -> Self {
                    ServiceError::Form(val.to_string())
                }
            }
        )+
    };
}

form_error_into_service_error!(
    RegisterFormError,
    LoginFormError,
    AddCategoryFormError,
    AddTopicFormError,
    AddPostFormError,
    VoteFormError,
);
