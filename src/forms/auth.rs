use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{Email, TypeConstraintError, Username};

#[derive(Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    #[validate(length(min = 8, max = 1024))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisterFormPayload {
    pub email: Email,
    pub username: Username,
    pub password: String,
}

#[derive(Debug, Error)]
pub enum RegisterFormError {
    #[error("Registration form validation failed: {0}")]
    Validation(String),
    #[error("Registration form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for RegisterFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for RegisterFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<RegisterForm> for RegisterFormPayload {
    type Error = RegisterFormError;

    fn try_from(value: RegisterForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            email: Email::new(value.email)?,
            username: Username::new(value.username)?,
            password: value.password,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginFormPayload {
    pub email: Email,
    pub password: String,
}

#[derive(Debug, Error)]
pub enum LoginFormError {
    #[error("Login form validation failed: {0}")]
    Validation(String),
    #[error("Login form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for LoginFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for LoginFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<LoginForm> for LoginFormPayload {
    type Error = LoginFormError;

    fn try_from(value: LoginForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            email: Email::new(value.email)?,
            password: value.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_form_normalizes_email() {
        let form = RegisterForm {
            email: "U1@Example.com".to_string(),
            username: "user_one".to_string(),
            password: "correct horse".to_string(),
        };

        let payload: RegisterFormPayload = form.try_into().unwrap();
        assert_eq!(payload.email.as_str(), "u1@example.com");
        assert_eq!(payload.username.as_str(), "user_one");
    }

    #[test]
    fn register_form_rejects_short_password() {
        let form = RegisterForm {
            email: "u1@example.com".to_string(),
            username: "user_one".to_string(),
            password: "short".to_string(),
        };

        let payload: Result<RegisterFormPayload, _> = form.try_into();
        assert!(matches!(payload, Err(RegisterFormError::Validation(_))));
    }

    #[test]
    fn register_form_rejects_bad_username() {
        let form = RegisterForm {
            email: "u1@example.com".to_string(),
            username: "user one".to_string(),
            password: "long enough".to_string(),
        };

        let payload: Result<RegisterFormPayload, _> = form.try_into();
        assert!(matches!(payload, Err(RegisterFormError::TypeConstraint(_))));
    }
}
