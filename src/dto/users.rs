use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::user::UserProfile;

/// Public view of a forum profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<UserProfile> for UserDto {
    fn from(value: UserProfile) -> Self {
        Self {
            id: value.id.get(),
            username: value.username.into_inner(),
            email: value.email.into_inner(),
            avatar_url: value.avatar_url,
            bio: value.bio,
            created_at: value.created_at,
        }
    }
}
