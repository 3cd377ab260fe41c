use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AccountId, Email, PasswordHash, UserId, Username};

/// Authentication identity: the row a session cookie points at.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub email: Email,
    pub password_hash: PasswordHash,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`Account`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub email: Email,
    pub password_hash: PasswordHash,
    pub created_at: NaiveDateTime,
}

/// Forum profile owned by an [`Account`].
///
/// Forum rows reference `id`, never the account id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub auth_user_id: AccountId,
    pub username: Username,
    pub email: Email,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`UserProfile`]. The account id is assigned
/// when the owning account is inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUserProfile {
    pub username: Username,
    pub email: Email,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: NaiveDateTime,
}

/// The caller of a request after resolving its session to a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub account_id: AccountId,
    pub profile_id: UserId,
    pub username: Username,
}
