use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{Email, PasswordHash, TypeConstraintError, Username};
use crate::domain::user::{
    Account as DomainAccount, NewAccount as DomainNewAccount, NewUserProfile as DomainNewProfile,
    UserProfile as DomainUserProfile,
};

/// Diesel model representing a row in the `accounts` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::accounts)]
pub struct Account {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Account`].
#[derive(Insertable)]
#[diesel(table_name = crate::schema::accounts)]
pub struct NewAccount<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub created_at: NaiveDateTime,
}

/// Diesel model representing a row in the `users` (profile) table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::users)]
pub struct UserProfile {
    pub id: i32,
    pub auth_user_id: i32,
    pub username: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`UserProfile`].
#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUserProfile<'a> {
    pub auth_user_id: i32,
    pub username: &'a str,
    pub email: &'a str,
    pub avatar_url: Option<&'a str>,
    pub bio: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Account> for DomainAccount {
    type Error = TypeConstraintError;

    fn try_from(account: Account) -> Result<Self, Self::Error> {
        Ok(Self {
            id: account.id.try_into()?,
            email: Email::new(account.email)?,
            password_hash: PasswordHash::new(account.password_hash)?,
            created_at: account.created_at,
        })
    }
}

impl TryFrom<UserProfile> for DomainUserProfile {
    type Error = TypeConstraintError;

    fn try_from(profile: UserProfile) -> Result<Self, Self::Error> {
        Ok(Self {
            id: profile.id.try_into()?,
            auth_user_id: profile.auth_user_id.try_into()?,
            username: Username::new(profile.username)?,
            email: Email::new(profile.email)?,
            avatar_url: profile.avatar_url,
            bio: profile.bio,
            created_at: profile.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewAccount> for NewAccount<'a> {
    fn from(account: &'a DomainNewAccount) -> Self {
        Self {
            email: account.email.as_str(),
            password_hash: account.password_hash.as_str(),
            created_at: account.created_at,
        }
    }
}

impl<'a> NewUserProfile<'a> {
    /// Binds a profile to the account row it belongs to.
    pub fn for_account(profile: &'a DomainNewProfile, auth_user_id: i32) -> Self {
        Self {
            auth_user_id,
            username: profile.username.as_str(),
            email: profile.email.as_str(),
            avatar_url: profile.avatar_url.as_deref(),
            bio: profile.bio.as_deref(),
            created_at: profile.created_at,
        }
    }
}
