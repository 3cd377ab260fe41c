use chrono::Utc;

use crate::auth::{AuthContext, hash_password, verify_password};
use crate::domain::user::{CurrentUser, NewAccount, NewUserProfile, UserProfile};
use crate::dto::users::UserDto;
use crate::forms::auth::{LoginFormPayload, RegisterFormPayload};
use crate::repository::{UserReader, UserWriter};

use super::{ServiceError, ServiceResult, read_error, write_error};

/// Resolve the session's authentication identity to the caller's forum
/// profile.
///
/// Every write goes through here so that `author_id`/`user_id` columns only
/// ever receive profile ids. A session whose account has no profile is
/// treated like no session at all.
pub fn current_user<R>(auth: &AuthContext, repo: &R) -> ServiceResult<CurrentUser>
where
    R: UserReader,
{
    let Some(account_id) = auth.account_id() else {
        return Err(ServiceError::Unauthorized);
    };

    match repo.get_profile_by_account_id(account_id) {
        Ok(Some(profile)) => Ok(CurrentUser {
            account_id,
            profile_id: profile.id,
            username: profile.username,
        }),
        Ok(None) => {
            log::warn!("Session account {account_id} has no forum profile");
            Err(ServiceError::Unauthorized)
        }
        Err(e) => Err(read_error("resolve session profile", e)),
    }
}

/// Like [`current_user`] but anonymous callers yield `None` instead of an
/// error.
pub fn optional_user<R>(auth: &AuthContext, repo: &R) -> ServiceResult<Option<CurrentUser>>
where
    R: UserReader,
{
    match current_user(auth, repo) {
        Ok(user) => Ok(Some(user)),
        Err(ServiceError::Unauthorized) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Create an account with its forum profile.
///
/// Returns the stored profile; the caller logs the new account in.
pub fn register<R>(payload: RegisterFormPayload, repo: &R) -> ServiceResult<UserProfile>
where
    R: UserReader + UserWriter,
{
    match repo.get_account_by_email(&payload.email) {
        Ok(None) => {}
        Ok(Some(_)) => {
            return Err(ServiceError::Conflict {
                message: "Email is already registered".to_string(),
                code: "UNIQUE",
            });
        }
        Err(e) => return Err(read_error("look up account", e)),
    }

    match repo.get_profile_by_username(&payload.username) {
        Ok(None) => {}
        Ok(Some(_)) => {
            return Err(ServiceError::Conflict {
                message: "Username is already taken".to_string(),
                code: "UNIQUE",
            });
        }
        Err(e) => return Err(read_error("look up profile", e)),
    }

    let password_hash = hash_password(&payload.password).map_err(|e| {
        log::error!("Failed to hash password: {e}");
        ServiceError::Internal
    })?;

    let now = Utc::now().naive_utc();
    let account = NewAccount {
        email: payload.email.clone(),
        password_hash,
        created_at: now,
    };
    let profile = NewUserProfile {
        username: payload.username,
        email: payload.email,
        avatar_url: None,
        bio: None,
        created_at: now,
    };

    let (_, profile) = repo
        .create_account(&account, &profile)
        .map_err(|e| write_error("create account", e))?;

    log::info!("Registered user {} (profile {})", profile.username, profile.id);
    Ok(profile)
}

/// Check credentials and return the profile to log in as.
///
/// Unknown emails and wrong passwords are indistinguishable to the caller.
pub fn login<R>(payload: LoginFormPayload, repo: &R) -> ServiceResult<UserProfile>
where
    R: UserReader,
{
    let account = match repo.get_account_by_email(&payload.email) {
        Ok(Some(account)) => account,
        Ok(None) => {
            log::warn!("Login attempt for unknown email {}", payload.email);
            return Err(ServiceError::Unauthorized);
        }
        Err(e) => return Err(read_error("look up account", e)),
    };

    if !verify_password(&payload.password, &account.password_hash) {
        log::warn!("Wrong password for account {}", account.id);
        return Err(ServiceError::Unauthorized);
    }

    match repo.get_profile_by_account_id(account.id) {
        Ok(Some(profile)) => Ok(profile),
        Ok(None) => {
            log::error!("Account {} has no forum profile", account.id);
            Err(ServiceError::Internal)
        }
        Err(e) => Err(read_error("load profile", e)),
    }
}

/// Profile of the calling user.
pub fn me<R>(auth: &AuthContext, repo: &R) -> ServiceResult<UserDto>
where
    R: UserReader,
{
    let user = current_user(auth, repo)?;
    match repo.get_profile_by_id(user.profile_id) {
        Ok(Some(profile)) => Ok(profile.into()),
        Ok(None) => Err(ServiceError::Unauthorized),
        Err(e) => Err(read_error("load profile", e)),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::types::{Email, Username};
    use crate::repository::test::TestRepository;

    pub(crate) fn register_user(repo: &TestRepository, name: &str) -> AuthContext {
        let profile = register(
            RegisterFormPayload {
                email: Email::new(format!("{name}@example.com")).unwrap(),
                username: Username::new(name).unwrap(),
                password: "password123".to_string(),
            },
            repo,
        )
        .unwrap();
        AuthContext::for_account(profile.auth_user_id)
    }

    fn login_payload(email: &str, password: &str) -> LoginFormPayload {
        LoginFormPayload {
            email: Email::new(email).unwrap(),
            password: password.to_string(),
        }
    }

    #[test]
    fn current_user_resolves_profile_id() {
        let repo = TestRepository::new();
        let auth = register_user(&repo, "alice");

        let user = current_user(&auth, &repo).unwrap();

        assert_eq!(user.username.as_str(), "alice");
        assert_ne!(user.profile_id.get(), user.account_id.get());
    }

    #[test]
    fn anonymous_callers_are_unauthorized() {
        let repo = TestRepository::new();
        assert_eq!(
            current_user(&AuthContext::anonymous(), &repo).unwrap_err(),
            ServiceError::Unauthorized
        );
        assert_eq!(optional_user(&AuthContext::anonymous(), &repo), Ok(None));
    }

    #[test]
    fn duplicate_email_or_username_conflicts() {
        let repo = TestRepository::new();
        register_user(&repo, "alice");

        let same_email = register(
            RegisterFormPayload {
                email: Email::new("alice@example.com").unwrap(),
                username: Username::new("alice2").unwrap(),
                password: "password123".to_string(),
            },
            &repo,
        );
        assert!(matches!(same_email, Err(ServiceError::Conflict { .. })));

        let same_name = register(
            RegisterFormPayload {
                email: Email::new("other@example.com").unwrap(),
                username: Username::new("alice").unwrap(),
                password: "password123".to_string(),
            },
            &repo,
        );
        assert!(matches!(same_name, Err(ServiceError::Conflict { .. })));
    }

    #[test]
    fn login_checks_password() {
        let repo = TestRepository::new();
        register_user(&repo, "alice");

        let profile = login(login_payload("alice@example.com", "password123"), &repo).unwrap();
        assert_eq!(profile.username.as_str(), "alice");

        assert_eq!(
            login(login_payload("alice@example.com", "wrong-password"), &repo).unwrap_err(),
            ServiceError::Unauthorized
        );
        assert_eq!(
            login(login_payload("nobody@example.com", "password123"), &repo).unwrap_err(),
            ServiceError::Unauthorized
        );
    }

    #[test]
    fn me_returns_own_profile() {
        let repo = TestRepository::new();
        let auth = register_user(&repo, "alice");

        let dto = me(&auth, &repo).unwrap();

        assert_eq!(dto.username, "alice");
        assert_eq!(dto.email, "alice@example.com");
    }
}
