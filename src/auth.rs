//! Session identity and password hashing.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::domain::types::{AccountId, PasswordHash};

/// Who is calling, as far as the session cookie says.
///
/// Carries only the authentication identity; services resolve it to a
/// forum profile before writing anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthContext {
    account_id: Option<AccountId>,
}

impl AuthContext {
    /// A caller without a session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A caller logged in as `account_id`.
    pub fn for_account(account_id: AccountId) -> Self {
        Self {
            account_id: Some(account_id),
        }
    }

    pub fn account_id(&self) -> Option<AccountId> {
        self.account_id
    }
}

impl FromRequest for AuthContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // A missing or unreadable identity is an anonymous caller, not an error.
        let account_id = req
            .get_identity()
            .ok()
            .and_then(|identity| identity.id().ok())
            .and_then(|id| id.parse::<i32>().ok())
            .and_then(|id| AccountId::new(id).ok());

        ready(Ok(Self { account_id }))
    }
}

/// Hash `password` with Argon2id and a random salt into a PHC string.
pub fn hash_password(password: &str) -> Result<PasswordHash, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let encoded = Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string();
    PasswordHash::new(encoded).map_err(|_| password_hash::Error::PhcStringField)
}

/// Check `password` against a stored PHC string. Malformed hashes never verify.
pub fn verify_password(password: &str, hash: &PasswordHash) -> bool {
    match password_hash::PasswordHash::new(hash.as_str()) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            log::error!("Stored password hash is malformed: {e}");
            false
        }
    }
}
