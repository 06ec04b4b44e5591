//! Account service.
//!
//! Registration, password login, profile maintenance and account deletion.
//! Passwords are stored as Argon2id PHC strings.

mod error;
pub mod token;

pub use error::AuthError;
pub use token::{Claims, TokenError, TokenService};

use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde::Deserialize;
use sqlx::PgPool;

use rentmyfit_core::{Email, Role, UserId};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::user::{ProfileUpdate, User};

/// Hash checked when the email is unknown, so both login failures cost the same.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("rentmyfit-login-timing").ok());

/// Profile fields as submitted. Absent and `null` both mean "leave as is".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub profile_image: Option<String>,
    pub mobile: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
}

impl ProfileChanges {
    /// Validate the submitted fields, hashing a new password if one is given.
    ///
    /// Optional contact fields may be cleared with an empty string; name,
    /// email and password may not.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidField` or `AuthError::InvalidEmail` for
    /// unacceptable values.
    pub fn into_update(self) -> Result<ProfileUpdate, AuthError> {
        let name = match self.name {
            Some(name) if name.trim().is_empty() => {
                return Err(AuthError::InvalidField("Name cannot be empty".to_owned()));
            }
            other => other.map(|n| n.trim().to_owned()),
        };
        let email = self.email.as_deref().map(Email::parse).transpose()?;
        let password_hash = match self.password.as_deref() {
            Some("") => {
                return Err(AuthError::InvalidField(
                    "Password cannot be empty".to_owned(),
                ));
            }
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        Ok(ProfileUpdate {
            name,
            email,
            password_hash,
            profile_image: self.profile_image,
            mobile: self.mobile,
            gender: self.gender,
            address: self.address,
        })
    }
}

/// Account service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    /// Create a new account service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, tokens: &'a TokenService) -> Self {
        Self {
            users: UserRepository::new(pool),
            tokens,
        }
    }

    /// Register a new account.
    ///
    /// The bootstrap address gets the admin role; everyone else is a user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if any field is blank.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let name = name.trim();
        if name.is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let email = Email::parse(email)?;
        let password_hash = hash_password(password)?;
        let role = Role::for_new_account(&email);

        let user = self
            .users
            .create(name, &email, &password_hash, role)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, role = %user.role, "Account registered");
        Ok(user)
    }

    /// Login with email and password, returning the user and a fresh token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is unknown or the
    /// password is wrong; the two cases are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AuthError> {
        let Ok(email) = Email::parse(email) else {
            return Err(unknown_account(password));
        };

        let Some((user, password_hash)) = self.users.get_with_password_hash(&email).await? else {
            return Err(unknown_account(password));
        };

        verify_password(password, &password_hash)?;

        let token = self.tokens.issue(user.id, user.role)?;
        Ok((user, token))
    }

    /// Get the profile of an existing user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the account no longer exists.
    pub async fn profile(&self, id: UserId) -> Result<User, AuthError> {
        self.users
            .get_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Apply validated profile changes.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the account no longer exists.
    /// Returns `AuthError::UserAlreadyExists` if the new email is taken.
    pub async fn update_profile(
        &self,
        id: UserId,
        changes: ProfileChanges,
    ) -> Result<User, AuthError> {
        let update = changes.into_update()?;

        self.users
            .update_profile(id, &update)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?
            .ok_or(AuthError::UserNotFound)
    }

    /// Delete an account. Deleting an account that is already gone succeeds.
    ///
    /// Orders that reference the account are kept.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the delete fails.
    pub async fn delete_account(&self, id: UserId) -> Result<(), AuthError> {
        if self.users.delete(id).await? {
            tracing::info!(user_id = %id, "Account deleted");
        }
        Ok(())
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

/// Spend one hash verification on a login that has no account behind it.
fn unknown_account(password: &str) -> AuthError {
    if let Some(dummy) = DUMMY_HASH.as_deref() {
        let _ = verify_password(password, dummy);
    }
    AuthError::InvalidCredentials
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_salted_phc_string() {
        let first = hash_password("pw123").unwrap();
        let second = hash_password("pw123").unwrap();

        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
        assert!(!first.contains("pw123"));
    }

    #[test]
    fn test_verify_password() {
        let hash = hash_password("pw123").unwrap();
        assert!(verify_password("pw123", &hash).is_ok());
        assert!(matches!(
            verify_password("pw124", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_against_garbage_hash() {
        assert!(matches!(
            verify_password("pw123", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_dummy_hash_is_usable() {
        let dummy = DUMMY_HASH.as_deref().unwrap();
        assert!(PasswordHash::new(dummy).is_ok());
    }

    #[test]
    fn test_unknown_account_hashes_before_failing() {
        assert!(matches!(
            unknown_account("pw123"),
            AuthError::InvalidCredentials
        ));
        assert!(LazyLock::force(&DUMMY_HASH).is_some());
    }

    #[tokio::test]
    async fn test_login_with_malformed_email_matches_unknown_account() {
        let state = crate::state::AppState::for_tests();
        let service = AuthService::new(state.pool(), state.tokens());

        let err = service.login("not-an-email", "pw123").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn test_profile_changes_empty_is_noop() {
        let update = ProfileChanges::default().into_update().unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn test_profile_changes_clear_optional_fields() {
        let changes = ProfileChanges {
            mobile: Some(String::new()),
            address: Some("12 High St".to_owned()),
            ..ProfileChanges::default()
        };
        let update = changes.into_update().unwrap();

        assert_eq!(update.mobile.as_deref(), Some(""));
        assert_eq!(update.address.as_deref(), Some("12 High St"));
        assert!(update.name.is_none());
    }

    #[test]
    fn test_profile_changes_reject_blank_name_and_password() {
        let blank_name = ProfileChanges {
            name: Some("  ".to_owned()),
            ..ProfileChanges::default()
        };
        assert!(matches!(
            blank_name.into_update(),
            Err(AuthError::InvalidField(_))
        ));

        let blank_password = ProfileChanges {
            password: Some(String::new()),
            ..ProfileChanges::default()
        };
        assert!(matches!(
            blank_password.into_update(),
            Err(AuthError::InvalidField(_))
        ));
    }

    #[test]
    fn test_profile_changes_validate_email() {
        let changes = ProfileChanges {
            email: Some("not-an-email".to_owned()),
            ..ProfileChanges::default()
        };
        assert!(matches!(
            changes.into_update(),
            Err(AuthError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_profile_changes_hash_new_password() {
        let changes = ProfileChanges {
            password: Some("new-secret".to_owned()),
            ..ProfileChanges::default()
        };
        let update = changes.into_update().unwrap();
        let hash = update.password_hash.unwrap();

        assert!(verify_password("new-secret", &hash).is_ok());
    }

    #[test]
    fn test_profile_changes_deserialize_camel_case() {
        let changes: ProfileChanges =
            serde_json::from_str(r#"{"profileImage": "a.png", "mobile": null}"#).unwrap();
        assert_eq!(changes.profile_image.as_deref(), Some("a.png"));
        assert!(changes.mobile.is_none());
    }
}
