//! Account roles.

use serde::{Deserialize, Serialize};

use crate::Email;

/// The one email address that is granted [`Role::Admin`] at registration.
///
/// Every other account starts as [`Role::User`]. There is no promotion
/// endpoint; the role column can only be changed by an operator.
pub const BOOTSTRAP_ADMIN_EMAIL: &str = "admin@rentmyfit.com";

/// Error returned when a stored or claimed role is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid role: {0}")]
pub struct RoleError(pub String);

/// Role carried by an account and embedded in its identity token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Role assigned to a freshly registered account.
    #[must_use]
    pub fn for_new_account(email: &Email) -> Self {
        if email.as_str() == BOOTSTRAP_ADMIN_EMAIL {
            Self::Admin
        } else {
            Self::User
        }
    }

    /// Storage / wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(RoleError(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_email_is_admin() {
        let email = Email::parse(BOOTSTRAP_ADMIN_EMAIL).unwrap();
        assert_eq!(Role::for_new_account(&email), Role::Admin);
    }

    #[test]
    fn test_other_emails_are_users() {
        let email = Email::parse("ann@x.com").unwrap();
        assert_eq!(Role::for_new_account(&email), Role::User);

        // Exact match only
        let email = Email::parse("Admin@rentmyfit.com").unwrap();
        assert_eq!(Role::for_new_account(&email), Role::User);
    }

    #[test]
    fn test_role_round_trips_through_str() {
        for role in [Role::User, Role::Admin] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
        assert!("root".parse::<Role>().is_err());
    }
}
