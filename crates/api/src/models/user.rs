//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use rentmyfit_core::{Cart, Email, Role, UserId, Wishlist};

/// An account record, cart and wishlist included.
///
/// The password hash is deliberately not part of this type; it is only ever
/// read alongside a `User` by the login path.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
    pub profile_image: String,
    pub mobile: String,
    pub gender: String,
    pub address: String,
    pub wishlist: Wishlist,
    pub cart: Cart,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public identity returned by registration.
#[derive(Debug, Clone, Serialize)]
pub struct AccountSummary {
    pub id: UserId,
    pub email: Email,
    pub role: Role,
}

impl From<&User> for AccountSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Profile snapshot returned with a fresh token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginProfile {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
    pub profile_image: String,
    pub mobile: String,
    pub gender: String,
    pub address: String,
    pub wishlist: Wishlist,
}

impl From<User> for LoginProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            profile_image: user.profile_image,
            mobile: user.mobile,
            gender: user.gender,
            address: user.address,
            wishlist: user.wishlist,
        }
    }
}

/// A validated partial profile update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub password_hash: Option<String>,
    pub profile_image: Option<String>,
    pub mobile: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
}

impl ProfileUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
            && self.profile_image.is_none()
            && self.mobile.is_none()
            && self.gender.is_none()
            && self.address.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let mut wishlist = Wishlist::new();
        wishlist.add(rentmyfit_core::ProductId::new(3));
        User {
            id: UserId::new(1),
            name: "Ann".to_string(),
            email: Email::parse("ann@x.com").unwrap(),
            role: Role::User,
            profile_image: String::new(),
            mobile: "555-0100".to_string(),
            gender: String::new(),
            address: String::new(),
            wishlist,
            cart: Cart::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_profile_serializes_document_shape() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert_eq!(json["_id"], 1);
        assert_eq!(json["email"], "ann@x.com");
        assert_eq!(json["role"], "user");
        assert_eq!(json["profileImage"], "");
        assert_eq!(json["wishlist"], serde_json::json!([3]));
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
    }

    #[test]
    fn test_account_summary_shape() {
        let user = sample_user();
        let json = serde_json::to_value(AccountSummary::from(&user)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "email": "ann@x.com", "role": "user"})
        );
    }

    #[test]
    fn test_empty_update() {
        assert!(ProfileUpdate::default().is_empty());
        let update = ProfileUpdate {
            mobile: Some(String::new()),
            ..ProfileUpdate::default()
        };
        assert!(!update.is_empty());
    }
}
