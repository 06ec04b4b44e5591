//! User repository for database operations.
//!
//! The wishlist and cart live on the user row. Read-modify-write changes to
//! either go through [`UserRepository::update_cart`] or
//! [`UserRepository::update_wishlist`], which hold a row lock for the whole
//! cycle so concurrent requests for the same user cannot lose each other's
//! writes.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use rentmyfit_core::{Cart, Email, ProductId, Role, UserId, Wishlist};

use super::RepositoryError;
use crate::models::user::{ProfileUpdate, User};

macro_rules! user_columns {
    () => {
        "id, name, email, password_hash, role, profile_image, mobile, gender, address, \
         wishlist, cart, created_at, updated_at"
    };
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: UserId,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    profile_image: String,
    mobile: String,
    gender: String,
    address: String,
    wishlist: Vec<i32>,
    cart: Json<Cart>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    /// Split into the domain user and the stored password hash.
    fn into_parts(self) -> Result<(User, String), RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let role = self.role.parse::<Role>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid role in database: {e}"))
        })?;

        let user = User {
            id: self.id,
            name: self.name,
            email,
            role,
            profile_image: self.profile_image,
            mobile: self.mobile,
            gender: self.gender,
            address: self.address,
            wishlist: wishlist_from_column(self.wishlist),
            cart: self.cart.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        Ok((user, self.password_hash))
    }

    fn into_user(self) -> Result<User, RepositoryError> {
        self.into_parts().map(|(user, _)| user)
    }
}

fn wishlist_from_column(ids: Vec<i32>) -> Wishlist {
    Wishlist::from_ids(ids.into_iter().map(ProductId::new))
}

fn wishlist_to_column(wishlist: &Wishlist) -> Vec<i32> {
    wishlist.ids().iter().map(ProductId::as_i32).collect()
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        sqlx::query_as::<_, UserRow>(concat!(
            "SELECT ",
            user_columns!(),
            " FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .map(UserRow::into_user)
        .transpose()
    }

    /// Get a user and their password hash by email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn get_with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        sqlx::query_as::<_, UserRow>(concat!(
            "SELECT ",
            user_columns!(),
            " FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?
        .map(UserRow::into_parts)
        .transpose()
    }

    /// Create a new account with an empty cart and wishlist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        email: &Email,
        password_hash: &str,
        role: Role,
    ) -> Result<User, RepositoryError> {
        sqlx::query_as::<_, UserRow>(concat!(
            "INSERT INTO users (name, email, password_hash, role) VALUES ($1, $2, $3, $4) RETURNING ",
            user_columns!()
        ))
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "email"))?
        .into_user()
    }

    /// Apply a partial profile update in a single statement.
    ///
    /// Returns `None` if the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the new email belongs to another account.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_profile(
        &self,
        id: UserId,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, RepositoryError> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        sqlx::query_as::<_, UserRow>(concat!(
            r"
            UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                profile_image = COALESCE($5, profile_image),
                mobile = COALESCE($6, mobile),
                gender = COALESCE($7, gender),
                address = COALESCE($8, address),
                updated_at = NOW()
            WHERE id = $1
            RETURNING ",
            user_columns!()
        ))
        .bind(id)
        .bind(update.name.as_deref())
        .bind(update.email.as_ref())
        .bind(update.password_hash.as_deref())
        .bind(update.profile_image.as_deref())
        .bind(update.mobile.as_deref())
        .bind(update.gender.as_deref())
        .bind(update.address.as_deref())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "email"))?
        .map(UserRow::into_user)
        .transpose()
    }

    /// Delete a user. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lock the user's wishlist, apply `apply`, and persist if it reports a change.
    ///
    /// Returns the resulting wishlist, or `None` if the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; nothing is
    /// written in that case.
    pub async fn update_wishlist<F>(
        &self,
        id: UserId,
        apply: F,
    ) -> Result<Option<Wishlist>, RepositoryError>
    where
        F: FnOnce(&mut Wishlist) -> bool,
    {
        let mut tx = self.pool.begin().await?;

        let row: Option<(Vec<i32>,)> =
            sqlx::query_as("SELECT wishlist FROM users WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((ids,)) = row else {
            return Ok(None);
        };

        let mut wishlist = wishlist_from_column(ids);
        if apply(&mut wishlist) {
            sqlx::query("UPDATE users SET wishlist = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(wishlist_to_column(&wishlist))
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(Some(wishlist))
    }

    /// Lock the user's cart, apply `apply`, and persist if it reports a change.
    ///
    /// An error from `apply` rolls the transaction back and is returned as is.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `apply`, or a `RepositoryError` converted
    /// into `E` if a statement fails.
    pub async fn update_cart<F, E>(&self, id: UserId, apply: F) -> Result<Option<Cart>, E>
    where
        F: FnOnce(&mut Cart) -> Result<bool, E>,
        E: From<RepositoryError>,
    {
        let mut tx = self.pool.begin().await.map_err(RepositoryError::from)?;

        let row: Option<(Json<Cart>,)> =
            sqlx::query_as("SELECT cart FROM users WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(RepositoryError::from)?;
        let Some((Json(mut cart),)) = row else {
            return Ok(None);
        };

        if apply(&mut cart)? {
            sqlx::query("UPDATE users SET cart = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(Json(&cart))
                .execute(&mut *tx)
                .await
                .map_err(RepositoryError::from)?;
        }

        tx.commit().await.map_err(RepositoryError::from)?;
        Ok(Some(cart))
    }

    /// Replace the whole cart in one statement.
    ///
    /// Returns the stored cart, or `None` if the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn replace_cart(&self, id: UserId, cart: &Cart) -> Result<Option<Cart>, RepositoryError> {
        let row: Option<(Json<Cart>,)> = sqlx::query_as(
            "UPDATE users SET cart = $2, updated_at = NOW() WHERE id = $1 RETURNING cart",
        )
        .bind(id)
        .bind(Json(cart))
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|(Json(cart),)| cart))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wishlist_column_round_trip_drops_repeats() {
        let wishlist = wishlist_from_column(vec![4, 2, 4, 9]);
        assert_eq!(wishlist_to_column(&wishlist), vec![4, 2, 9]);
    }
}
