//! Product repository for catalog operations.

use sqlx::PgPool;

use rentmyfit_core::ProductId;

use super::RepositoryError;
use crate::models::product::{NewProduct, Product, ProductUpdate};

macro_rules! product_columns {
    () => {
        "id, name, category, sizes, price, image, availability, description, created_at, updated_at"
    };
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(concat!(
            "SELECT ",
            product_columns!(),
            " FROM products ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(concat!(
            "SELECT ",
            product_columns!(),
            " FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Fetch every product in `ids` that still exists, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = ids.iter().map(ProductId::as_i32).collect();
        let products = sqlx::query_as::<_, Product>(concat!(
            "SELECT ",
            product_columns!(),
            " FROM products WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Insert a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let created = sqlx::query_as::<_, Product>(concat!(
            r"
            INSERT INTO products (name, category, sizes, price, image, availability, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING ",
            product_columns!()
        ))
        .bind(&product.name)
        .bind(&product.category)
        .bind(&product.sizes)
        .bind(product.price)
        .bind(&product.image)
        .bind(product.availability)
        .bind(&product.description)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    /// Apply a partial update. Returns `None` if the product does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update(
        &self,
        id: ProductId,
        update: &ProductUpdate,
    ) -> Result<Option<Product>, RepositoryError> {
        let updated = sqlx::query_as::<_, Product>(concat!(
            r"
            UPDATE products SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                sizes = COALESCE($4, sizes),
                price = COALESCE($5, price),
                image = COALESCE($6, image),
                availability = COALESCE($7, availability),
                description = COALESCE($8, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING ",
            product_columns!()
        ))
        .bind(id)
        .bind(update.name.as_deref())
        .bind(update.category.as_deref())
        .bind(update.sizes.as_deref())
        .bind(update.price)
        .bind(update.image.as_deref())
        .bind(update.availability)
        .bind(update.description.as_deref())
        .fetch_optional(self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete a product. Returns whether a row was removed.
    ///
    /// Carts, wishlists and orders that reference the product are left as
    /// they are; readers treat the reference as dangling.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
