//! Tracked products repository (the local mirror).
//!
//! Each row records one remote product the merchant has imported. The only
//! cross-row invariant is uniqueness of `product_id`, enforced by the table's
//! UNIQUE constraint; concurrent conflicting writes surface as
//! [`RepositoryError::Conflict`] rather than being pre-checked in
//! application code.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tracing::instrument;

use storekeeper_core::{RemoteProductId, TrackedProductId};

use super::RepositoryError;

/// A tracked (locally mirrored) product record.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TrackedProduct {
    /// Local surrogate key.
    pub id: TrackedProductId,
    /// Remote Shopify product id (unique).
    pub product_id: RemoteProductId,
    /// Store name the product was imported under.
    pub name_store: String,
    /// Cached product description, if any.
    pub description: Option<String>,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Repository for tracked product database operations.
pub struct TrackedProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TrackedProductRepository<'a> {
    /// Create a new tracked product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new tracked product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the remote product is already
    /// tracked. Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn create(
        &self,
        product_id: &RemoteProductId,
        name_store: &str,
        description: Option<&str>,
    ) -> Result<TrackedProduct, RepositoryError> {
        let record = sqlx::query_as::<_, TrackedProduct>(
            r"
            INSERT INTO tracked_products (product_id, name_store, description)
            VALUES ($1, $2, $3)
            RETURNING id, product_id, name_store, description, created_at, updated_at
            ",
        )
        .bind(product_id)
        .bind(name_store)
        .bind(description)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("product is already tracked".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(record)
    }

    /// Overwrite a tracked product's fields by local id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no record has the given local
    /// id, `RepositoryError::Conflict` if the new `product_id` collides with
    /// another record, and `RepositoryError::Database` otherwise.
    #[instrument(skip(self), fields(id = %id, product_id = %product_id))]
    pub async fn update(
        &self,
        id: TrackedProductId,
        product_id: &RemoteProductId,
        name_store: &str,
        description: Option<&str>,
    ) -> Result<TrackedProduct, RepositoryError> {
        let record = sqlx::query_as::<_, TrackedProduct>(
            r"
            UPDATE tracked_products
            SET product_id = $2, name_store = $3, description = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, product_id, name_store, description, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(product_id)
        .bind(name_store)
        .bind(description)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict(
                    "another record already tracks that product".to_owned(),
                );
            }
            RepositoryError::Database(e)
        })?;

        record.ok_or(RepositoryError::NotFound)
    }

    /// Delete a tracked product by its remote product id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the remote product is not
    /// tracked, and `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn delete_by_remote_id(
        &self,
        product_id: &RemoteProductId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM tracked_products
            WHERE product_id = $1
            ",
        )
        .bind(product_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Get a tracked product by its remote product id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_remote_id(
        &self,
        product_id: &RemoteProductId,
    ) -> Result<Option<TrackedProduct>, RepositoryError> {
        let record = sqlx::query_as::<_, TrackedProduct>(
            r"
            SELECT id, product_id, name_store, description, created_at, updated_at
            FROM tracked_products
            WHERE product_id = $1
            ",
        )
        .bind(product_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(record)
    }

    /// List all tracked products, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<TrackedProduct>, RepositoryError> {
        let records = sqlx::query_as::<_, TrackedProduct>(
            r"
            SELECT id, product_id, name_store, description, created_at, updated_at
            FROM tracked_products
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(records)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_tracked_product_serializes_wire_names() {
        let record = TrackedProduct {
            id: TrackedProductId::new(1),
            product_id: RemoteProductId::parse("gid://shopify/Product/123").unwrap(),
            name_store: "StoreA".to_string(),
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["product_id"], "gid://shopify/Product/123");
        assert_eq!(json["name_store"], "StoreA");
        assert!(json["description"].is_null());
    }
}
