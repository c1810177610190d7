//! Catalog repository: read-only product lookups for checkout.

use std::collections::HashMap;

use sqlx::PgPool;

use smartcart_core::ProductId;

use super::RepositoryError;
use crate::models::ProductSnapshot;

/// Repository for batched catalog reads.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch a point-in-time snapshot of the given products in one query.
    ///
    /// Ids missing from the result were not found; the caller decides what
    /// that means. Duplicate ids in the input are harmless.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn snapshot(
        &self,
        ids: &[ProductId],
    ) -> Result<HashMap<ProductId, ProductSnapshot>, RepositoryError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let raw_ids: Vec<i32> = ids.iter().map(|id| id.as_i32()).collect();

        let rows = sqlx::query_as::<_, ProductSnapshot>(
            r"
            SELECT product_id AS id, name, price, seller_id
            FROM products
            WHERE product_id = ANY($1)
            ",
        )
        .bind(&raw_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|p| (p.id, p)).collect())
    }
}
