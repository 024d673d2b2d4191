use {
    crate::domain::catalog::{CatalogItem, CatalogReader},
    crate::domain::error::ReconError,
    crate::domain::money::{Currency, MoneyAmount},
    sqlx::PgPool,
    std::{future::Future, pin::Pin},
    uuid::Uuid,
};

/// Catalog port backed by the storefront's `products` table.
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_inner(&self, ids: &[Uuid]) -> Result<Vec<CatalogItem>, ReconError> {
        let rows = sqlx::query_as::<_, (Uuid, String, i64, String, i32, String)>(
            "SELECT id, name, unit_price, currency, stock, image_url
             FROM products WHERE id = ANY($1)",
        )
        .bind(ids.to_vec())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(id, name, unit_price, currency, stock, image_url)| {
                Ok(CatalogItem {
                    id,
                    name,
                    unit_price: MoneyAmount::new(unit_price)?,
                    currency: Currency::try_from(currency.as_str())?,
                    stock: u32::try_from(stock).unwrap_or(0),
                    image_url,
                })
            })
            .collect()
    }
}

impl CatalogReader for PgCatalog {
    fn fetch(
        &self,
        ids: &[Uuid],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<CatalogItem>, ReconError>> + Send + '_>> {
        let ids = ids.to_vec();
        Box::pin(async move { self.fetch_inner(&ids).await })
    }
}
