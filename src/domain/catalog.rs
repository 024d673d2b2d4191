use {
    super::error::ReconError,
    super::money::{Currency, MoneyAmount},
    std::{future::Future, pin::Pin},
    uuid::Uuid,
};

/// Authoritative product view at pricing time. Prices and stock always come
/// from here, never from the client payload.
#[derive(Debug, Clone)]
pub struct CatalogItem {
    pub id: Uuid,
    pub name: String,
    pub unit_price: MoneyAmount,
    pub currency: Currency,
    pub stock: u32,
    pub image_url: String,
}

/// Read-only port onto the storefront's catalog.
pub trait CatalogReader: Send + Sync {
    /// Fetch the items for the given ids. Unknown ids are simply absent from
    /// the result; the caller decides whether that is an error.
    fn fetch(
        &self,
        ids: &[Uuid],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<CatalogItem>, ReconError>> + Send + '_>>;
}
