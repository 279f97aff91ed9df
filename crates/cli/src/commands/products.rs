//! List the product catalog.

use tracing::info;

use motoshop_storefront::{CatalogClient, CatalogConfig};

/// Fetch the catalog and log one line per product.
///
/// Unlike the storefront loader, this surfaces the underlying fetch error.
///
/// # Errors
///
/// Returns an error if the catalog URL is invalid or the fetch fails.
pub async fn list(config: &CatalogConfig) -> motoshop_storefront::Result<()> {
    let client = CatalogClient::new(config)?;
    info!(url = %client.products_url(), "Fetching catalog...");

    let products = client.get_products().await?;

    for product in &products {
        info!(
            id = %product.id,
            price = %product.price,
            "{}",
            product.title
        );
    }
    info!(count = products.len(), "Catalog listed");

    Ok(())
}
