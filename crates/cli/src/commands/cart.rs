//! Replay cart actions against a freshly loaded catalog.

use tracing::{info, warn};

use motoshop_storefront::{CartAction, CartContext, CatalogConfig, Storefront};

/// Load the catalog, apply `actions` in order, and log the final snapshot.
///
/// Rejected actions are logged and skipped unless `strict` is set.
///
/// # Errors
///
/// Returns an error if the catalog URL is invalid, or in strict mode the
/// first rejected action.
pub async fn replay(
    config: &CatalogConfig,
    actions: &[CartAction],
    strict: bool,
) -> motoshop_storefront::Result<()> {
    let mut storefront = Storefront::from_config(config)?;

    storefront.load_catalog().await;
    {
        let catalog = storefront.catalog();
        if let Some(message) = catalog.error() {
            warn!("Catalog unavailable: {message}");
        } else {
            info!(
                products = catalog.products().len(),
                loaded_at = ?catalog.loaded_at(),
                "Catalog ready"
            );
        }
    }

    for action in actions {
        if let Err(e) = storefront.dispatch(*action) {
            if strict {
                return Err(e.into());
            }
            warn!(action = %action, "Skipping action: {e}");
        }
    }

    let ctx = storefront.snapshot();
    for item in &ctx.items {
        info!(
            id = %item.id,
            quantity = item.quantity,
            line_total = %item.line_total(),
            "{}",
            item.title
        );
    }
    info!(
        lines = ctx.items.len(),
        units = storefront.cart().item_count(),
        total = %ctx.total,
        "Cart total"
    );

    match render_snapshot(&ctx) {
        Ok(json) => info!(snapshot = %json, "Cart snapshot"),
        Err(e) => warn!("Could not serialize cart snapshot: {e}"),
    }

    Ok(())
}

/// The full snapshot as one JSON line, with the field names the UI reads.
fn render_snapshot(ctx: &CartContext) -> serde_json::Result<String> {
    serde_json::to_string(ctx)
}
