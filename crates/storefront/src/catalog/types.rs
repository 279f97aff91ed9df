//! Catalog domain types.

use motoshop_core::{Price, ProductId};
use serde::{Deserialize, Serialize};

/// A purchasable product as returned by the catalog API.
///
/// Read-only once fetched; a successful load replaces the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog product ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Thumbnail image URL.
    pub thumbnail: String,
    /// Long-form description.
    #[serde(default)]
    pub description: String,
}

/// Envelope of a product listing response.
///
/// The API also returns `total`, `skip` and `limit`; only the products are kept.
#[derive(Debug, Deserialize)]
pub(crate) struct ProductPage {
    pub products: Vec<Product>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_product_page_parses_api_shape() {
        let body = r#"{
            "products": [
                {
                    "id": 167,
                    "title": "300 Touring",
                    "price": 28999.99,
                    "thumbnail": "https://cdn.dummyjson.com/products/images/motorcycle/300-touring/thumbnail.png",
                    "description": "The 300 Touring is a stylish and comfortable touring motorcycle."
                }
            ],
            "total": 5,
            "skip": 0,
            "limit": 12
        }"#;

        let page: ProductPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.products.len(), 1);

        let product = &page.products[0];
        assert_eq!(product.id, ProductId::new(167));
        assert_eq!(product.title, "300 Touring");
        assert_eq!(product.price.amount(), Decimal::new(2_899_999, 2));
    }

    #[test]
    fn test_product_description_is_optional() {
        let body = r#"{"id": 1, "title": "Bike A", "price": 10, "thumbnail": "t1"}"#;
        let product: Product = serde_json::from_str(body).unwrap();
        assert!(product.description.is_empty());
    }

    #[test]
    fn test_product_page_rejects_missing_products() {
        assert!(serde_json::from_str::<ProductPage>(r#"{"total": 0}"#).is_err());
    }
}
