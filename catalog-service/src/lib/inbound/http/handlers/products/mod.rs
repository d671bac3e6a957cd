use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::inbound::http::handlers::ApiError;

pub mod create_product;
pub mod delete_product;
pub mod get_product;
pub mod list_products;
pub mod update_product;

/// Product representation returned by every product endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock_quantity: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<&Product> for ProductData {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.0,
            name: product.name.as_str().to_string(),
            description: product.description.as_ref().map(|d| d.as_str().to_string()),
            price: product.price.amount(),
            stock_quantity: product.stock_quantity.map(|q| q.value()),
            created_at: product.created_at,
        }
    }
}

fn parse_product_id(raw: &str) -> Result<ProductId, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map(ProductId)
        .map_err(|_| ApiError::BadRequest(format!("Invalid product id: {}", raw)))
}
