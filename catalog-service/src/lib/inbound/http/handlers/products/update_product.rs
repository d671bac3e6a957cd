use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::parse_product_id;
use super::ProductData;
use crate::domain::product::models::Description;
use crate::domain::product::models::Price;
use crate::domain::product::models::ProductName;
use crate::domain::product::models::StockQuantity;
use crate::domain::product::models::UpdateProductCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::product::errors::ProductError;

/// HTTP request body for updating a product (raw JSON)
///
/// Absent and `null` fields are both left untouched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
}

impl UpdateProductRequest {
    fn try_into_command(self) -> Result<UpdateProductCommand, ProductError> {
        Ok(UpdateProductCommand {
            name: self.name.map(ProductName::new).transpose()?,
            description: self.description.map(Description::new).transpose()?,
            price: self.price.map(Price::new).transpose()?,
            stock_quantity: self.stock_quantity.map(StockQuantity::new).transpose()?,
        })
    }
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    body: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let product_id = parse_product_id(&product_id)?;
    let Json(body) = body?;
    let command = body.try_into_command()?;

    state
        .product_service
        .update_product(product_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::OK, product.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_fields_are_not_provided() {
        let request: UpdateProductRequest =
            serde_json::from_str(r#"{"price":25.5,"description":null}"#).unwrap();

        let command = request.try_into_command().unwrap();
        assert!(command.name.is_none());
        assert!(command.description.is_none());
        assert_eq!(command.price.map(|p| p.amount()), Some(Decimal::new(255, 1)));
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let request: UpdateProductRequest = serde_json::from_str(r#"{"price":-1}"#).unwrap();

        assert!(matches!(
            request.try_into_command(),
            Err(ProductError::InvalidPrice(_))
        ));
    }
}
