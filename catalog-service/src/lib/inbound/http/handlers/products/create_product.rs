use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Extension;
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::ProductData;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Description;
use crate::domain::product::models::Price;
use crate::domain::product::models::ProductName;
use crate::domain::product::models::StockQuantity;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::product::errors::ProductError;

/// HTTP request body for creating a product (raw JSON)
///
/// Required fields are optional here so that a missing one is reported as a
/// validation error instead of a deserialization failure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
}

impl CreateProductRequest {
    fn try_into_command(self) -> Result<CreateProductCommand, ApiError> {
        let name = self
            .name
            .ok_or_else(|| ApiError::BadRequest("name is required".to_string()))?;
        let price = self
            .price
            .ok_or_else(|| ApiError::BadRequest("price is required".to_string()))?;

        let name = ProductName::new(name).map_err(ProductError::from)?;
        let description = self
            .description
            .map(Description::new)
            .transpose()
            .map_err(ProductError::from)?;
        let price = Price::new(price).map_err(ProductError::from)?;
        let stock_quantity = self
            .stock_quantity
            .map(StockQuantity::new)
            .transpose()
            .map_err(ProductError::from)?;

        Ok(CreateProductCommand::new(
            name,
            description,
            price,
            stock_quantity,
        ))
    }
}

pub async fn create_product(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    body: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let Json(body) = body?;
    let command = body.try_into_command()?;
    tracing::debug!(username = %caller.username, name = %command.name, "Create product requested");

    state
        .product_service
        .create_product(command)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::CREATED, product.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_camel_case_fields() {
        let request: CreateProductRequest = serde_json::from_str(
            r#"{"name":"Produto X","price":10.0,"stockQuantity":5}"#,
        )
        .unwrap();

        let command = request.try_into_command().unwrap();
        assert_eq!(command.name.as_str(), "Produto X");
        assert_eq!(command.price.amount(), Decimal::new(10, 0));
        assert_eq!(command.stock_quantity.map(|q| q.value()), Some(5));
        assert!(command.description.is_none());
    }

    #[test]
    fn test_request_without_price_is_rejected() {
        let request: CreateProductRequest =
            serde_json::from_str(r#"{"name":"Produto X"}"#).unwrap();

        assert_eq!(
            request.try_into_command().unwrap_err(),
            ApiError::BadRequest("price is required".to_string())
        );
    }

    #[test]
    fn test_request_with_zero_stock_is_rejected() {
        let request: CreateProductRequest =
            serde_json::from_str(r#"{"name":"Produto X","price":"1.50","stockQuantity":0}"#)
                .unwrap();

        assert!(matches!(
            request.try_into_command(),
            Err(ApiError::BadRequest(_))
        ));
    }
}
