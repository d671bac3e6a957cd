use thiserror::Error;

use crate::domain::product::models::ProductId;

/// Error for ProductName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductNameError {
    #[error("Product name is required")]
    Blank,

    #[error("Product name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for Description validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DescriptionError {
    #[error("Description too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for Price validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PriceError {
    #[error("Price must be greater than zero, got {0}")]
    NotPositive(String),
}

/// Error for StockQuantity validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StockQuantityError {
    #[error("Stock quantity must be a positive number, got {0}")]
    NotPositive(i32),
}

/// Top-level error for all product-related operations
#[derive(Debug, Clone, Error)]
pub enum ProductError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid product name: {0}")]
    InvalidName(#[from] ProductNameError),

    #[error("Invalid description: {0}")]
    InvalidDescription(#[from] DescriptionError),

    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    #[error("Invalid stock quantity: {0}")]
    InvalidStockQuantity(#[from] StockQuantityError),

    // Domain-level errors
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
