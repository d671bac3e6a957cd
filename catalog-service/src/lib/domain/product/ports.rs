use async_trait::async_trait;

use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::NewProduct;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductSort;
use crate::domain::product::models::UpdateProductCommand;
use crate::product::errors::ProductError;

/// Port for product domain service operations.
#[async_trait]
pub trait ProductServicePort: Send + Sync + 'static {
    /// List products, optionally filtered by name.
    ///
    /// # Arguments
    /// * `name_filter` - Case-insensitive name fragment; blank values are ignored
    /// * `sort` - Ordering of the result
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_products(
        &self,
        name_filter: Option<&str>,
        sort: ProductSort,
    ) -> Result<Vec<Product>, ProductError>;

    /// Retrieve product by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_product(&self, id: ProductId) -> Result<Product, ProductError>;

    /// Create a new product, stamping its creation time.
    ///
    /// # Arguments
    /// * `command` - Validated command with the product fields
    ///
    /// # Returns
    /// Created product with store-assigned id
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_product(&self, command: CreateProductCommand)
        -> Result<Product, ProductError>;

    /// Update existing product with the provided fields only.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_product(
        &self,
        id: ProductId,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError>;

    /// Delete existing product.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_product(&self, id: ProductId) -> Result<(), ProductError>;
}

/// Persistence operations for product aggregate.
#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    /// Retrieve product by identifier.
    ///
    /// # Returns
    /// Optional product entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductError>;

    /// Retrieve all products in the given order.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_all(&self, sort: ProductSort) -> Result<Vec<Product>, ProductError>;

    /// Retrieve products whose name contains `fragment`, ignoring case.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_name_containing(
        &self,
        fragment: &str,
        sort: ProductSort,
    ) -> Result<Vec<Product>, ProductError>;

    /// Persist new product to storage.
    ///
    /// # Returns
    /// Stored product with its assigned id
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, product: NewProduct) -> Result<Product, ProductError>;

    /// Apply the provided fields to an existing product as one atomic step.
    ///
    /// Fields left `None` keep their stored value; the creation time is
    /// never touched.
    ///
    /// # Returns
    /// Product as stored after the update
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(
        &self,
        id: ProductId,
        changes: UpdateProductCommand,
    ) -> Result<Product, ProductError>;

    /// Check whether a product exists.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn exists_by_id(&self, id: ProductId) -> Result<bool, ProductError>;

    /// Remove product from storage.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_by_id(&self, id: ProductId) -> Result<(), ProductError>;
}
