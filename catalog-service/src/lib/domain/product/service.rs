use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::NewProduct;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductSort;
use crate::domain::product::models::UpdateProductCommand;
use crate::product::errors::ProductError;
use crate::product::ports::ProductRepository;
use crate::product::ports::ProductServicePort;

/// Domain service implementation for product operations.
///
/// Concrete implementation of ProductServicePort with dependency injection.
pub struct ProductService<PR>
where
    PR: ProductRepository,
{
    repository: Arc<PR>,
}

impl<PR> ProductService<PR>
where
    PR: ProductRepository,
{
    /// Create a new product service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Product persistence implementation
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> ProductServicePort for ProductService<PR>
where
    PR: ProductRepository,
{
    async fn list_products(
        &self,
        name_filter: Option<&str>,
        sort: ProductSort,
    ) -> Result<Vec<Product>, ProductError> {
        // Blankness is judged on the trimmed value; the search uses it verbatim.
        match name_filter.filter(|name| !name.trim().is_empty()) {
            Some(fragment) => {
                self.repository
                    .find_by_name_containing(fragment, sort)
                    .await
            }
            None => self.repository.find_all(sort).await,
        }
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, ProductError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    async fn create_product(
        &self,
        command: CreateProductCommand,
    ) -> Result<Product, ProductError> {
        let product = NewProduct {
            name: command.name,
            description: command.description,
            price: command.price,
            stock_quantity: command.stock_quantity,
            created_at: Utc::now(),
        };

        let created = self.repository.create(product).await?;
        tracing::info!(product_id = %created.id, name = %created.name, "Product created");

        Ok(created)
    }

    async fn update_product(
        &self,
        id: ProductId,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError> {
        let updated = self.repository.update(id, command).await?;
        tracing::info!(product_id = %updated.id, "Product updated");

        Ok(updated)
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ProductError> {
        if !self.repository.exists_by_id(id).await? {
            return Err(ProductError::NotFound(id));
        }

        self.repository.delete_by_id(id).await?;
        tracing::info!(product_id = %id, "Product deleted");

        Ok(())
    }
}
