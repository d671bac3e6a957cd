use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::product::models::NewProduct;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductSort;
use crate::domain::product::models::UpdateProductCommand;
use crate::domain::product::ports::ProductRepository;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::product::errors::ProductError;
use crate::user::errors::UserError;

#[derive(Debug, Default)]
struct ProductTable {
    last_id: i64,
    rows: BTreeMap<ProductId, Product>,
}

/// Process-local product store.
///
/// Every mutation holds the write lock for its whole duration, which makes
/// each operation atomic with respect to the others.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    table: Arc<RwLock<ProductTable>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(mut products: Vec<Product>, sort: ProductSort) -> Vec<Product> {
        products.sort_by(|a, b| sort.compare(a, b));
        products
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self, sort: ProductSort) -> Result<Vec<Product>, ProductError> {
        let products = self.table.read().await.rows.values().cloned().collect();
        Ok(Self::sorted(products, sort))
    }

    async fn find_by_name_containing(
        &self,
        fragment: &str,
        sort: ProductSort,
    ) -> Result<Vec<Product>, ProductError> {
        let needle = fragment.to_lowercase();
        let products = self
            .table
            .read()
            .await
            .rows
            .values()
            .filter(|p| p.name.as_str().to_lowercase().contains(&needle))
            .cloned()
            .collect();

        Ok(Self::sorted(products, sort))
    }

    async fn create(&self, product: NewProduct) -> Result<Product, ProductError> {
        let mut table = self.table.write().await;
        table.last_id += 1;

        let product = product.with_id(ProductId(table.last_id));
        table.rows.insert(product.id, product.clone());

        Ok(product)
    }

    async fn update(
        &self,
        id: ProductId,
        changes: UpdateProductCommand,
    ) -> Result<Product, ProductError> {
        let mut table = self.table.write().await;

        let stored = table.rows.get_mut(&id).ok_or(ProductError::NotFound(id))?;
        stored.apply(changes);

        Ok(stored.clone())
    }

    async fn exists_by_id(&self, id: ProductId) -> Result<bool, ProductError> {
        Ok(self.table.read().await.rows.contains_key(&id))
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<(), ProductError> {
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(ProductError::NotFound(id))
    }
}

#[derive(Debug, Default)]
struct UserTable {
    last_id: i64,
    rows: HashMap<String, User>,
}

/// Process-local credential store keyed by username.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub async fn count(&self) -> usize {
        self.table.read().await.rows.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self.table.read().await.rows.get(username.as_str()).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut table = self.table.write().await;

        if table.rows.contains_key(user.username.as_str()) {
            return Err(UserError::UsernameAlreadyExists(user.username.to_string()));
        }

        table.last_id += 1;
        let user = user.with_id(UserId(table.last_id));
        table
            .rows
            .insert(user.username.as_str().to_string(), user.clone());

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::product::models::Price;
    use crate::domain::product::models::ProductName;

    fn new_product(name: &str, price: i64) -> NewProduct {
        NewProduct {
            name: ProductName::new(name.to_string()).unwrap(),
            description: None,
            price: Price::new(Decimal::new(price, 0)).unwrap(),
            stock_quantity: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repository = InMemoryProductRepository::new();

        let first = repository.create(new_product("Lápis", 2)).await.unwrap();
        let second = repository.create(new_product("Caderno", 15)).await.unwrap();

        assert_eq!(first.id, ProductId(1));
        assert_eq!(second.id, ProductId(2));
    }

    #[tokio::test]
    async fn test_find_by_name_containing_ignores_case() {
        let repository = InMemoryProductRepository::new();
        repository.create(new_product("Caneta Azul", 3)).await.unwrap();
        repository.create(new_product("caneta preta", 4)).await.unwrap();
        repository.create(new_product("Borracha", 1)).await.unwrap();

        let found = repository
            .find_by_name_containing("CANETA", ProductSort::ByPriceDesc)
            .await
            .unwrap();

        let names: Vec<_> = found.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["caneta preta", "Caneta Azul"]);
    }

    #[tokio::test]
    async fn test_update_applies_changes_in_place() {
        let repository = InMemoryProductRepository::new();
        let created = repository.create(new_product("Caderno", 15)).await.unwrap();

        let updated = repository
            .update(
                created.id,
                UpdateProductCommand {
                    name: Some(ProductName::new("Caderno Espiral".to_string()).unwrap()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name.as_str(), "Caderno Espiral");
        assert_eq!(updated.price, created.price);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(
            repository.find_by_id(created.id).await.unwrap(),
            Some(updated)
        );
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let repository = InMemoryProductRepository::new();

        let result = repository
            .update(ProductId(5), UpdateProductCommand::default())
            .await;
        assert!(matches!(result, Err(ProductError::NotFound(ProductId(5)))));
    }

    #[tokio::test]
    async fn test_delete_missing_product() {
        let repository = InMemoryProductRepository::new();

        let result = repository.delete_by_id(ProductId(99)).await;
        assert!(matches!(result, Err(ProductError::NotFound(ProductId(99)))));
    }

    #[tokio::test]
    async fn test_user_create_rejects_duplicate_username() {
        let repository = InMemoryUserRepository::new();
        let user = NewUser {
            username: Username::new("alice".to_string()).unwrap(),
            password_hash: "hash".to_string(),
        };

        repository.create(user.clone()).await.unwrap();
        let result = repository.create(user).await;

        assert!(matches!(result, Err(UserError::UsernameAlreadyExists(_))));
        assert_eq!(repository.count().await, 1);
    }
}
