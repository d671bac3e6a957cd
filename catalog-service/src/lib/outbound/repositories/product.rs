use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::product::models::Description;
use crate::domain::product::models::NewProduct;
use crate::domain::product::models::Price;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductName;
use crate::domain::product::models::ProductSort;
use crate::domain::product::models::StockQuantity;
use crate::domain::product::models::UpdateProductCommand;
use crate::domain::product::ports::ProductRepository;
use crate::product::errors::ProductError;

const SELECT_COLUMNS: &str =
    "SELECT id, name, description, price, stock_quantity, creation_date FROM products";

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: Option<String>,
    price: Decimal,
    stock_quantity: Option<i32>,
    creation_date: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = ProductError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Product {
            id: ProductId(row.id),
            name: ProductName::new(row.name)?,
            description: row.description.map(Description::new).transpose()?,
            price: Price::new(row.price)?,
            stock_quantity: row.stock_quantity.map(StockQuantity::new).transpose()?,
            created_at: row.creation_date,
        })
    }
}

fn order_by(sort: ProductSort) -> &'static str {
    match sort {
        // Byte-wise collation, matching the in-memory ordering.
        ProductSort::ByNameAsc => r#"ORDER BY name COLLATE "C" ASC, id ASC"#,
        ProductSort::ByPriceAsc => "ORDER BY price ASC, id ASC",
        ProductSort::ByPriceDesc => "ORDER BY price DESC, id ASC",
    }
}

fn database_error(e: sqlx::Error) -> ProductError {
    ProductError::DatabaseError(e.to_string())
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.map(Product::try_from).transpose()
    }

    async fn find_all(&self, sort: ProductSort) -> Result<Vec<Product>, ProductError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!("{SELECT_COLUMNS} {}", order_by(sort)))
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn find_by_name_containing(
        &self,
        fragment: &str,
        sort: ProductSort,
    ) -> Result<Vec<Product>, ProductError> {
        // strpos keeps '%' and '_' in the fragment literal, unlike LIKE.
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "{SELECT_COLUMNS} WHERE strpos(lower(name), lower($1)) > 0 {}",
            order_by(sort)
        ))
        .bind(fragment)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn create(&self, product: NewProduct) -> Result<Product, ProductError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO products (name, description, price, stock_quantity, creation_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(product.name.as_str())
        .bind(product.description.as_ref().map(Description::as_str))
        .bind(product.price.amount())
        .bind(product.stock_quantity.map(|q| q.value()))
        .bind(product.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        tracing::debug!(product_id = id, "Product row inserted");

        Ok(product.with_id(ProductId(id)))
    }

    async fn update(
        &self,
        id: ProductId,
        changes: UpdateProductCommand,
    ) -> Result<Product, ProductError> {
        // Single statement: absent fields fall back to the stored value and
        // creation_date is never part of the SET list.
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            UPDATE products
            SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                stock_quantity = COALESCE($5, stock_quantity)
            WHERE id = $1
            RETURNING id, name, description, price, stock_quantity, creation_date
            "#,
        )
        .bind(id.0)
        .bind(changes.name.as_ref().map(ProductName::as_str))
        .bind(changes.description.as_ref().map(Description::as_str))
        .bind(changes.price.map(|p| p.amount()))
        .bind(changes.stock_quantity.map(|q| q.value()))
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .ok_or(ProductError::NotFound(id))?;

        Product::try_from(row)
    }

    async fn exists_by_id(&self, id: ProductId) -> Result<bool, ProductError> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM products WHERE id = $1)")
            .bind(id.0)
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<(), ProductError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_by_breaks_ties_by_id() {
        assert_eq!(
            order_by(ProductSort::ByNameAsc),
            r#"ORDER BY name COLLATE "C" ASC, id ASC"#
        );
        assert_eq!(
            order_by(ProductSort::ByPriceDesc),
            "ORDER BY price DESC, id ASC"
        );
    }

    #[test]
    fn test_row_conversion_rejects_invalid_price() {
        let row = ProductRow {
            id: 1,
            name: "Produto X".to_string(),
            description: None,
            price: Decimal::ZERO,
            stock_quantity: Some(5),
            creation_date: Utc::now(),
        };

        assert!(matches!(
            Product::try_from(row),
            Err(ProductError::InvalidPrice(_))
        ));
    }
}
