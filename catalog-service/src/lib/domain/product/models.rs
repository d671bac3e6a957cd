use std::cmp::Ordering;
use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::product::errors::DescriptionError;
use crate::product::errors::PriceError;
use crate::product::errors::ProductNameError;
use crate::product::errors::StockQuantityError;

/// Product aggregate entity.
///
/// `id` is assigned by the store and `created_at` by the service at creation;
/// neither changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub description: Option<Description>,
    pub price: Price,
    pub stock_quantity: Option<StockQuantity>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Overwrite the fields present in `changes`; id and creation time stay.
    pub fn apply(&mut self, changes: UpdateProductCommand) {
        if let Some(name) = changes.name {
            self.name = name;
        }

        if let Some(description) = changes.description {
            self.description = Some(description);
        }

        if let Some(price) = changes.price {
            self.price = price;
        }

        if let Some(stock_quantity) = changes.stock_quantity {
            self.stock_quantity = Some(stock_quantity);
        }
    }
}

/// Product unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Product name value type
///
/// Must contain at least one non-whitespace character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductName(String);

impl ProductName {
    const MAX_LENGTH: usize = 255;

    /// Create a new valid product name.
    ///
    /// # Errors
    /// * `Blank` - Name is empty or whitespace only
    /// * `TooLong` - Name longer than 255 characters
    pub fn new(name: String) -> Result<Self, ProductNameError> {
        if name.trim().is_empty() {
            return Err(ProductNameError::Blank);
        }

        let length = name.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(ProductNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Free-text product description, at most 1000 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    const MAX_LENGTH: usize = 1000;

    pub fn new(description: String) -> Result<Self, DescriptionError> {
        let length = description.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(DescriptionError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(description))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unit price, strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price(Decimal);

impl Price {
    /// Create a new valid price.
    ///
    /// # Errors
    /// * `NotPositive` - Price is zero or negative
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount <= Decimal::ZERO {
            return Err(PriceError::NotPositive(amount.to_string()));
        }

        Ok(Self(amount))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

/// Units in stock, strictly positive when recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockQuantity(i32);

impl StockQuantity {
    pub fn new(quantity: i32) -> Result<Self, StockQuantityError> {
        if quantity <= 0 {
            return Err(StockQuantityError::NotPositive(quantity));
        }

        Ok(Self(quantity))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

/// Product ready to be inserted; the store assigns its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: ProductName,
    pub description: Option<Description>,
    pub price: Price,
    pub stock_quantity: Option<StockQuantity>,
    pub created_at: DateTime<Utc>,
}

impl NewProduct {
    /// Attach the identifier assigned by the store.
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            stock_quantity: self.stock_quantity,
            created_at: self.created_at,
        }
    }
}

/// Command to create a new product with domain types
#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub name: ProductName,
    pub description: Option<Description>,
    pub price: Price,
    pub stock_quantity: Option<StockQuantity>,
}

impl CreateProductCommand {
    pub fn new(
        name: ProductName,
        description: Option<Description>,
        price: Price,
        stock_quantity: Option<StockQuantity>,
    ) -> Self {
        Self {
            name,
            description,
            price,
            stock_quantity,
        }
    }
}

/// Command to update an existing product with optional validated fields.
///
/// All fields are optional to support partial updates.
/// Only provided fields will be updated; `None` means "not provided" and
/// there is no way to clear an optional field.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductCommand {
    pub name: Option<ProductName>,
    pub description: Option<Description>,
    pub price: Option<Price>,
    pub stock_quantity: Option<StockQuantity>,
}

/// Ordering applied to product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    #[default]
    ByNameAsc,
    ByPriceAsc,
    ByPriceDesc,
}

impl ProductSort {
    /// Map the raw `sort` query value onto a sort order.
    ///
    /// Recognizes exactly `preco,asc` and `preco,desc`, ignoring case only.
    /// Anything else, including no value at all, falls back to name ascending.
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw.map(str::to_ascii_lowercase).as_deref() {
            Some("preco,asc") => ProductSort::ByPriceAsc,
            Some("preco,desc") => ProductSort::ByPriceDesc,
            _ => ProductSort::ByNameAsc,
        }
    }

    /// Compare two products under this ordering, ties broken by id.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let primary = match self {
            ProductSort::ByNameAsc => a.name.as_str().cmp(b.name.as_str()),
            ProductSort::ByPriceAsc => a.price.cmp(&b.price),
            ProductSort::ByPriceDesc => b.price.cmp(&a.price),
        };

        primary.then_with(|| a.id.cmp(&b.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, price: Decimal) -> Product {
        Product {
            id: ProductId(id),
            name: ProductName::new(name.to_string()).unwrap(),
            description: None,
            price: Price::new(price).unwrap(),
            stock_quantity: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_product_name_rejects_blank() {
        assert_eq!(
            ProductName::new("   ".to_string()),
            Err(ProductNameError::Blank)
        );
        assert_eq!(ProductName::new(String::new()), Err(ProductNameError::Blank));
        assert!(ProductName::new("Produto X".to_string()).is_ok());
    }

    #[test]
    fn test_description_length_limit() {
        assert!(Description::new("a".repeat(1000)).is_ok());
        assert_eq!(
            Description::new("a".repeat(1001)),
            Err(DescriptionError::TooLong {
                max: 1000,
                actual: 1001
            })
        );
    }

    #[test]
    fn test_price_must_be_positive() {
        assert!(Price::new(Decimal::new(1000, 2)).is_ok());
        assert!(Price::new(Decimal::ZERO).is_err());
        assert!(Price::new(Decimal::new(-5, 0)).is_err());
    }

    #[test]
    fn test_stock_quantity_must_be_positive() {
        assert!(StockQuantity::new(5).is_ok());
        assert_eq!(
            StockQuantity::new(0),
            Err(StockQuantityError::NotPositive(0))
        );
        assert!(StockQuantity::new(-1).is_err());
    }

    #[test]
    fn test_apply_changes_only_provided_fields() {
        let mut stored = product(7, "Caderno", Decimal::new(1590, 2));
        stored.stock_quantity = Some(StockQuantity::new(10).unwrap());
        let before = stored.clone();

        stored.apply(UpdateProductCommand {
            price: Some(Price::new(Decimal::new(1250, 2)).unwrap()),
            ..Default::default()
        });

        assert_eq!(stored.price.amount(), Decimal::new(1250, 2));
        assert_eq!(stored.id, before.id);
        assert_eq!(stored.name, before.name);
        assert_eq!(stored.description, before.description);
        assert_eq!(stored.stock_quantity, before.stock_quantity);
        assert_eq!(stored.created_at, before.created_at);
    }

    #[test]
    fn test_sort_from_query() {
        assert_eq!(ProductSort::from_query(None), ProductSort::ByNameAsc);
        assert_eq!(
            ProductSort::from_query(Some("preco,asc")),
            ProductSort::ByPriceAsc
        );
        assert_eq!(
            ProductSort::from_query(Some("PRECO,DESC")),
            ProductSort::ByPriceDesc
        );
        assert_eq!(
            ProductSort::from_query(Some("price,desc")),
            ProductSort::ByNameAsc
        );
        assert_eq!(ProductSort::from_query(Some("")), ProductSort::ByNameAsc);
        assert_eq!(
            ProductSort::from_query(Some(" preco,desc")),
            ProductSort::ByNameAsc
        );
    }

    #[test]
    fn test_sort_compare() {
        let mut products = vec![
            product(1, "Caneta", Decimal::new(250, 2)),
            product(2, "Borracha", Decimal::new(100, 2)),
            product(3, "Apontador", Decimal::new(500, 2)),
        ];

        products.sort_by(|a, b| ProductSort::ByNameAsc.compare(a, b));
        let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Apontador", "Borracha", "Caneta"]);

        products.sort_by(|a, b| ProductSort::ByPriceDesc.compare(a, b));
        let ids: Vec<_> = products.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);

        products.sort_by(|a, b| ProductSort::ByPriceAsc.compare(a, b));
        let ids: Vec<_> = products.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }
}
