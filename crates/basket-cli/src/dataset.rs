//! Dataset files: a product catalog plus the baskets that reference it.

use crate::error::{CliError, Result};
use basket_domain::{Item, Transaction, TransactionId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// On-disk dataset.
///
/// ```json
/// {
///   "products": [{ "id": 1, "name": "Bread", "category": "Food", "price": 15000 }],
///   "transactions": [{ "items": [1, 2] }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Product catalog
    pub products: Vec<ProductRecord>,

    /// Recorded baskets
    pub transactions: Vec<TransactionRecord>,
}

/// Catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product id referenced by baskets
    pub id: u32,
    /// Display name
    pub name: String,
    /// Category label
    pub category: String,
    /// Unit price
    pub price: f64,
}

/// Basket entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction UUID (generated when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Checkout time in milliseconds since Unix epoch (taken from the id when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,

    /// Product ids, one per line of the receipt
    pub items: Vec<u32>,
}

impl Dataset {
    /// Read a dataset from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let dataset = serde_json::from_str(&contents)?;
        tracing::debug!("Loaded dataset from {}", path.display());
        Ok(dataset)
    }

    /// Write the dataset as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Pretty-printed JSON form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validated catalog keyed by product id.
    pub fn catalog(&self) -> Result<BTreeMap<u32, Item>> {
        let mut catalog = BTreeMap::new();
        for product in &self.products {
            let item = Item::new(product.id, &product.name, &product.category, product.price)?;
            if catalog.insert(product.id, item).is_some() {
                return Err(CliError::InvalidInput(format!(
                    "duplicate product id {}",
                    product.id
                )));
            }
        }
        Ok(catalog)
    }

    /// Resolve every basket against the catalog.
    pub fn to_transactions(&self) -> Result<Vec<Transaction>> {
        let catalog = self.catalog()?;

        self.transactions
            .iter()
            .enumerate()
            .map(|(index, record)| -> Result<Transaction> {
                let items = record
                    .items
                    .iter()
                    .map(|id| {
                        catalog.get(id).cloned().ok_or_else(|| {
                            CliError::InvalidInput(format!(
                                "transaction {} references unknown product id {}",
                                index + 1,
                                id
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;

                let id = match &record.id {
                    Some(raw) => TransactionId::parse(raw)?,
                    None => TransactionId::new(),
                };
                let timestamp = record.timestamp.unwrap_or_else(|| id.timestamp());

                Ok(Transaction::with_metadata(id, timestamp, items)?)
            })
            .collect()
    }

    /// Look a product up by id or by name (case-insensitive).
    pub fn find_product(&self, query: &str) -> Result<Item> {
        let catalog = self.catalog()?;

        let by_id = query.trim().parse::<u32>().ok().and_then(|id| catalog.get(&id));
        let found = by_id.or_else(|| {
            catalog
                .values()
                .find(|item| item.name().eq_ignore_ascii_case(query.trim()))
        });

        found
            .cloned()
            .ok_or_else(|| CliError::InvalidInput(format!("unknown product '{}'", query)))
    }

    /// Built-in grocery catalog with a fixed set of baskets.
    pub fn sample() -> Self {
        let products = [
            (1, "Bread", "Food", 15000.0),
            (2, "UHT Milk", "Beverage", 8000.0),
            (3, "Eggs", "Protein", 25000.0),
            (4, "Cooking Oil", "Seasoning", 18000.0),
            (5, "Premium Rice", "Staples", 45000.0),
            (6, "Sugar", "Seasoning", 12000.0),
            (7, "Instant Coffee", "Beverage", 22000.0),
            (8, "Tea Bags", "Beverage", 15000.0),
            (9, "Bath Soap", "Toiletries", 8500.0),
            (10, "Toothpaste", "Toiletries", 12500.0),
        ]
        .into_iter()
        .map(|(id, name, category, price)| ProductRecord {
            id,
            name: name.to_string(),
            category: category.to_string(),
            price,
        })
        .collect();

        let baskets: [&[u32]; 20] = [
            &[1, 2, 3],
            &[1, 2],
            &[1, 2, 3, 6],
            &[7, 6],
            &[7, 6, 2],
            &[8, 6],
            &[9, 10],
            &[9, 10, 1],
            &[5, 4],
            &[5, 4, 3],
            &[1, 3],
            &[1, 2, 7],
            &[7, 6, 1],
            &[8, 6, 1],
            &[5, 4, 6],
            &[9, 10, 5],
            &[1, 2, 3],
            &[2, 7, 6],
            &[4, 5, 3],
            &[1, 2, 8],
        ];
        let transactions = baskets
            .iter()
            .map(|items| TransactionRecord {
                id: None,
                timestamp: None,
                items: items.to_vec(),
            })
            .collect();

        Self {
            products,
            transactions,
        }
    }
}

/// Revenue figures over a set of baskets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SalesSummary {
    /// Number of baskets
    pub transactions: usize,
    /// Sum of basket totals
    pub revenue: f64,
    /// Receipt lines across all baskets
    pub items_sold: usize,
    /// Revenue per basket (0 without baskets)
    pub average_basket: f64,
}

impl SalesSummary {
    /// Summarize `transactions`.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let revenue: f64 = transactions.iter().map(Transaction::total).sum();
        let items_sold = transactions.iter().map(Transaction::item_count).sum();
        let average_basket = if transactions.is_empty() {
            0.0
        } else {
            revenue / transactions.len() as f64
        };

        Self {
            transactions: transactions.len(),
            revenue,
            items_sold,
            average_basket,
        }
    }
}
