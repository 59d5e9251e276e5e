//! Catalog Data Provider
//!
//! Products, prices and subscriptions as the database service exposes them.
//! The storefront only reads; rows are written by the payment provider's
//! sync, which lives outside this repo.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;

use storefront_core::{Price, PriceId, Product, Subscription};

use crate::error::{PaymentError, Result};

/// Catalog storage trait
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Active products with their active prices, cheapest first
    async fn active_products(&self) -> Result<Vec<Product>>;

    /// Look up a price by id, active or not
    async fn find_price(&self, price_id: &PriceId) -> Result<Option<Price>>;

    /// The user's trialing or active subscription, if any
    async fn current_subscription(&self, user_id: &str) -> Result<Option<Subscription>>;
}

/// Seed file layout for [`MemoryCatalogStore`]
#[derive(Debug, Default, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub products: Vec<Product>,

    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
}

/// In-memory catalog (for development)
pub struct MemoryCatalogStore {
    products: RwLock<Vec<Product>>,
    subscriptions: RwLock<HashMap<String, Vec<Subscription>>>,
}

impl Default for MemoryCatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::from_seed(CatalogSeed::default())
    }

    pub fn from_seed(seed: CatalogSeed) -> Self {
        let mut subscriptions: HashMap<String, Vec<Subscription>> = HashMap::new();
        for subscription in seed.subscriptions {
            subscriptions
                .entry(subscription.user_id.clone())
                .or_default()
                .push(subscription);
        }

        Self {
            products: RwLock::new(seed.products),
            subscriptions: RwLock::new(subscriptions),
        }
    }

    /// Load a JSON seed (`{ "products": [...], "subscriptions": [...] }`)
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| PaymentError::Catalog(format!("{}: {}", path.display(), e)))?;
        let seed: CatalogSeed = serde_json::from_str(&raw)
            .map_err(|e| PaymentError::Catalog(format!("{}: {}", path.display(), e)))?;

        tracing::info!(
            path = %path.display(),
            products = seed.products.len(),
            subscriptions = seed.subscriptions.len(),
            "Loaded catalog seed"
        );

        Ok(Self::from_seed(seed))
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn active_products(&self) -> Result<Vec<Product>> {
        let products = self.products.read().await;

        Ok(products
            .iter()
            .filter(|product| product.active)
            .map(|product| {
                let mut product = product.clone();
                product.prices.retain(|price| price.active);
                product.prices.sort_by_key(|price| price.unit_amount);
                product
            })
            .collect())
    }

    async fn find_price(&self, price_id: &PriceId) -> Result<Option<Price>> {
        let products = self.products.read().await;

        Ok(products
            .iter()
            .flat_map(|product| product.prices.iter())
            .find(|price| &price.id == price_id)
            .cloned())
    }

    async fn current_subscription(&self, user_id: &str) -> Result<Option<Subscription>> {
        let subscriptions = self.subscriptions.read().await;

        Ok(subscriptions
            .get(user_id)
            .and_then(|subs| subs.iter().find(|sub| sub.status.is_current()))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> CatalogSeed {
        serde_json::from_value(serde_json::json!({
            "products": [
                {
                    "id": "prod_hobby",
                    "name": "Hobby",
                    "prices": [
                        { "id": "price_y", "product_id": "prod_hobby", "unit_amount": 9000,
                          "currency": "usd", "interval": "year" },
                        { "id": "price_old", "product_id": "prod_hobby", "unit_amount": 500,
                          "currency": "usd", "interval": "month", "active": false },
                        { "id": "price_m", "product_id": "prod_hobby", "unit_amount": 900,
                          "currency": "usd", "interval": "month" }
                    ]
                },
                { "id": "prod_legacy", "name": "Legacy", "active": false }
            ],
            "subscriptions": [
                { "id": "sub_old", "user_id": "user_1", "status": "canceled",
                  "created": "2023-01-01T00:00:00Z" },
                { "id": "sub_new", "user_id": "user_1", "status": "trialing",
                  "created": "2024-01-01T00:00:00Z" }
            ]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_active_products_filter_and_order() {
        let store = MemoryCatalogStore::from_seed(seed());

        let products = store.active_products().await.unwrap();

        assert_eq!(products.len(), 1);
        let ids: Vec<_> = products[0].prices.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["price_m", "price_y"]);
    }

    #[tokio::test]
    async fn test_find_price_includes_inactive() {
        let store = MemoryCatalogStore::from_seed(seed());

        let price = store.find_price(&PriceId::new("price_old")).await.unwrap().unwrap();
        assert!(!price.active);
        assert!(store.find_price(&PriceId::new("price_nope")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_current_subscription_skips_canceled() {
        let store = MemoryCatalogStore::from_seed(seed());

        let sub = store.current_subscription("user_1").await.unwrap().unwrap();
        assert_eq!(sub.id, "sub_new");
        assert_eq!(sub.created, chrono::DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap());
        assert!(store.current_subscription("user_2").await.unwrap().is_none());
    }
}
