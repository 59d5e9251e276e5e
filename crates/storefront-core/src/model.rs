//! Domain Models
//!
//! Read-only catalog and account data supplied by the data provider and the
//! auth provider. Nested relations that the provider may leave out are
//! explicit `Option`s, so every hop is matched rather than assumed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payment-provider product identifier (e.g. `prod_...`)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

/// Payment-provider price identifier (e.g. `price_...`)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceId(String);

macro_rules! string_id {
    ($ty:ident) => {
        impl $ty {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id!(ProductId);
string_id!(PriceId);

/// Cadence at which a price recurs, or a one-time charge
///
/// Ordering is the order toggles are shown in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    #[default]
    Month,
    Year,
    Lifetime,
}

impl BillingInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingInterval::Month => "month",
            BillingInterval::Year => "year",
            BillingInterval::Lifetime => "lifetime",
        }
    }

    /// Whether the price recurs (and so needs a subscription checkout)
    pub fn is_recurring(&self) -> bool {
        !matches!(self, BillingInterval::Lifetime)
    }

    /// Label used on the interval toggle
    pub fn toggle_label(&self) -> &'static str {
        match self {
            BillingInterval::Month => "Monthly billing",
            BillingInterval::Year => "Yearly billing",
            BillingInterval::Lifetime => "Lifetime",
        }
    }
}

impl std::fmt::Display for BillingInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A price attached to exactly one product
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub id: PriceId,

    pub product_id: ProductId,

    #[serde(default = "default_true")]
    pub active: bool,

    /// Amount in the smallest currency unit (cents for USD)
    pub unit_amount: i64,

    /// ISO 4217 code, lowercase as the provider sends it. Missing in some
    /// provider records.
    #[serde(default)]
    pub currency: Option<String>,

    pub interval: BillingInterval,

    #[serde(default)]
    pub interval_count: Option<u32>,

    #[serde(default)]
    pub trial_period_days: Option<u32>,

    #[serde(default)]
    pub description: Option<String>,
}

/// A product with its prices
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default = "default_true")]
    pub active: bool,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub prices: Vec<Price>,
}

/// Product fields carried on a subscription's price
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
}

/// The price a subscription is on, with its product if the provider joined it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubscribedPrice {
    #[serde(flatten)]
    pub price: Price,

    #[serde(default)]
    pub product: Option<ProductSummary>,
}

/// Subscription status as reported by the payment provider
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Trialing,
    Active,
    Canceled,
    Incomplete,
    IncompleteExpired,
    PastDue,
    Unpaid,
    Paused,
}

impl SubscriptionStatus {
    /// Statuses under which the customer currently holds the plan
    pub fn is_current(&self) -> bool {
        matches!(self, SubscriptionStatus::Trialing | SubscriptionStatus::Active)
    }
}

/// The caller's subscription
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,

    pub user_id: String,

    pub status: SubscriptionStatus,

    #[serde(default)]
    pub price: Option<SubscribedPrice>,

    #[serde(default)]
    pub cancel_at_period_end: bool,

    pub created: DateTime<Utc>,

    #[serde(default)]
    pub current_period_end: Option<DateTime<Utc>>,
}

impl Subscription {
    /// Id of the price this subscription is on, if the relation was loaded
    pub fn price_id(&self) -> Option<&PriceId> {
        self.price.as_ref().map(|subscribed| &subscribed.price.id)
    }
}

/// Signed-in user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,

    #[serde(default)]
    pub email: Option<String>,
}

/// Proof of authentication issued by the auth provider
///
/// Only its presence is consulted by the pricing flow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: User,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_deserializes_provider_row() {
        let json = r#"{
            "id": "price_1",
            "product_id": "prod_1",
            "unit_amount": 900,
            "currency": "usd",
            "interval": "month"
        }"#;
        let price: Price = serde_json::from_str(json).unwrap();
        assert_eq!(price.id.as_str(), "price_1");
        assert!(price.active);
        assert_eq!(price.interval, BillingInterval::Month);
        assert_eq!(price.trial_period_days, None);
    }

    #[test]
    fn test_subscription_relations_are_optional() {
        let json = r#"{
            "id": "sub_1",
            "user_id": "user_1",
            "status": "past_due",
            "created": "2024-01-01T00:00:00Z"
        }"#;
        let sub: Subscription = serde_json::from_str(json).unwrap();
        assert_eq!(sub.price_id(), None);
        assert!(!sub.status.is_current());
    }

    #[test]
    fn test_interval_order() {
        assert!(BillingInterval::Month < BillingInterval::Year);
        assert!(BillingInterval::Year < BillingInterval::Lifetime);
        assert!(!BillingInterval::Lifetime.is_recurring());
    }
}
