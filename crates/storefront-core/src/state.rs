//! Pricing Page State
//!
//! The two pieces of client-local state on the pricing page, the selected
//! billing interval and the pending checkout marker, held in one value and
//! changed only through [`PricingState::reduce`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{BillingInterval, PriceId, Product};

/// Every interval offered by any price of any product
pub fn available_intervals(products: &[Product]) -> BTreeSet<BillingInterval> {
    products
        .iter()
        .flat_map(|product| product.prices.iter().map(|price| price.interval))
        .collect()
}

/// UI state of the pricing page
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingState {
    /// Interval whose prices the grid shows; starts at `month`
    pub billing_interval: BillingInterval,

    /// Price whose checkout is in flight
    pub pending_price: Option<PriceId>,
}

/// State transitions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PricingAction {
    /// User clicked an interval toggle. Not checked against
    /// [`available_intervals`]: toggles only exist for offered intervals.
    SelectInterval(BillingInterval),

    CheckoutStarted(PriceId),

    CheckoutSettled,
}

impl PricingState {
    pub fn reduce(self, action: PricingAction) -> Self {
        match action {
            PricingAction::SelectInterval(interval) => Self {
                billing_interval: interval,
                ..self
            },
            PricingAction::CheckoutStarted(price_id) => Self {
                pending_price: Some(price_id),
                ..self
            },
            PricingAction::CheckoutSettled => Self {
                pending_price: None,
                ..self
            },
        }
    }

    /// Start (`Some`) or settle (`None`) a checkout
    pub fn with_pending(self, price_id: Option<PriceId>) -> Self {
        match price_id {
            Some(id) => self.reduce(PricingAction::CheckoutStarted(id)),
            None => self.reduce(PricingAction::CheckoutSettled),
        }
    }

    /// Whether a checkout for `price_id` is in flight
    pub fn is_pending(&self, price_id: &PriceId) -> bool {
        self.pending_price.as_ref() == Some(price_id)
    }
}
