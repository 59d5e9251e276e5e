//! Application State

use std::sync::Arc;

use storefront_payments::{CatalogStore, StripeClient};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Products, prices and subscriptions
    pub catalog: Arc<dyn CatalogStore>,

    /// Stripe client (optional - None if not configured)
    pub stripe: Option<Arc<StripeClient>>,
}
