//! Stripe Checkout Integration
//!
//! Server side of `POST /api/create-checkout-session`: turns a catalog price
//! into a hosted Stripe Checkout session. Everything after that (the hosted
//! page, settlement, subscription rows) belongs to Stripe.

use std::collections::HashMap;

use stripe::{
    CheckoutSession as StripeCheckoutSession, CheckoutSessionBillingAddressCollection,
    CheckoutSessionMode, Client, CreateCheckoutSession, CreateCheckoutSessionLineItems,
    CreateCheckoutSessionSubscriptionData,
};

use storefront_core::{BillingInterval, CheckoutSessionId, Price};

use crate::error::{PaymentError, Result};

/// Name reported to Stripe in the client's app info
const APP_NAME: &str = "storefront";

/// Stripe client wrapper
pub struct StripeClient {
    client: Client,
    site_url: String,
}

impl StripeClient {
    /// Create a new Stripe client
    pub fn new(secret_key: &str, site_url: impl Into<String>) -> Self {
        let client = Client::new(secret_key).with_app_info(
            APP_NAME.to_string(),
            Some(env!("CARGO_PKG_VERSION").to_string()),
            None,
        );

        Self {
            client,
            site_url: site_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let secret_key = std::env::var("STRIPE_SECRET_KEY")
            .map_err(|_| PaymentError::Config("STRIPE_SECRET_KEY not set".into()))?;
        let site_url = std::env::var("SITE_URL").unwrap_or_else(|_| "http://localhost:3000".into());

        Ok(Self::new(&secret_key, site_url))
    }

    /// Where Stripe sends the customer after paying
    pub fn success_url(&self) -> String {
        format!("{}/account", self.site_url)
    }

    /// Where Stripe sends the customer after backing out
    pub fn cancel_url(&self) -> String {
        format!("{}/", self.site_url)
    }

    /// Create a hosted Checkout session for one unit of `request.price`
    pub async fn create_checkout_session(&self, request: CheckoutRequest) -> Result<CheckoutSession> {
        let success_url = self.success_url();
        let cancel_url = self.cancel_url();
        let price = &request.price;

        let mut params = CreateCheckoutSession::new();
        params.success_url = Some(&success_url);
        params.cancel_url = Some(&cancel_url);
        params.mode = Some(checkout_mode(price.interval));
        params.allow_promotion_codes = Some(true);
        params.billing_address_collection = Some(CheckoutSessionBillingAddressCollection::Required);

        params.line_items = Some(vec![CreateCheckoutSessionLineItems {
            price: Some(price.id.to_string()),
            quantity: Some(1),
            ..Default::default()
        }]);

        if price.interval.is_recurring() {
            params.subscription_data = Some(CreateCheckoutSessionSubscriptionData {
                trial_period_days: price.trial_period_days,
                ..Default::default()
            });
        }

        let mut metadata = HashMap::new();
        metadata.insert("price_id".to_string(), price.id.to_string());
        if let Some(ref customer) = request.customer {
            params.client_reference_id = Some(&customer.user_id);
            params.customer_email = customer.email.as_deref();
            metadata.insert("user_id".to_string(), customer.user_id.clone());
        }
        params.metadata = Some(metadata);

        let session = StripeCheckoutSession::create(&self.client, params)
            .await
            .map_err(|e| PaymentError::Stripe(e.to_string()))?;

        tracing::info!(
            session_id = %session.id,
            price_id = %price.id,
            mode = ?checkout_mode(price.interval),
            "Created Stripe checkout session"
        );

        Ok(CheckoutSession {
            id: CheckoutSessionId::new(session.id.to_string()),
            checkout_url: session.url,
        })
    }
}

/// Recurring prices open a subscription; lifetime prices are one-off payments
fn checkout_mode(interval: BillingInterval) -> CheckoutSessionMode {
    if interval.is_recurring() {
        CheckoutSessionMode::Subscription
    } else {
        CheckoutSessionMode::Payment
    }
}

/// Who is checking out, as reported by the auth provider
#[derive(Clone, Debug)]
pub struct CheckoutCustomer {
    pub user_id: String,
    pub email: Option<String>,
}

/// Request to create a checkout session
#[derive(Clone, Debug)]
pub struct CheckoutRequest {
    /// Price to purchase, as resolved from the catalog
    pub price: Price,

    /// Signed-in customer, when the auth proxy identified one
    pub customer: Option<CheckoutCustomer>,
}

/// Result of creating a checkout session
#[derive(Clone, Debug)]
pub struct CheckoutSession {
    /// Token the browser hands to `redirectToCheckout`
    pub id: CheckoutSessionId,

    /// Hosted page URL, for clients that navigate directly
    pub checkout_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_mode_by_interval() {
        assert_eq!(checkout_mode(BillingInterval::Month), CheckoutSessionMode::Subscription);
        assert_eq!(checkout_mode(BillingInterval::Year), CheckoutSessionMode::Subscription);
        assert_eq!(checkout_mode(BillingInterval::Lifetime), CheckoutSessionMode::Payment);
    }

    #[test]
    fn test_return_urls() {
        let client = StripeClient::new("sk_test_123", "https://shop.example.com/");
        assert_eq!(client.success_url(), "https://shop.example.com/account");
        assert_eq!(client.cancel_url(), "https://shop.example.com/");
    }
}
