//! # storefront-payments
//!
//! Server-side wrappers for the storefront: the Stripe SDK client used to
//! create hosted checkout sessions, and the catalog data provider the
//! pricing page reads from.
//!
//! ```text
//! ┌─────────────┐  POST /api/create-checkout-session  ┌──────────────┐
//! │  Browser    │────────────────────────────────────▶│ StripeClient │
//! │  (pricing)  │◀──────────── { sessionId } ─────────│              │
//! └──────┬──────┘                                     └──────────────┘
//!        │ redirectToCheckout({ sessionId })
//!        ▼
//! ┌─────────────────┐
//! │  Stripe Hosted  │
//! │  Checkout Page  │
//! └─────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_payments::{CatalogStore, CheckoutRequest, MemoryCatalogStore, StripeClient};
//!
//! let stripe = StripeClient::from_env()?;
//! let catalog = MemoryCatalogStore::from_json_file("catalog.json").await?;
//!
//! let price = catalog.find_price(&price_id).await?.expect("known price");
//! let session = stripe.create_checkout_session(CheckoutRequest { price, customer: None }).await?;
//! // hand session.id to the browser
//! ```

mod catalog;
mod checkout;
mod error;

pub use catalog::{CatalogSeed, CatalogStore, MemoryCatalogStore};
pub use checkout::{CheckoutCustomer, CheckoutRequest, CheckoutSession, StripeClient};
pub use error::{PaymentError, Result};
