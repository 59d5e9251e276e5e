//! # storefront-core
//!
//! Pricing and checkout logic for the storefront, free of any browser or
//! server dependency.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  products / prices / subscription / session (read-only)      │
//! └──────────────┬───────────────────────────────────────────────┘
//!                ▼
//! ┌────────────────────┐   ┌──────────────┐   ┌────────────────────┐
//! │  PricingState      │──▶│ select_price │──▶│ CheckoutInitiator  │
//! │  (interval toggle) │   │              │   │ (signin / account /│
//! └────────────────────┘   └──────────────┘   │  hosted checkout)  │
//!                ▲                            └─────────┬──────────┘
//!                └──── pending marker ◀─────────────────┘
//! ```
//!
//! [`view::render`] turns the inputs and state into the page's view model;
//! [`format`] produces the displayed amounts.

pub mod checkout;
pub mod error;
pub mod format;
pub mod model;
pub mod plan;
pub mod state;
pub mod view;

#[cfg(test)]
mod testing;

pub use checkout::{
    Action, CheckoutEndpoint, CheckoutInitiator, CheckoutOutcome, CheckoutRedirect, CheckoutSessionId,
    CheckoutUi, PendingMarker, Route, initiate_checkout,
};
pub use error::{Result, StorefrontError};
pub use format::{format_amount, format_price};
pub use model::{
    BillingInterval, Price, PriceId, Product, ProductId, Session, SubscribedPrice, Subscription,
    SubscriptionStatus, User,
};
pub use plan::select_price;
pub use state::{PricingAction, PricingState, available_intervals};
pub use view::{PricingInputs, PricingView, render};
