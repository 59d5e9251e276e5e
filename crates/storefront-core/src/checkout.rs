//! Checkout Initiation
//!
//! Turns a click on a price into one of three things:
//!
//! ```text
//!   no session ──────────────▶ Redirect(/signin)
//!   has subscription ────────▶ Redirect(/account)
//!   otherwise ───────────────▶ POST /api/create-checkout-session
//!                                   │ { sessionId }
//!                                   ▼
//!                              provider redirectToCheckout
//! ```
//!
//! The decision is a pure function ([`initiate_checkout`]) returning an
//! [`Action`]. [`CheckoutInitiator`] executes actions through ports so the
//! browser, the network and the payment provider can be swapped for fakes.

use std::cell::RefCell;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StorefrontError};
use crate::model::{Price, PriceId, Session, Subscription};
use crate::state::PricingState;

/// Path of the checkout session endpoint
pub const CREATE_CHECKOUT_SESSION_PATH: &str = "/api/create-checkout-session";

/// Client-side routes the checkout flow navigates to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    SignIn,
    Account,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::SignIn => "/signin",
            Route::Account => "/account",
        }
    }
}

/// Opaque token for one hosted checkout attempt
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckoutSessionId(String);

impl CheckoutSessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CheckoutSessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Body of `POST /api/create-checkout-session`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateCheckoutSessionRequest {
    pub price: Price,
}

/// Response of `POST /api/create-checkout-session`
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutSessionResponse {
    pub session_id: CheckoutSessionId,
}

/// What a click on a price should do
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Redirect(Route),
    CallEndpoint(Price),
    /// A checkout is already in flight
    None,
}

/// Decide what a click on `price` does. First match wins:
/// no session, then any existing subscription, then the endpoint call.
pub fn initiate_checkout(
    price: &Price,
    session: Option<&Session>,
    subscription: Option<&Subscription>,
) -> Action {
    match (session, subscription) {
        (None, _) => Action::Redirect(Route::SignIn),
        (Some(_), Some(_)) => Action::Redirect(Route::Account),
        (Some(_), None) => Action::CallEndpoint(price.clone()),
    }
}

// ============================================================================
// Ports
// ============================================================================

/// Creates a hosted checkout session for a price
#[async_trait(?Send)]
pub trait CheckoutEndpoint {
    async fn create_checkout_session(&self, price: &Price) -> Result<CheckoutSessionId>;
}

/// Payment provider's client-side redirect to hosted checkout
#[async_trait(?Send)]
pub trait CheckoutRedirect {
    async fn redirect_to_checkout(&self, session_id: &CheckoutSessionId) -> Result<()>;
}

/// Navigation and user-visible notifications
pub trait CheckoutUi {
    fn navigate(&self, route: Route);

    /// Show an error to the user (an alert, a toast); logging alone is not enough
    fn notify_error(&self, message: &str);
}

/// Storage for the "this price is loading" marker
pub trait PendingMarker {
    fn pending(&self) -> Option<PriceId>;

    fn set_pending(&self, price_id: Option<PriceId>);
}

impl<T: PendingMarker + ?Sized> PendingMarker for &T {
    fn pending(&self) -> Option<PriceId> {
        (**self).pending()
    }

    fn set_pending(&self, price_id: Option<PriceId>) {
        (**self).set_pending(price_id);
    }
}

impl PendingMarker for RefCell<PricingState> {
    fn pending(&self) -> Option<PriceId> {
        self.borrow().pending_price.clone()
    }

    fn set_pending(&self, price_id: Option<PriceId>) {
        let state = self.take();
        self.replace(state.with_pending(price_id));
    }
}

/// Clears the pending marker when dropped, on every exit path
struct PendingGuard<'a, P: PendingMarker> {
    marker: &'a P,
}

impl<'a, P: PendingMarker> PendingGuard<'a, P> {
    fn set(marker: &'a P, price_id: &PriceId) -> Self {
        marker.set_pending(Some(price_id.clone()));
        Self { marker }
    }
}

impl<P: PendingMarker> Drop for PendingGuard<'_, P> {
    fn drop(&mut self) {
        self.marker.set_pending(None);
    }
}

// ============================================================================
// Initiator
// ============================================================================

/// Result of one checkout click
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Sent to sign-in or account management; no network call was made
    Redirected(Route),

    /// Handed off to the provider's hosted checkout
    CheckoutOpened(CheckoutSessionId),

    /// Endpoint or redirect failed; the user has been notified
    Failed(StorefrontError),

    /// Another checkout was still pending; nothing happened
    Ignored,
}

/// Executes checkout actions against its ports
pub struct CheckoutInitiator<E, R, U, P> {
    endpoint: E,
    redirect: R,
    ui: U,
    pending: P,
}

impl<E, R, U, P> CheckoutInitiator<E, R, U, P>
where
    E: CheckoutEndpoint,
    R: CheckoutRedirect,
    U: CheckoutUi,
    P: PendingMarker,
{
    pub fn new(endpoint: E, redirect: R, ui: U, pending: P) -> Self {
        Self {
            endpoint,
            redirect,
            ui,
            pending,
        }
    }

    /// [`initiate_checkout`], or [`Action::None`] while another checkout is pending
    pub fn next_action(
        &self,
        price: &Price,
        session: Option<&Session>,
        subscription: Option<&Subscription>,
    ) -> Action {
        if let Some(pending) = self.pending.pending() {
            tracing::debug!(
                pending_price = %pending,
                clicked_price = %price.id,
                "Checkout already in flight, ignoring click"
            );
            return Action::None;
        }
        initiate_checkout(price, session, subscription)
    }

    /// Handle a click on `price`
    pub async fn run(
        &self,
        price: &Price,
        session: Option<&Session>,
        subscription: Option<&Subscription>,
    ) -> CheckoutOutcome {
        match self.next_action(price, session, subscription) {
            Action::None => CheckoutOutcome::Ignored,
            Action::Redirect(route) => {
                tracing::info!(route = route.path(), price_id = %price.id, "Redirecting instead of checkout");
                self.ui.navigate(route);
                CheckoutOutcome::Redirected(route)
            }
            Action::CallEndpoint(price) => self.open_checkout(&price).await,
        }
    }

    async fn open_checkout(&self, price: &Price) -> CheckoutOutcome {
        let _pending = PendingGuard::set(&self.pending, &price.id);

        let result: Result<CheckoutSessionId> = async {
            let session_id = self.endpoint.create_checkout_session(price).await?;
            self.redirect.redirect_to_checkout(&session_id).await?;
            Ok(session_id)
        }
        .await;

        match result {
            Ok(session_id) => {
                tracing::info!(price_id = %price.id, session_id = %session_id, "Opened hosted checkout");
                CheckoutOutcome::CheckoutOpened(session_id)
            }
            Err(err) => {
                tracing::warn!(price_id = %price.id, error = %err, "Checkout failed");
                self.ui.notify_error(&err.user_message());
                CheckoutOutcome::Failed(err)
            }
        }
    }
}
