//! Browser-side checkout ports

use leptos::prelude::*;

use storefront_core::{CheckoutUi, PendingMarker, PriceId, PricingState, Route};

/// `location.href` navigation and `window.alert` notifications
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserUi;

impl CheckoutUi for BrowserUi {
    fn navigate(&self, route: Route) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(route.path()) {
                tracing::error!(route = route.path(), error = ?e, "Navigation failed");
            }
        }
    }

    fn notify_error(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}

/// Pending marker stored in the page's reactive state
#[derive(Clone, Copy)]
pub struct SignalMarker(pub RwSignal<PricingState>);

impl PendingMarker for SignalMarker {
    fn pending(&self) -> Option<PriceId> {
        self.0.with_untracked(|state| state.pending_price.clone())
    }

    fn set_pending(&self, price_id: Option<PriceId>) {
        self.0.update(|state| *state = std::mem::take(state).with_pending(price_id));
    }
}
