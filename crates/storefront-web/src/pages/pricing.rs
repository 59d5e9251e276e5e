//! Pricing Page

use leptos::prelude::*;

use storefront_core::{
    CheckoutInitiator, Price, PricingAction, PricingInputs, PricingState, PricingView, render,
};

use crate::api::{self, HttpCheckoutEndpoint, PricingData};
use crate::auth;
use crate::browser::{BrowserUi, SignalMarker};
use crate::components::{IntervalToggles, PriceCardView, ProductCardView};
use crate::stripe_js::StripeJsRedirect;

#[component]
pub fn PricingPage() -> impl IntoView {
    let session = auth::current_session();
    let state = RwSignal::new(PricingState::default());
    let data = RwSignal::new(Option::<PricingData>::None);
    let load_error = RwSignal::new(Option::<String>::None);

    // Fetch pricing on mount
    let fetch_session = session.clone();
    Effect::new(move |_| {
        let session = fetch_session.clone();
        leptos::task::spawn_local(async move {
            match api::fetch_pricing(session.as_ref()).await {
                Ok(pricing) => data.set(Some(pricing)),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to load pricing");
                    load_error.set(Some(e));
                }
            }
        });
    });

    let checkout_session = session.clone();
    let checkout = Callback::new(move |price: Price| {
        let session = checkout_session.clone();
        let subscription = data.with_untracked(|d| d.as_ref().and_then(|d| d.subscription.clone()));

        leptos::task::spawn_local(async move {
            let initiator = CheckoutInitiator::new(
                HttpCheckoutEndpoint::new(session.clone()),
                StripeJsRedirect::from_env(),
                BrowserUi,
                SignalMarker(state),
            );
            let outcome = initiator.run(&price, session.as_ref(), subscription.as_ref()).await;
            tracing::debug!(price_id = %price.id, ?outcome, "Checkout click handled");
        });
    });

    let select_interval = Callback::new(move |interval| {
        state.update(|s| *s = std::mem::take(s).reduce(PricingAction::SelectInterval(interval)));
    });

    let body = move || {
        if let Some(error) = load_error.get() {
            return view! { <p class="error">{error}</p> }.into_any();
        }
        let Some(pricing) = data.get() else {
            return view! { <p class="loading">"Loading plans..."</p> }.into_any();
        };

        let inputs = PricingInputs {
            session: session.clone(),
            products: pricing.products,
            subscription: pricing.subscription,
        };

        match render(&inputs, &state.get()) {
            PricingView::Empty { dashboard_url } => view! {
                <div class="pricing-empty">
                    <p>
                        "No subscription pricing plans found. Create them in your "
                        <a href=dashboard_url target="_blank" rel="noopener noreferrer">
                            "Stripe Dashboard"
                        </a>
                        "."
                    </p>
                </div>
            }
            .into_any(),
            PricingView::Single { product_name, prices } => view! {
                <div class="plan single">
                    <h2>{product_name}</h2>
                    <div class="prices">
                        {prices
                            .into_iter()
                            .map(|card| view! { <PriceCardView card=card on_checkout=checkout /> })
                            .collect_view()}
                    </div>
                </div>
            }
            .into_any(),
            PricingView::Grid { toggles, products } => view! {
                <IntervalToggles toggles=toggles on_select=select_interval />
                <div class="plans">
                    {products
                        .into_iter()
                        .map(|card| view! { <ProductCardView card=card on_checkout=checkout /> })
                        .collect_view()}
                </div>
            }
            .into_any(),
        }
    };

    view! {
        <div class="pricing">
            <h1>"Pricing Plans"</h1>
            <p class="subtitle">"Start building for free, then add a site plan to go live."</p>
            {body}
        </div>
    }
}
