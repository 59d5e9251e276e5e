//! UI Components

use leptos::prelude::*;

use storefront_core::view::{IntervalToggle, PriceCard, ProductCard};
use storefront_core::{BillingInterval, Price};

/// Amount, interval and checkout button for one price
#[component]
pub fn PriceCardView(card: PriceCard, on_checkout: Callback<Price>) -> impl IntoView {
    let PriceCard {
        price,
        amount,
        interval,
        description,
        button,
    } = card;

    let suffix = match interval {
        BillingInterval::Lifetime => String::new(),
        interval => format!("/{interval}"),
    };
    let class = if button.loading { "btn btn-primary loading" } else { "btn btn-primary" };

    view! {
        <div class="price-card">
            <div class="price">
                {amount.unwrap_or_default()}
                <span>{suffix}</span>
            </div>
            {description.map(|text| view! { <p class="price-description">{text}</p> })}
            <button
                class=class
                disabled=button.disabled
                on:click=move |_| on_checkout.run(price.clone())
            >
                {button.label.as_str()}
            </button>
        </div>
    }
}

/// One plan in the grid
#[component]
pub fn ProductCardView(card: ProductCard, on_checkout: Callback<Price>) -> impl IntoView {
    view! {
        <div class="plan">
            <h2>{card.name}</h2>
            {card.description.map(|text| view! { <p class="plan-description">{text}</p> })}
            <PriceCardView card=card.price on_checkout=on_checkout />
        </div>
    }
}

/// Billing interval switch; only offered intervals are passed in
#[component]
pub fn IntervalToggles(toggles: Vec<IntervalToggle>, on_select: Callback<BillingInterval>) -> impl IntoView {
    view! {
        <div class="interval-toggle">
            {toggles
                .into_iter()
                .map(|toggle| {
                    let class = if toggle.active { "toggle active" } else { "toggle" };
                    view! {
                        <button class=class on:click=move |_| on_select.run(toggle.interval)>
                            {toggle.label}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
