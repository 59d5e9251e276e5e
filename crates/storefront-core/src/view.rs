//! Pricing View Model
//!
//! Builds what the pricing page shows from the remote data and the page
//! state. Markup lives in the front end; this module decides which branch,
//! which cards, which labels.

use crate::format::format_price;
use crate::model::{BillingInterval, Price, PriceId, Product, ProductId, Session, Subscription};
use crate::plan::select_price;
use crate::state::{PricingState, available_intervals};

/// Where prices are created when none exist yet
pub const PROVIDER_DASHBOARD_URL: &str = "https://dashboard.stripe.com/products";

/// Everything the pricing page is rendered from, supplied fresh on each load
#[derive(Clone, Debug, Default)]
pub struct PricingInputs {
    pub session: Option<Session>,
    pub products: Vec<Product>,
    pub subscription: Option<Subscription>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonLabel {
    Subscribe,
    Manage,
}

impl ButtonLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonLabel::Subscribe => "Subscribe",
            ButtonLabel::Manage => "Manage",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutButton {
    pub label: ButtonLabel,
    pub disabled: bool,
    /// Checkout for this price is in flight
    pub loading: bool,
}

/// One price as displayed
#[derive(Clone, Debug, PartialEq)]
pub struct PriceCard {
    pub price: Price,
    /// `None` when the price cannot be formatted (missing or bad currency)
    pub amount: Option<String>,
    pub interval: BillingInterval,
    pub description: Option<String>,
    pub button: CheckoutButton,
}

/// One product in the grid with its price for the active interval
#[derive(Clone, Debug, PartialEq)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: PriceCard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntervalToggle {
    pub interval: BillingInterval,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PricingView {
    /// No products configured yet
    Empty { dashboard_url: &'static str },

    /// One product: every price, all intervals at once, no toggle
    Single {
        product_name: String,
        prices: Vec<PriceCard>,
    },

    /// Several products: one price each for the active interval
    Grid {
        toggles: Vec<IntervalToggle>,
        products: Vec<ProductCard>,
    },
}

pub fn render(inputs: &PricingInputs, state: &PricingState) -> PricingView {
    match inputs.products.as_slice() {
        [] => PricingView::Empty {
            dashboard_url: PROVIDER_DASHBOARD_URL,
        },
        [product] => PricingView::Single {
            product_name: product.name.clone(),
            prices: product
                .prices
                .iter()
                .map(|price| price_card(price, inputs, state, false))
                .collect(),
        },
        products => render_grid(products, inputs, state),
    }
}

fn render_grid(products: &[Product], inputs: &PricingInputs, state: &PricingState) -> PricingView {
    let toggles = available_intervals(products)
        .into_iter()
        .map(|interval| IntervalToggle {
            interval,
            label: interval.toggle_label(),
            active: interval == state.billing_interval,
        })
        .collect();

    let disabled = inputs.session.is_none();
    let products = products
        .iter()
        .filter_map(|product| {
            let price = select_price(product, state.billing_interval)?;
            Some(ProductCard {
                id: product.id.clone(),
                name: product.name.clone(),
                description: product.description.clone(),
                price: price_card(price, inputs, state, disabled),
            })
        })
        .collect();

    PricingView::Grid { toggles, products }
}

fn price_card(price: &Price, inputs: &PricingInputs, state: &PricingState, disabled: bool) -> PriceCard {
    let amount = match format_price(price) {
        Ok(amount) => Some(amount),
        Err(err) => {
            tracing::warn!(price_id = %price.id, error = %err, "Skipping price formatting");
            None
        }
    };

    PriceCard {
        price: price.clone(),
        amount,
        interval: price.interval,
        description: price.description.clone(),
        button: CheckoutButton {
            label: button_label(inputs.subscription.as_ref(), &price.id),
            disabled,
            loading: state.is_pending(&price.id),
        },
    }
}

/// `Manage` on the price the caller is subscribed to, `Subscribe` elsewhere
fn button_label(subscription: Option<&Subscription>, price_id: &PriceId) -> ButtonLabel {
    match subscription.and_then(Subscription::price_id) {
        Some(subscribed) if subscribed == price_id => ButtonLabel::Manage,
        _ => ButtonLabel::Subscribe,
    }
}
