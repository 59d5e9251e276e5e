//! Test fixtures

use chrono::{TimeZone, Utc};

use crate::model::{
    BillingInterval, Price, PriceId, Product, ProductId, ProductSummary, Session, SubscribedPrice,
    Subscription, SubscriptionStatus, User,
};

pub fn price(id: &str, product_id: &str, interval: BillingInterval, unit_amount: i64) -> Price {
    Price {
        id: PriceId::new(id),
        product_id: ProductId::new(product_id),
        active: true,
        unit_amount,
        currency: Some("usd".into()),
        interval,
        interval_count: None,
        trial_period_days: None,
        description: None,
    }
}

pub fn product(id: &str, name: &str, prices: Vec<Price>) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.into(),
        description: None,
        active: true,
        image: None,
        prices,
    }
}

pub fn session() -> Session {
    Session {
        access_token: "token".into(),
        user: User {
            id: "user_1".into(),
            email: Some("ada@example.com".into()),
        },
    }
}

pub fn subscription_on(price: &Price, product_name: &str) -> Subscription {
    Subscription {
        id: "sub_1".into(),
        user_id: "user_1".into(),
        status: SubscriptionStatus::Active,
        price: Some(SubscribedPrice {
            price: price.clone(),
            product: Some(ProductSummary {
                id: price.product_id.clone(),
                name: product_name.into(),
            }),
        }),
        cancel_at_period_end: false,
        created: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        current_period_end: None,
    }
}
