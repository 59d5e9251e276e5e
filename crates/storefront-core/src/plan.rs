//! Plan Selection

use crate::model::{BillingInterval, Price, Product};

/// Pick the product's price for `interval`
///
/// Returns the first match in the product's price order, or `None` when the
/// product has no price on that interval; callers skip the product then.
pub fn select_price(product: &Product, interval: BillingInterval) -> Option<&Price> {
    product.prices.iter().find(|price| price.interval == interval)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{price, product};

    fn hobby(prices: Vec<Price>) -> Product {
        product("prod_1", "Hobby", prices)
    }

    #[test]
    fn test_no_price_for_interval() {
        let product = hobby(vec![price("price_m", "prod_1", BillingInterval::Month, 900)]);
        assert!(select_price(&product, BillingInterval::Year).is_none());
    }

    #[test]
    fn test_selects_matching_interval() {
        let product = hobby(vec![
            price("price_m", "prod_1", BillingInterval::Month, 900),
            price("price_y", "prod_1", BillingInterval::Year, 9000),
        ]);
        let selected = select_price(&product, BillingInterval::Year).unwrap();
        assert_eq!(selected.id.as_str(), "price_y");
    }

    #[test]
    fn test_first_duplicate_wins() {
        let product = hobby(vec![
            price("price_a", "prod_1", BillingInterval::Month, 900),
            price("price_b", "prod_1", BillingInterval::Month, 1200),
        ]);
        let selected = select_price(&product, BillingInterval::Month).unwrap();
        assert_eq!(selected.id.as_str(), "price_a");
    }
}
