//! Error Types

use thiserror::Error;

/// Result type alias for storefront operations
pub type Result<T> = std::result::Result<T, StorefrontError>;

/// Storefront error types
///
/// "No matching price", "not signed in" and "already subscribed" are not
/// errors: they surface as `None` and as [`crate::checkout::Action::Redirect`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorefrontError {
    /// Price has no currency code, so it cannot be formatted
    #[error("Price has no currency code")]
    MissingCurrency,

    /// Currency code is not a three-letter ISO 4217 code
    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    /// The create-checkout-session endpoint failed (network or provider)
    #[error("Checkout endpoint error: {0}")]
    CheckoutEndpoint(String),

    /// The payment provider's redirect primitive failed
    #[error("Checkout redirect error: {0}")]
    CheckoutRedirect(String),
}

impl StorefrontError {
    /// Check if this error is retryable
    ///
    /// Checkout failures are terminal for the user action that caused them.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            StorefrontError::MissingCurrency | StorefrontError::InvalidCurrency(_) => {
                "This price is not available right now.".into()
            }
            StorefrontError::CheckoutEndpoint(msg) | StorefrontError::CheckoutRedirect(msg) => {
                msg.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_errors_surface_provider_message() {
        let err = StorefrontError::CheckoutEndpoint("No such price: 'price_x'".into());
        assert_eq!(err.user_message(), "No such price: 'price_x'");
        assert!(!err.is_retryable());
    }
}
