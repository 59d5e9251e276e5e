//! Payment Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment-related errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Stripe API error
    #[error("Stripe error: {0}")]
    Stripe(String),

    /// Price id not present in the catalog
    #[error("Price not found: {0}")]
    PriceNotFound(String),

    /// Price exists but is archived
    #[error("Price is not active: {0}")]
    PriceInactive(String),

    /// Catalog could not be loaded or read
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PaymentError {
    /// Get user-friendly message
    pub fn user_message(&self) -> &str {
        match self {
            PaymentError::Stripe(_) => "Payment processing failed. Please try again.",
            PaymentError::PriceNotFound(_) => "This plan does not exist.",
            PaymentError::PriceInactive(_) => "This plan is no longer available.",
            PaymentError::Config(_) => "Service configuration error.",
            PaymentError::Catalog(_) => "An error occurred processing your request.",
        }
    }
}
