//! HTTP Handlers

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use serde::Serialize;

use storefront_core::checkout::{CreateCheckoutSessionRequest, CreateCheckoutSessionResponse};
use storefront_core::{Product, Subscription};
use storefront_payments::{CheckoutCustomer, CheckoutRequest, PaymentError};

use crate::state::AppState;

/// Header carrying the signed-in user's id, set by the auth proxy
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the signed-in user's email, set by the auth proxy
pub const USER_EMAIL_HEADER: &str = "x-user-email";

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub stripe_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct PricingResponse {
    pub products: Vec<Product>,
    pub subscription: Option<Subscription>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>, code: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

impl From<PaymentError> for ErrorResponse {
    fn from(err: PaymentError) -> Self {
        let code = match err {
            PaymentError::Stripe(_) => "CHECKOUT_ERROR",
            PaymentError::PriceNotFound(_) => "PRICE_NOT_FOUND",
            PaymentError::PriceInactive(_) => "PRICE_INACTIVE",
            PaymentError::Catalog(_) => "CATALOG_ERROR",
            PaymentError::Config(_) => "CONFIG_ERROR",
        };

        Self {
            error: err.user_message().into(),
            code: code.into(),
        }
    }
}

fn payment_error(err: PaymentError) -> ApiError {
    let status = match err {
        PaymentError::PriceNotFound(_) => StatusCode::NOT_FOUND,
        PaymentError::PriceInactive(_) => StatusCode::BAD_REQUEST,
        PaymentError::Stripe(_) => StatusCode::BAD_GATEWAY,
        PaymentError::Catalog(_) | PaymentError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!(error = %err, "Request failed");
    } else {
        tracing::warn!(error = %err, "Request rejected");
    }

    (status, Json(err.into()))
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
}

/// The customer identified by the auth proxy, if any
fn customer_from_headers(headers: &HeaderMap) -> Option<CheckoutCustomer> {
    header_value(headers, USER_ID_HEADER).map(|user_id| CheckoutCustomer {
        user_id,
        email: header_value(headers, USER_EMAIL_HEADER),
    })
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        stripe_configured: state.stripe.is_some(),
    })
}

/// Products and the caller's current subscription, as the pricing page reads them
pub async fn pricing(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<PricingResponse>, ApiError> {
    let products = state.catalog.active_products().await.map_err(payment_error)?;

    let subscription = match header_value(&headers, USER_ID_HEADER) {
        Some(user_id) => state
            .catalog
            .current_subscription(&user_id)
            .await
            .map_err(payment_error)?,
        None => None,
    };

    tracing::debug!(
        products = products.len(),
        subscribed = subscription.is_some(),
        "Serving pricing"
    );

    Ok(Json(PricingResponse { products, subscription }))
}

/// Create a hosted Stripe Checkout session for one price
pub async fn create_checkout_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateCheckoutSessionRequest>,
) -> Result<Json<CreateCheckoutSessionResponse>, ApiError> {
    // The body is client-supplied; only the catalog's copy of the price is trusted
    let price_id = payload.price.id;
    let price = state
        .catalog
        .find_price(&price_id)
        .await
        .map_err(payment_error)?
        .ok_or_else(|| payment_error(PaymentError::PriceNotFound(price_id.to_string())))?;

    if !price.active {
        return Err(payment_error(PaymentError::PriceInactive(price_id.to_string())));
    }

    let stripe = state.stripe.as_ref().ok_or_else(|| {
        api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "Payments not configured",
            "PAYMENTS_DISABLED",
        )
    })?;

    let request = CheckoutRequest {
        price,
        customer: customer_from_headers(&headers),
    };

    let session = stripe
        .create_checkout_session(request)
        .await
        .map_err(payment_error)?;

    Ok(Json(CreateCheckoutSessionResponse {
        session_id: session.id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_customer_from_headers() {
        let mut headers = HeaderMap::new();
        assert!(customer_from_headers(&headers).is_none());

        headers.insert(USER_ID_HEADER, HeaderValue::from_static("user_1"));
        let customer = customer_from_headers(&headers).unwrap();
        assert_eq!(customer.user_id, "user_1");
        assert!(customer.email.is_none());

        headers.insert(USER_EMAIL_HEADER, HeaderValue::from_static("ada@example.com"));
        let customer = customer_from_headers(&headers).unwrap();
        assert_eq!(customer.email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn test_blank_user_header_is_anonymous() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("  "));
        assert!(customer_from_headers(&headers).is_none());
    }

    #[test]
    fn test_payment_error_status() {
        let (status, body) = payment_error(PaymentError::PriceNotFound("price_x".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, "PRICE_NOT_FOUND");

        let (status, _) = payment_error(PaymentError::PriceInactive("price_x".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = payment_error(PaymentError::Stripe("boom".into()));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.error, "Payment processing failed. Please try again.");
    }
}
