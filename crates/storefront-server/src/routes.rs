//! Router

use std::path::Path;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use storefront_core::checkout::CREATE_CHECKOUT_SESSION_PATH;

use crate::handlers::{create_checkout_session, health_check, pricing};
use crate::state::AppState;

/// API routes only
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/pricing", get(pricing))
        .route(CREATE_CHECKOUT_SESSION_PATH, post(create_checkout_session))
}

/// Full application: API, static front end, CORS and request tracing
pub fn app(state: AppState, static_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api_router()
        // Static files (WASM frontend)
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use storefront_payments::{CatalogSeed, MemoryCatalogStore};

    fn state() -> AppState {
        let seed: CatalogSeed = serde_json::from_value(json!({
            "products": [
                {
                    "id": "prod_hobby",
                    "name": "Hobby",
                    "prices": [
                        { "id": "price_y", "product_id": "prod_hobby", "unit_amount": 9000,
                          "currency": "usd", "interval": "year" },
                        { "id": "price_m", "product_id": "prod_hobby", "unit_amount": 900,
                          "currency": "usd", "interval": "month" },
                        { "id": "price_old", "product_id": "prod_hobby", "unit_amount": 500,
                          "currency": "usd", "interval": "month", "active": false }
                    ]
                }
            ],
            "subscriptions": [
                { "id": "sub_1", "user_id": "user_1", "status": "active",
                  "created": "2024-01-01T00:00:00Z" }
            ]
        }))
        .unwrap();

        AppState {
            catalog: Arc::new(MemoryCatalogStore::from_seed(seed)),
            stripe: None,
        }
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn checkout_request(price_id: &str) -> Request<Body> {
        let body = json!({
            "price": {
                "id": price_id,
                "product_id": "prod_hobby",
                "unit_amount": 1,
                "currency": "usd",
                "interval": "month"
            }
        });

        Request::builder()
            .method("POST")
            .uri(CREATE_CHECKOUT_SESSION_PATH)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_stripe_disabled() {
        let app = api_router().with_state(state());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["stripe_configured"], false);
    }

    #[tokio::test]
    async fn test_pricing_anonymous() {
        let app = api_router().with_state(state());

        let response = app
            .oneshot(Request::builder().uri("/api/pricing").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let prices = body["products"][0]["prices"].as_array().unwrap();
        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0]["id"], "price_m");
        assert!(body["subscription"].is_null());
    }

    #[tokio::test]
    async fn test_pricing_with_user_header() {
        let app = api_router().with_state(state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/pricing")
                    .header("x-user-id", "user_1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["subscription"]["id"], "sub_1");
    }

    #[tokio::test]
    async fn test_checkout_unknown_price() {
        let app = api_router().with_state(state());

        let response = app.oneshot(checkout_request("price_nope")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["code"], "PRICE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_checkout_inactive_price() {
        let app = api_router().with_state(state());

        let response = app.oneshot(checkout_request("price_old")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], "PRICE_INACTIVE");
    }

    #[tokio::test]
    async fn test_checkout_without_stripe() {
        let app = api_router().with_state(state());

        let response = app.oneshot(checkout_request("price_m")).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(body["code"], "PAYMENTS_DISABLED");
        assert_eq!(body["error"], "Payments not configured");
    }
}
