//! API Client

use async_trait::async_trait;
use serde::Deserialize;

use storefront_core::checkout::{
    CREATE_CHECKOUT_SESSION_PATH, CreateCheckoutSessionRequest, CreateCheckoutSessionResponse,
};
use storefront_core::{
    CheckoutEndpoint, CheckoutSessionId, Price, Product, Session, StorefrontError, Subscription,
};

/// Body of `GET /api/pricing`
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PricingData {
    #[serde(default)]
    pub products: Vec<Product>,

    #[serde(default)]
    pub subscription: Option<Subscription>,
}

/// Absolute URL for an API path on the page's own origin
fn api_url(path: &str) -> String {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:3000".into());
    format!("{origin}{path}")
}

/// Attach the caller's identity for the auth proxy
fn with_session(request: reqwest::RequestBuilder, session: Option<&Session>) -> reqwest::RequestBuilder {
    match session {
        Some(session) => {
            let request = request
                .bearer_auth(&session.access_token)
                .header("x-user-id", &session.user.id);
            match session.user.email {
                Some(ref email) => request.header("x-user-email", email),
                None => request,
            }
        }
        None => request,
    }
}

/// Pull `{ error }` out of a failed response
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let data: serde_json::Value = response.json().await.unwrap_or_default();
    data["error"]
        .as_str()
        .map_or_else(|| format!("Request failed ({status})"), String::from)
}

/// Load products and the caller's subscription
pub async fn fetch_pricing(session: Option<&Session>) -> Result<PricingData, String> {
    let client = reqwest::Client::new();

    let response = with_session(client.get(api_url("/api/pricing")), session)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        response.json().await.map_err(|e| e.to_string())
    } else {
        Err(error_message(response).await)
    }
}

/// `POST /api/create-checkout-session` over reqwest
pub struct HttpCheckoutEndpoint {
    client: reqwest::Client,
    session: Option<Session>,
}

impl HttpCheckoutEndpoint {
    pub fn new(session: Option<Session>) -> Self {
        Self {
            client: reqwest::Client::new(),
            session,
        }
    }
}

#[async_trait(?Send)]
impl CheckoutEndpoint for HttpCheckoutEndpoint {
    async fn create_checkout_session(&self, price: &Price) -> storefront_core::Result<CheckoutSessionId> {
        let body = CreateCheckoutSessionRequest { price: price.clone() };

        let response = with_session(
            self.client.post(api_url(CREATE_CHECKOUT_SESSION_PATH)),
            self.session.as_ref(),
        )
        .json(&body)
        .send()
        .await
        .map_err(|e| StorefrontError::CheckoutEndpoint(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StorefrontError::CheckoutEndpoint(error_message(response).await));
        }

        let data: CreateCheckoutSessionResponse = response
            .json()
            .await
            .map_err(|e| StorefrontError::CheckoutEndpoint(e.to_string()))?;

        Ok(data.session_id)
    }
}
