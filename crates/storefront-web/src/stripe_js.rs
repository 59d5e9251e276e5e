//! Stripe.js Redirect
//!
//! Calls `Stripe(key).redirectToCheckout({ sessionId })` on the global
//! loaded by the `<script src="https://js.stripe.com/v3">` tag.

use async_trait::async_trait;
use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use storefront_core::{CheckoutRedirect, CheckoutSessionId, Result, StorefrontError};

/// Publishable key baked in at build time
const PUBLISHABLE_KEY: Option<&str> = option_env!("STRIPE_PUBLISHABLE_KEY");

fn redirect_error(message: impl Into<String>) -> StorefrontError {
    StorefrontError::CheckoutRedirect(message.into())
}

fn js_error(value: &JsValue) -> StorefrontError {
    let message = Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"));
    redirect_error(message)
}

fn method(target: &JsValue, name: &str) -> Result<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .map_err(|e| js_error(&e))?
        .dyn_into::<Function>()
        .map_err(|_| redirect_error(format!("{name} is not available")))
}

/// Client-side redirect through Stripe.js
pub struct StripeJsRedirect {
    publishable_key: Option<String>,
}

impl StripeJsRedirect {
    pub fn from_env() -> Self {
        Self {
            publishable_key: PUBLISHABLE_KEY.map(String::from),
        }
    }
}

#[async_trait(?Send)]
impl CheckoutRedirect for StripeJsRedirect {
    async fn redirect_to_checkout(&self, session_id: &CheckoutSessionId) -> Result<()> {
        let key = self
            .publishable_key
            .as_deref()
            .ok_or_else(|| redirect_error("Stripe publishable key is not configured"))?;
        let window = web_sys::window().ok_or_else(|| redirect_error("no window"))?;

        let stripe = method(&window, "Stripe")?
            .call1(&window, &JsValue::from_str(key))
            .map_err(|e| js_error(&e))?;

        let options = Object::new();
        Reflect::set(
            &options,
            &JsValue::from_str("sessionId"),
            &JsValue::from_str(session_id.as_str()),
        )
        .map_err(|e| js_error(&e))?;

        let promise: Promise = method(&stripe, "redirectToCheckout")?
            .call1(&stripe, &options)
            .map_err(|e| js_error(&e))?
            .dyn_into()
            .map_err(|_| redirect_error("redirectToCheckout did not return a promise"))?;

        let result = JsFuture::from(promise).await.map_err(|e| js_error(&e))?;

        // Resolves only when the navigation failed, with `{ error }`
        match Reflect::get(&result, &JsValue::from_str("error")) {
            Ok(error) if !error.is_undefined() && !error.is_null() => Err(js_error(&error)),
            _ => Ok(()),
        }
    }
}
