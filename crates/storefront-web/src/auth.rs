//! Auth Session
//!
//! The auth provider's client library persists its session in local
//! storage; the storefront only reads it.

use gloo_storage::{LocalStorage, Storage};
use storefront_core::Session;

/// Local storage key the auth provider writes the session under
pub const SESSION_STORAGE_KEY: &str = "storefront.session";

/// The signed-in session, if any
pub fn current_session() -> Option<Session> {
    match LocalStorage::get::<Session>(SESSION_STORAGE_KEY) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::debug!(error = %e, "No stored session");
            None
        }
    }
}
