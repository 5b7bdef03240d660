//! Cart session extractor.
//!
//! Carts are scoped by the client-chosen `x-session-id` header. There is no
//! cookie and no server-side session record: the header value is the key.
//! Requests without the header share the anonymous cart.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};

use healwell_core::SessionId;

/// The HTTP header carrying the cart session token.
pub const SESSION_ID_HEADER: &str = "x-session-id";

/// Extractor for the caller's cart session.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CartSession(session): CartSession) -> impl IntoResponse {
///     format!("cart for {session}")
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CartSession(pub SessionId);

impl<S> FromRequestParts<S> for CartSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(session_from_headers(&parts.headers)))
    }
}

/// Resolve the cart session from request headers.
///
/// The token is taken as given; a missing or blank header maps to the
/// anonymous session. Header bytes that are not valid UTF-8 are decoded
/// lossily rather than rejected.
#[must_use]
pub fn session_from_headers(headers: &HeaderMap) -> SessionId {
    headers
        .get(SESSION_ID_HEADER)
        .map_or_else(SessionId::anonymous, |value| {
            SessionId::parse(&String::from_utf8_lossy(value.as_bytes()))
        })
}
