//! `HealWell` Mart storefront library.
//!
//! A JSON API over an in-memory pharmacy catalog: categories, medicines,
//! reviews and session-scoped carts. The binary in `main.rs` wires this
//! router to a listener; tests drive it in-process.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod validation;

use std::time::Duration;

use axum::{
    Router,
    http::{HeaderValue, Request, Response, header},
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::{DefaultOnResponse, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::state::AppState;

/// Build the CORS layer: one exact origin when configured, otherwise any.
fn cors_layer(origin: Option<&HeaderValue>) -> CorsLayer {
    let allow_origin = origin.map_or_else(
        || AllowOrigin::from(Any),
        |origin| AllowOrigin::exact(origin.clone()),
    );

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([header::HeaderName::from_static(
            middleware::REQUEST_ID_HEADER,
        )])
}

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let api = routes::api_routes().layer(SetResponseHeaderLayer::if_not_present(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store"),
    ));

    Router::new()
        .nest("/health", routes::health_routes())
        .nest("/api", api)
        .layer(cors_layer(state.config().cors_origin.as_ref()))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(|response: &Response<_>, latency: Duration, span: &Span| {
                    span.record("status", response.status().as_u16());
                    span.record(
                        "latency_ms",
                        u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                    );
                    DefaultOnResponse::default().on_response(response, latency, span);
                }),
        )
        .with_state(state)
}
