use crate::api::api_error::APIError;
use crate::api::server::AppState;
use crate::auth;
use crate::config::SharedConfig;
use crate::error::Error;
use crate::limit::RateLimiter;
use crate::query::UpdateRequest;
use crate::reconcile;
use crate::record_store::DynRecordStore;
use axum::extract::{Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Builds the router for the configured endpoint path. The rate limiter
/// is created here, full, and shared by every handler invocation.
#[must_use]
pub fn router(config: SharedConfig, store: DynRecordStore) -> Router {
    let limiter = Arc::new(RateLimiter::new(config.limit_rps, config.limit_burst));
    Router::new()
        .route(&config.endpoint, any(update))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState {
            config,
            store,
            limiter,
        })
}

/// The per-request pipeline: admission, parsing, authentication,
/// reconciliation. Each stage either passes the request on or yields the
/// error that becomes the whole response.
async fn update(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, APIError> {
    state.limiter.check()?;

    let request = UpdateRequest::from_query(&params)?;

    if !auth::token_matches(&request.token, &state.config.security_token) {
        tracing::debug!("rejected update for \"{}\": bad token", request.name);
        return Err(Error::AuthFailed.into());
    }

    tracing::info!(
        "updating [{}] {} to {}",
        request.kind,
        request.name,
        request.addr
    );

    if let Err(err) = reconcile::reconcile(&request, state.store.as_ref()).await {
        tracing::warn!("update for \"{}\" failed: {err}", request.name);
        return Err(err.into());
    }

    let mut response = (StatusCode::OK, "Done\n").into_response();
    response.headers_mut().insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    Ok(response)
}
