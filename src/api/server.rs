use crate::api::routes;
use crate::config::SharedConfig;
use crate::limit::RateLimiter;
use crate::record_store::DynRecordStore;
use std::future::Future;
use std::sync::Arc;

/// The per-process context threaded through every handler: the fixed
/// configuration, the provider handle, and the shared token bucket.
#[derive(Clone)]
pub(super) struct AppState {
    pub config: SharedConfig,
    pub store: DynRecordStore,
    pub limiter: Arc<RateLimiter>,
}

/// Binds the configured address and serves the update endpoint until
/// `shutdown` resolves, then drains in-flight connections.
pub fn new(
    config: SharedConfig,
    store: DynRecordStore,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> impl Future<Output = hyper::Result<()>> {
    let addr = config.address;
    axum::Server::bind(&addr)
        .serve(routes::router(config, store).into_make_service())
        .with_graceful_shutdown(shutdown)
}
