//! HTTP host for the service: assembles the module routers, wraps them in the
//! shared middleware stack and serves them until cancelled.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, StatusCode},
    middleware::from_fn,
    response::IntoResponse,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

pub mod config;
pub mod error;
pub mod readiness;
pub mod request_id;
pub mod web;

pub use config::ApiIngressConfig;
pub use error::IngressError;
pub use readiness::{AlwaysReady, ReadinessCheck};

/// Owns the HTTP surface: health, readiness, docs, fallback and middleware.
pub struct ApiIngress {
    config: ApiIngressConfig,
    readiness: Arc<dyn ReadinessCheck>,
    openapi: Option<utoipa::openapi::OpenApi>,
}

impl Default for ApiIngress {
    fn default() -> Self {
        Self::new(ApiIngressConfig::default())
    }
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self {
            config,
            readiness: Arc::new(AlwaysReady),
            openapi: None,
        }
    }

    pub fn with_readiness(mut self, check: Arc<dyn ReadinessCheck>) -> Self {
        self.readiness = check;
        self
    }

    /// Add a module's document; several documents are merged into one.
    pub fn with_openapi(mut self, doc: utoipa::openapi::OpenApi) -> Self {
        match self.openapi.as_mut() {
            Some(existing) => existing.merge(doc),
            None => self.openapi = Some(doc),
        }
        self
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    /// Wrap the module routes (`api`) with the host endpoints and middleware.
    pub fn build_router(&self, api: Router) -> Router {
        let readiness = self.readiness.clone();
        let mut router = api
            .route("/health", get(web::health_check))
            .route("/ready", get(move || web::readiness(readiness.clone())));

        if self.config.enable_docs {
            router = self.mount_docs(router);
        }

        router = router
            .fallback(web::not_found)
            .method_not_allowed_fallback(web::not_found);

        // Layers run outermost-last: the final `layer` call sees the request first.
        // 7. Body limit
        router = router.layer(RequestBodyLimitLayer::new(self.config.body_limit_bytes));

        // 6. CORS (if enabled)
        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }

        // 5. Handler timeout
        router = router.layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(self.config.request_timeout_sec),
        ));

        // 4. Request span and access log
        router = router.layer(request_id::create_trace_layer());

        // 3. Copy the id into extensions for handlers
        router = router.layer(from_fn(request_id::push_req_id_to_extensions));

        // 2. Generate an id when the client sent none
        let x_request_id = request_id::header();
        router = router.layer(SetRequestIdLayer::new(
            x_request_id.clone(),
            request_id::MakeReqId,
        ));

        // 1. Echo the id back on the response
        router.layer(PropagateRequestIdLayer::new(x_request_id))
    }

    fn mount_docs(&self, router: Router) -> Router {
        let Some(doc) = &self.openapi else {
            tracing::debug!("no OpenAPI document registered; docs disabled");
            return router;
        };

        // Serialize once, serve as static JSON
        let body = match doc.to_json() {
            Ok(body) => Arc::new(body),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize the OpenAPI document");
                return router;
            }
        };
        tracing::info!(paths = doc.paths.paths.len(), "serving API docs at /api-docs");

        router
            .route(
                "/openapi.json",
                get(move || async move {
                    (
                        [
                            (header::CONTENT_TYPE, "application/json"),
                            (header::CACHE_CONTROL, "no-store"),
                        ],
                        (*body).clone(),
                    )
                        .into_response()
                }),
            )
            .route("/api-docs", get(web::serve_docs))
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, IngressError> {
        self.config
            .bind_addr
            .parse()
            .map_err(|source| IngressError::InvalidBindAddr {
                addr: self.config.bind_addr.clone(),
                source,
            })
    }

    /// Bind the configured address and serve `router` until `cancel` fires.
    pub async fn serve(&self, router: Router, cancel: CancellationToken) -> Result<(), IngressError> {
        let addr = self.bind_addr()?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| IngressError::Bind { addr, source })?;
        serve_on(listener, router, cancel).await
    }
}

/// Serve on an already bound listener; returns once in-flight requests drain.
pub async fn serve_on(
    listener: TcpListener,
    router: Router,
    cancel: CancellationToken,
) -> Result<(), IngressError> {
    let addr = listener.local_addr().map_err(IngressError::Serve)?;
    tracing::info!("HTTP server bound on {}", addr);

    let shutdown = async move {
        cancel.cancelled().await;
        tracing::info!("HTTP server shutting down gracefully (cancellation)");
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(IngressError::Serve)
}
