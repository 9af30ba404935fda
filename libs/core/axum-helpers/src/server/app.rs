use super::shutdown::{ShutdownCoordinator, coordinated_shutdown};
use crate::errors::handlers::{method_not_allowed, not_found};
use crate::http::{cors_layer, security_headers};
use axum::{Router, middleware};
use core_config::cors::CorsConfig;
use core_config::server::ServerConfig;
use std::io;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable as RedocServable};
use utoipa_swagger_ui::SwaggerUi;

/// Creates a configured Axum router with common middleware and documentation.
///
/// This function sets up:
/// - OpenAPI documentation (Swagger UI at `/swagger-ui`, ReDoc at `/redoc`)
/// - API routes nested under `/api`
/// - Request tracing, security headers, CORS and response compression
/// - JSON 404 fallback and 405 handler
///
/// Health endpoints are merged by the app (see [`health_router`](super::health_router)).
///
/// # Errors
/// Returns `InvalidInput` if the CORS configuration contains an invalid origin.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::create_router;
///
/// let router = create_router::<ApiDoc>(api_routes, &config.cors)?;
/// ```
pub fn create_router<T>(apis: Router, cors: &CorsConfig) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let cors = cors_layer(cors)?;

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors)
        .layer(CompressionLayer::new());

    Ok(router)
}

/// Serves `router` until SIGINT/SIGTERM, then runs `cleanup` bounded by
/// `server_config.shutdown_timeout`.
///
/// In-flight requests are drained by axum's graceful shutdown before cleanup
/// starts.
///
/// # Errors
/// Returns an error if the listener cannot bind or the server fails.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::create_production_app;
///
/// create_production_app(router, &config.server, async move {
///     tracing::info!("Releasing in-memory state");
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let shutdown_timeout = server_config.shutdown_timeout;

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let signal_handle = {
        let coordinator = coordinator.clone();
        tokio::spawn(async move { coordinator.wait_for_signal().await })
    };

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(coordinated_shutdown(coordinator))
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    signal_handle.abort();

    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(_) => info!("Cleanup completed successfully"),
        Err(_) => {
            tracing::warn!(
                "Cleanup exceeded timeout of {:?}, forcing shutdown",
                shutdown_timeout
            );
        }
    }

    serve_result
}
