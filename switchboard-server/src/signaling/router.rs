use crate::{Coordinator, RelayConfig, RelayError, SignalingService, ws_handler};
use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub participants: usize,
}

/// `/ws` for participants, `/health` for liveness checks.
pub fn router(service: SignalingService, config: &RelayConfig) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health_handler))
        .layer(cors_layer(&config.allowed_origins))
        .with_state(service)
}

/// Spawns a coordinator, binds `config.bind_addr` and serves until `shutdown`
/// resolves.
pub async fn serve<F>(config: RelayConfig, shutdown: F) -> Result<(), RelayError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| RelayError::Bind {
            addr: config.bind_addr,
            source,
        })?;

    let coordinator = Coordinator::spawn(&config);
    let service = SignalingService::new(coordinator, config.outbound_buffer);
    let app = router(service, &config);

    info!("Signaling server listening on http://{}", config.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(RelayError::Serve)
}

async fn health_handler(
    State(service): State<SignalingService>,
) -> Result<Json<HealthReport>, StatusCode> {
    let participants = service
        .coordinator()
        .connected_count()
        .await
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)?;

    Ok(Json(HealthReport {
        status: "ok",
        participants,
    }))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}
