//! Response spectrum HTTP server

use axum::{
    extract::Json,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};

use sdof_spectrum::integrators::Integrator;
use sdof_spectrum::request::{run_request, SpectrumRequest, SpectrumResponse};

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    integrators: Vec<&'static str>,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        integrators: Integrator::ALL.iter().map(|i| i.as_str()).collect(),
    })
}

async fn spectrum(Json(request): Json<SpectrumRequest>) -> impl IntoResponse {
    let start = Instant::now();

    // Sweeps are CPU bound; keep them off the async workers
    let result = tokio::task::spawn_blocking(move || run_request(&request)).await;
    let ms_elapsed = Some(start.elapsed().as_secs_f64() * 1000.0);

    match result {
        Ok(Ok(spectrum)) => {
            log::info!(
                "Computed {} ordinates with {} in {:.1} ms",
                spectrum.len(),
                spectrum.integrator,
                ms_elapsed.unwrap_or_default()
            );
            (
                StatusCode::OK,
                Json(SpectrumResponse::from_result(Ok(spectrum), ms_elapsed)),
            )
        }
        Ok(Err(e)) => {
            log::warn!("Rejected spectrum request: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(SpectrumResponse::from_result(Err(e), ms_elapsed)),
            )
        }
        Err(e) => {
            log::error!("Spectrum task failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SpectrumResponse::failure(e.to_string(), ms_elapsed)),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/v1/spectrum", post(spectrum))
        .layer(cors);

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8086".to_string());
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    log::info!("Spectrum server listening on http://{}", addr);
    println!("Spectrum Server listening on http://{}", addr);
    println!("  Health check: GET  /health");
    println!("  Spectrum:     POST /api/v1/spectrum");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
