// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GeoSym Server - geological field observations to KML.
//!
//! Accepts CSV exports of field measurements (strike/dip planes, trend/plunge
//! lineations, mapped lines) and returns a KML document of orientation
//! symbols, colored per geologic unit.
//!
//! # Endpoints
//!
//! - `GET /api/v1/health` - Health check
//! - `POST /api/v1/export` - CSV upload to KML attachment
//! - `POST /api/v1/validate` - Per-cell range check of a CSV upload
//! - `GET /api/v1/colors` - Stored tag colors
//! - `PUT /api/v1/colors` - Store tag color overrides

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

mod config;
mod error;
mod routes;
mod services;
mod types;

use config::Config;
use services::color_store::CacheColorStore;
use services::elevation::HttpElevationService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub colors: Arc<CacheColorStore>,
    /// Present when an elevation API is configured.
    pub elevation: Option<Arc<HttpElevationService>>,
    pub config: Arc<Config>,
}

fn app(state: AppState) -> Router {
    let config = state.config.clone();

    Router::new()
        .route("/", get(routes::health::info))
        .route("/api/v1/health", get(routes::health::check))
        .route("/api/v1/export", post(routes::export::export))
        .route("/api/v1/validate", post(routes::validate::validate))
        .route(
            "/api/v1/colors",
            get(routes::colors::list).put(routes::colors::update),
        )
        .layer(DefaultBodyLimit::max(config.max_file_size_bytes()))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,tower_http=debug,geosym_server=debug".into()),
        )
        .pretty()
        .init();

    let config = Config::from_env();

    tracing::info!(
        port = config.port,
        cache_dir = %config.cache_dir,
        max_file_size_mb = config.max_file_size_mb,
        elevation = config.elevation_api_url.is_some(),
        "Starting GeoSym Server"
    );

    let colors = Arc::new(CacheColorStore::new(&config.cache_dir).await);
    let elevation = config.elevation_api_url.as_ref().map(|url| {
        Arc::new(HttpElevationService::new(
            url.clone(),
            config.elevation_api_key.clone(),
        ))
    });
    if elevation.is_none() {
        tracing::info!("ELEVATION_API_URL not set, elevation lookup disabled");
    }

    let state = AppState {
        colors,
        elevation,
        config: Arc::new(config.clone()),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app(state))
        .await
        .context("server stopped with an error")?;
    Ok(())
}
