use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use base64::Engine;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use polar_walk::{
    Distributions, Interval, RandomWalk, RenderOptions, WalkConfig, WalkError, encode_png,
};

#[derive(Deserialize)]
struct WalkRequest {
    seed: Option<u64>,
    point_count: Option<usize>,
    start_point: Option<(f64, f64)>,
    radius: Option<Interval>,
    angle: Option<Interval>,
    #[serde(flatten)]
    options: RenderOptions,
}

#[derive(Serialize)]
struct WalkResponse {
    title: String,
    distance: f64,
    point_count: usize,
    width: u32,
    height: u32,
    data_url: String,
    legend: Vec<LegendItem>,
    color_range: Option<(usize, usize)>,
    timings: Vec<TimingEntry>,
}

#[derive(Serialize)]
struct LegendItem {
    label: String,
    color: String,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

/// Upper bound on points per request; the library itself has none.
const MAX_POINTS: usize = 1_000_000;

type ApiError = (StatusCode, Json<serde_json::Value>);

fn api_error(status: StatusCode, msg: impl ToString) -> ApiError {
    (status, Json(serde_json::json!({ "error": msg.to_string() })))
}

fn build_response(req: WalkRequest) -> Result<WalkResponse, WalkError> {
    let defaults = WalkConfig::default();
    let config = WalkConfig::new(
        req.point_count.unwrap_or(defaults.point_count),
        req.start_point.unwrap_or(defaults.start_point),
    );
    if config.point_count > MAX_POINTS {
        return Err(WalkError::InvalidConfiguration(format!(
            "point_count {} exceeds server limit {}",
            config.point_count, MAX_POINTS
        )));
    }
    let default_dists = Distributions::default();
    let dists = Distributions::new(
        req.radius.unwrap_or(default_dists.radius),
        req.angle.unwrap_or(default_dists.angle),
    );

    let mut walker = match req.seed {
        Some(seed) => RandomWalk::seeded(config, seed),
        None => RandomWalk::new(config),
    };
    let (figure, walk, timings) = polar_walk::plot(&mut walker, &dists, &req.options)?;

    let png = encode_png(&figure)?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&png);

    Ok(WalkResponse {
        title: figure.title,
        distance: figure.distance,
        point_count: walk.len(),
        width: figure.width,
        height: figure.height,
        data_url: format!("data:image/png;base64,{}", b64),
        legend: figure
            .legend
            .iter()
            .map(|e| LegendItem {
                label: e.label.to_string(),
                color: e.color.to_string(),
            })
            .collect(),
        color_range: figure.color_range,
        timings: timings
            .iter()
            .map(|t| TimingEntry {
                name: t.name.to_string(),
                ms: t.ms,
            })
            .collect(),
    })
}

async fn walk_handler(Json(req): Json<WalkRequest>) -> Result<Json<WalkResponse>, ApiError> {
    let result = tokio::task::spawn_blocking(move || build_response(req))
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))?;

    match result {
        Ok(resp) => Ok(Json(resp)),
        Err(e @ (WalkError::InvalidConfiguration(_) | WalkError::EmptyWalk)) => {
            Err(api_error(StatusCode::BAD_REQUEST, e))
        }
        Err(e) => Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e)),
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let frontend = ServeDir::new("frontend");

    let app = Router::new()
        .route("/api/walk", post(walk_handler))
        .fallback_service(frontend)
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    eprintln!("polar_walk server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}
