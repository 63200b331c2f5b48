use std::net::SocketAddr;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use instaframe::FrameError;
use instaframe::config::{self, ParamOverrides, Params, Preset};
use instaframe::export::{self, ExportFormat};
use instaframe::rng::{Rng, SEED_MASK, entropy_seed};

/// Static client served for every path outside `/api`.
const FRONTEND_DIR: &str = "frontend";

/// Base64 inflates uploads by a third; leave room for the JSON envelope.
const BODY_LIMIT: usize = export::MAX_UPLOAD_BYTES * 4 / 3 + 64 * 1024;

#[derive(Deserialize)]
struct FrameRequest {
    /// Base64 or data URL. Absent means nothing is loaded yet.
    image: Option<String>,
    preset: Option<Preset>,
    #[serde(flatten)]
    overrides: ParamOverrides,
    seed: Option<u64>,
    #[serde(default)]
    format: ExportFormat,
}

#[derive(Serialize)]
struct FrameResponse {
    frame: Option<FrameOut>,
    timings: Vec<TimingEntry>,
}

#[derive(Serialize)]
struct FrameOut {
    data_url: String,
    file_name: String,
    width: usize,
    height: usize,
    seed: u64,
    params: Params,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

#[derive(Serialize)]
struct PresetEntry {
    name: &'static str,
    params: Params,
}

#[derive(Serialize)]
struct PresetsResponse {
    presets: Vec<PresetEntry>,
    ranges: &'static [config::Range],
    default: &'static str,
}

struct ApiError(FrameError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        tracing::warn!(%status, error = %self.0, "frame request failed");
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, Json(body)).into_response()
    }
}

impl From<FrameError> for ApiError {
    fn from(e: FrameError) -> Self {
        Self(e)
    }
}

fn frame_blocking(req: FrameRequest) -> Result<FrameResponse, FrameError> {
    let Some(payload) = req.image else {
        return Ok(FrameResponse {
            frame: None,
            timings: Vec::new(),
        });
    };

    let params = req
        .preset
        .unwrap_or(Preset::Classic)
        .params()
        .with_overrides(&req.overrides)
        .sanitized();
    let seed = req.seed.map_or_else(entropy_seed, |s| s & SEED_MASK);

    let source = export::decode_base64(&payload)?;
    let (framed, timings) = instaframe::render(&source, &params, &mut Rng::new(seed))?;
    let bytes = export::encode(&framed.surface, req.format)?;

    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);

    let timing_entries = timings
        .iter()
        .map(|t| TimingEntry {
            name: t.name.to_string(),
            ms: t.ms,
        })
        .collect();

    Ok(FrameResponse {
        frame: Some(FrameOut {
            data_url: export::data_url(&bytes, req.format),
            file_name: export::file_name(req.format, millis),
            width: framed.layout.width,
            height: framed.layout.height,
            seed,
            params,
        }),
        timings: timing_entries,
    })
}

async fn frame_handler(Json(req): Json<FrameRequest>) -> Result<Json<FrameResponse>, ApiError> {
    let response = tokio::task::spawn_blocking(move || frame_blocking(req))
        .await
        .map_err(|e| FrameError::Other(anyhow::anyhow!("render task failed: {e}")))??;
    Ok(Json(response))
}

async fn presets_handler() -> Json<PresetsResponse> {
    Json(PresetsResponse {
        presets: Preset::ALL
            .into_iter()
            .map(|p| PresetEntry {
                name: p.name(),
                params: p.params(),
            })
            .collect(),
        ranges: &config::RANGES,
        default: Preset::Classic.name(),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    let frontend = ServeDir::new(FRONTEND_DIR);

    let app = Router::new()
        .route("/api/frame", post(frame_handler))
        .route("/api/presets", get(presets_handler))
        .fallback_service(frontend)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    tracing::info!("instaframe server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use instaframe::Surface;
    use std::path::Path;

    fn request(body: serde_json::Value) -> FrameRequest {
        serde_json::from_value(body).unwrap()
    }

    fn tiny_png() -> String {
        let s = Surface::new(4, 3, [90, 120, 150, 255]);
        let bytes = export::encode(&s, ExportFormat::Png).unwrap();
        export::data_url(&bytes, ExportFormat::Png)
    }

    #[test]
    fn frontend_directory_ships_an_index() {
        let index = Path::new(env!("CARGO_MANIFEST_DIR")).join(FRONTEND_DIR).join("index.html");
        assert!(index.is_file(), "missing {}", index.display());
    }

    #[test]
    fn no_image_means_no_frame() {
        let resp = frame_blocking(request(serde_json::json!({ "preset": "vintage" }))).unwrap();
        assert!(resp.frame.is_none());
        assert!(resp.timings.is_empty());
    }

    #[test]
    fn reported_seed_is_exact_as_a_json_number() {
        let resp = frame_blocking(request(serde_json::json!({ "image": tiny_png() }))).unwrap();
        let frame = resp.frame.unwrap();
        assert!(frame.seed <= SEED_MASK);

        let wire: serde_json::Value = serde_json::to_value(&frame.seed).unwrap();
        assert_eq!(wire.as_f64().unwrap() as u64, frame.seed);
    }

    #[test]
    fn oversized_client_seed_is_folded_and_reproducible() {
        let body = serde_json::json!({ "image": tiny_png(), "seed": u64::MAX, "texture": 0.0 });
        let a = frame_blocking(request(body.clone())).unwrap().frame.unwrap();
        let b = frame_blocking(request(body)).unwrap().frame.unwrap();
        assert_eq!(a.seed, SEED_MASK);
        assert_eq!(a.data_url, b.data_url);
    }
}
