//! HTTP surface for the denoiser.
//!
//! One real endpoint: `POST /denoise` takes a multipart WAV upload and
//! answers with the cleaned WAV. Boundary errors (bad uploads, malformed
//! WAV) map to 400, internal failures to 500; the DSP core itself never
//! fails. Nothing is retried.

use crate::error::{Result, ServerError};
use axum::{
    body::Body,
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use clearwave_dsp::Denoiser;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address.
    pub bind_address: String,
    /// Maximum accepted upload size in bytes.
    pub max_upload_bytes: usize,
    /// Enable CORS (any origin; the browser recorder runs on a different
    /// origin in development).
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_upload_bytes: 50 * 1024 * 1024,
            enable_cors: true,
        }
    }
}

/// Shared request-handler state.
#[derive(Clone)]
pub struct ServerState {
    /// The configured denoiser. It owns nothing but constants, so handlers
    /// on different tasks share it freely.
    pub denoiser: Denoiser,
}

/// Denoise HTTP server.
pub struct DenoiseServer {
    config: ServerConfig,
    state: ServerState,
}

impl DenoiseServer {
    /// Create a server with the given configuration and a default
    /// denoiser.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            state: ServerState {
                denoiser: Denoiser::default(),
            },
        }
    }

    /// Replace the denoiser (custom tuning).
    pub fn with_denoiser(mut self, denoiser: Denoiser) -> Self {
        self.state.denoiser = denoiser;
        self
    }

    /// Get the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the Axum router.
    pub fn router(&self) -> Router {
        let mut app = Router::new()
            .route(
                "/denoise",
                post(handle_denoise).options(handle_preflight),
            )
            .route("/health", get(handle_health))
            .with_state(self.state.clone())
            .layer(DefaultBodyLimit::max(self.config.max_upload_bytes))
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            app = app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods([Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE]),
            );
        }

        app
    }

    /// Run the server until the process exits.
    pub async fn run(self) -> Result<()> {
        let addr: std::net::SocketAddr = self
            .config
            .bind_address
            .parse()
            .map_err(|e| ServerError::Config(format!("invalid bind address: {e}")))?;

        let router = self.router();

        tracing::info!("denoise server listening on {addr}");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .await
            .map_err(|e| ServerError::Server(e.to_string()))?;

        Ok(())
    }
}

/// `POST /denoise`: multipart form with a `file` field holding a WAV
/// payload; responds with the denoised audio as an attachment.
async fn handle_denoise(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> Response {
    // Find the "file" field. Other fields are ignored.
    let payload = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("file") => match field.bytes().await {
                Ok(bytes) => break bytes,
                Err(e) => {
                    tracing::warn!("failed to read upload: {e}");
                    return (StatusCode::BAD_REQUEST, "failed to read upload").into_response();
                }
            },
            Ok(Some(_)) => continue,
            Ok(None) => {
                tracing::warn!("no file field in request");
                return (StatusCode::BAD_REQUEST, "no file uploaded").into_response();
            }
            Err(e) => {
                tracing::warn!("failed to parse multipart form: {e}");
                return (StatusCode::BAD_REQUEST, "failed to parse upload").into_response();
            }
        }
    };

    let audio = match clearwave_wav::decode(&payload) {
        Ok(audio) => audio,
        Err(e) => {
            tracing::warn!("invalid WAV upload: {e}");
            return (StatusCode::BAD_REQUEST, format!("invalid WAV file: {e}")).into_response();
        }
    };

    tracing::info!(
        samples = audio.samples.len(),
        sample_rate = audio.sample_rate,
        channels = audio.channels,
        "received {:.2} s of audio",
        audio.duration_secs()
    );

    // The pipeline is pure CPU work; keep it off the async workers.
    let denoiser = state.denoiser;
    let sample_rate = audio.sample_rate;
    let cleaned = match tokio::task::spawn_blocking(move || {
        denoiser.process(&audio.samples, sample_rate)
    })
    .await
    {
        Ok(cleaned) => cleaned,
        Err(e) => {
            tracing::error!("denoise task failed: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "denoising failed").into_response();
        }
    };

    let result = clearwave_wav::encode(&cleaned, sample_rate);
    tracing::info!("returning {} bytes of cleaned audio", result.len());

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "audio/wav")
        .header(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"cleaned.wav\"",
        )
        .body(Body::from(result))
        .unwrap()
}

/// `OPTIONS /denoise`: CORS preflight, answered empty.
async fn handle_preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// `GET /health`: liveness probe.
async fn handle_health(State(state): State<ServerState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        frame_size: state.denoiser.config().frame_size,
    })
}

/// Health response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    frame_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_wav() -> Vec<u8> {
        let samples: Vec<f64> = (0..4096)
            .map(|i| 0.4 * (2.0 * std::f64::consts::PI * 440.0 * i as f64 / 44100.0).sin())
            .collect();
        clearwave_wav::encode(&samples, 44100)
    }

    fn multipart_body(field_name: &str, payload: &[u8]) -> (String, Vec<u8>) {
        let boundary = "clearwave-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; \
                 name=\"{field_name}\"; filename=\"voice.wav\"\r\n\
                 Content-Type: audio/wav\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(payload);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
        (
            format!("multipart/form-data; boundary={boundary}"),
            body,
        )
    }

    fn router() -> Router {
        DenoiseServer::new(ServerConfig::default()).router()
    }

    #[tokio::test]
    async fn test_denoise_roundtrip() {
        let (content_type, body) = multipart_body("file", &test_wav());
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/denoise")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "audio/wav"
        );
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"cleaned.wav\""
        );

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let audio = clearwave_wav::decode(&bytes).unwrap();
        assert_eq!(audio.sample_rate, 44100);
        assert_eq!(audio.samples.len(), 4096);
    }

    #[tokio::test]
    async fn test_rejects_malformed_wav() {
        let (content_type, body) = multipart_body("file", b"this is not a wav file");
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/denoise")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rejects_missing_file_field() {
        let (content_type, body) = multipart_body("attachment", &test_wav());
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/denoise")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let request = axum::http::Request::builder()
            .method("GET")
            .uri("/denoise")
            .body(Body::empty())
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_preflight() {
        let request = axum::http::Request::builder()
            .method("OPTIONS")
            .uri("/denoise")
            .body(Body::empty())
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_health() {
        let request = axum::http::Request::builder()
            .method("GET")
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.max_upload_bytes, 50 * 1024 * 1024);
        assert!(config.enable_cors);
    }
}
