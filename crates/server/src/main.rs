mod config;
mod proxy;

use std::path::{Path, PathBuf};

use anyhow::Context;
use axum::http::HeaderValue;
use axum::{extract::State, response::Html, routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing_subscriber::EnvFilter;

use config::ServerConfig;
use proxy::Upstream;

/// Build a cache-controlled static file router.
///
/// Separated so tests can exercise the caching layer with arbitrary directories.
fn cached_static_router(dir: &Path, cache_header: &'static str) -> Router {
    let layer = SetResponseHeaderLayer::overriding(
        axum::http::header::CACHE_CONTROL,
        HeaderValue::from_static(cache_header),
    );
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(layer)
}

const CACHE_1DAY: &str = "public, max-age=86400, must-revalidate";
const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";

fn static_routes(static_dir: &Path, dist_dir: &Path) -> Router {
    Router::new()
        .nest("/static", cached_static_router(static_dir, CACHE_1DAY))
        .nest("/dist", cached_static_router(dist_dir, CACHE_IMMUTABLE))
        .nest(
            "/assets",
            cached_static_router(&dist_dir.join("assets"), CACHE_IMMUTABLE),
        )
}

/// Build the full application router.
fn build_app(config: &ServerConfig, upstream: Upstream) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/report/{lat}/{lon}", get(serve_index))
        .with_state(config.dist_dir.join("index.html"))
        .merge(proxy::router(upstream))
        .merge(static_routes(&config.static_dir, &config.dist_dir))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env().context("invalid server configuration")?;
    let upstream =
        Upstream::new(config.upstream.clone()).context("failed to build upstream client")?;
    let app = build_app(&config, upstream);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        port = config.port,
        upstream = %config.upstream,
        dist = %config.dist_dir.display(),
        "Blightwatch running at http://localhost:{}",
        config.port
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

async fn serve_index(State(index): State<PathBuf>) -> Html<String> {
    // Serve the built frontend, fall back to a simple message
    match tokio::fs::read_to_string(&index).await {
        Ok(html) => Html(html),
        Err(e) => {
            tracing::debug!(path = %index.display(), error = %e, "frontend bundle missing");
            Html(
                r#"<!DOCTYPE html>
<html>
<head><title>Blightwatch</title></head>
<body>
<h1>Blightwatch</h1>
<p>Frontend not built yet. The regional report API is available under <code>/api</code>.</p>
</body>
</html>"#
                    .to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    /// Create a temp dir with a test file and return the dir path.
    fn temp_dir_with_file(file_name: &str, content: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        if let Some(parent) = Path::new(file_name).parent() {
            std::fs::create_dir_all(dir.path().join(parent)).unwrap();
        }
        std::fs::write(dir.path().join(file_name), content).unwrap();
        dir
    }

    fn test_app(static_dir: &Path, dist_dir: &Path) -> Router {
        let config = ServerConfig {
            static_dir: static_dir.to_path_buf(),
            dist_dir: dist_dir.to_path_buf(),
            // Never contacted by these tests.
            upstream: "http://127.0.0.1:9".to_string(),
            ..ServerConfig::default()
        };
        let upstream = Upstream::new(config.upstream.clone()).unwrap();
        build_app(&config, upstream)
    }

    async fn request(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(resp: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_static_files_have_1day_cache() {
        let static_dir = temp_dir_with_file("severity.json", "{}");
        let dist_dir = temp_dir_with_file("index.html", "<html></html>");

        let resp = request(test_app(static_dir.path(), dist_dir.path()), "/static/severity.json").await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("cache-control").unwrap(),
            "public, max-age=86400, must-revalidate"
        );
    }

    #[tokio::test]
    async fn test_dist_bundles_have_immutable_cache() {
        let static_dir = temp_dir_with_file("severity.json", "{}");
        let dist_dir = temp_dir_with_file("blightwatch-abc123.js", "bundle()");

        let resp = request(
            test_app(static_dir.path(), dist_dir.path()),
            "/dist/blightwatch-abc123.js",
        )
        .await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("cache-control").unwrap(),
            "public, max-age=31536000, immutable"
        );
    }

    #[tokio::test]
    async fn test_dist_assets_have_immutable_cache() {
        let static_dir = temp_dir_with_file("severity.json", "{}");
        let dist_dir = temp_dir_with_file("assets/main-xyz.css", "body{}");

        let resp = request(
            test_app(static_dir.path(), dist_dir.path()),
            "/assets/main-xyz.css",
        )
        .await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("cache-control").unwrap(),
            "public, max-age=31536000, immutable"
        );
    }

    #[tokio::test]
    async fn test_missing_static_file_returns_404() {
        let static_dir = temp_dir_with_file("severity.json", "{}");
        let dist_dir = temp_dir_with_file("index.html", "<html></html>");

        let resp = request(
            test_app(static_dir.path(), dist_dir.path()),
            "/static/nonexistent.txt",
        )
        .await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_report_route_serves_app_shell() {
        let static_dir = temp_dir_with_file("severity.json", "{}");
        let dist_dir = temp_dir_with_file("index.html", "<html>blightwatch shell</html>");
        let app = test_app(static_dir.path(), dist_dir.path());

        let root = request(app.clone(), "/").await;
        assert_eq!(root.status(), StatusCode::OK);
        assert_eq!(body_text(root).await, "<html>blightwatch shell</html>");

        let report = request(app, "/report/44.4759/-73.2121").await;
        assert_eq!(report.status(), StatusCode::OK);
        assert_eq!(body_text(report).await, "<html>blightwatch shell</html>");
    }

    #[tokio::test]
    async fn test_index_falls_back_when_bundle_missing() {
        let static_dir = temp_dir_with_file("severity.json", "{}");
        let dist_dir = tempfile::tempdir().unwrap();

        let resp = request(test_app(static_dir.path(), dist_dir.path()), "/").await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains("Frontend not built yet"));
    }
}
