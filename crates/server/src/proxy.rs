//! Same-origin pass-through for the collaborator API.
//!
//! The page only ever talks to `/api/*` on its own origin; this module
//! forwards those requests to the configured upstream with the caller's
//! session headers.

use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{OriginalUri, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Request headers carried through to the upstream.
const FORWARDED_HEADERS: [header::HeaderName; 3] =
    [header::COOKIE, header::AUTHORIZATION, header::ACCEPT];

#[derive(Clone)]
pub struct Upstream {
    client: reqwest::Client,
    base: String,
}

impl Upstream {
    pub fn new(base: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base: base.into(),
        })
    }
}

/// Join the upstream base with the request's path and query, byte for byte.
pub fn upstream_url(base: &str, path_and_query: &str) -> String {
    let base = base.trim_end_matches('/');
    let rest = path_and_query.strip_suffix('?').unwrap_or(path_and_query);
    format!("{base}/{}", rest.trim_start_matches('/'))
}

pub fn router(upstream: Upstream) -> Router {
    Router::new()
        .route("/api/{*path}", get(forward))
        .with_state(upstream)
}

async fn forward(
    State(upstream): State<Upstream>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Response {
    // Percent-encoding is kept as received; decoded segments would change the request.
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    let url = upstream_url(&upstream.base, path_and_query);

    let mut outgoing = HeaderMap::new();
    for name in FORWARDED_HEADERS {
        if let Some(value) = headers.get(&name) {
            outgoing.insert(name, value.clone());
        }
    }

    let resp = match upstream.client.get(&url).headers(outgoing).send().await {
        Ok(resp) => resp,
        Err(e) => return bad_gateway(&url, e),
    };

    let status = resp.status();
    let mut reply_headers = HeaderMap::new();
    if let Some(content_type) = resp.headers().get(header::CONTENT_TYPE) {
        reply_headers.insert(header::CONTENT_TYPE, content_type.clone());
    }
    let body: Bytes = match resp.bytes().await {
        Ok(body) => body,
        Err(e) => return bad_gateway(&url, e),
    };

    tracing::debug!(%url, status = status.as_u16(), "proxied api request");
    (status, reply_headers, body).into_response()
}

fn bad_gateway(url: &str, err: reqwest::Error) -> Response {
    tracing::warn!(%url, error = %err, "upstream api unreachable");
    (
        StatusCode::BAD_GATEWAY,
        Json(json!({ "error": format!("upstream unavailable: {err}") })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::RawQuery;
    use axum::http::{Request, Uri};
    use tower::ServiceExt;

    /// Serve a fake upstream on an ephemeral port and return its base URL.
    async fn spawn_upstream() -> String {
        async fn regional(RawQuery(query): RawQuery, headers: HeaderMap) -> Json<serde_json::Value> {
            let cookie = headers
                .get(header::COOKIE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            Json(json!({ "query": query, "cookie": cookie }))
        }

        async fn echo_uri(uri: Uri) -> Json<serde_json::Value> {
            Json(json!({ "path": uri.path(), "query": uri.query() }))
        }

        async fn missing() -> (StatusCode, Json<serde_json::Value>) {
            (StatusCode::NOT_FOUND, Json(json!({ "error": "no such farm" })))
        }

        let app = Router::new()
            .route("/api/stats/regional", get(regional))
            .route("/api/farms/unknown", get(missing))
            .route("/api/diseases/{*name}", get(echo_uri));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_upstream_url_keeps_query() {
        assert_eq!(
            upstream_url("http://api:8000/", "/api/stats/regional?lat=1.5&lon=-2"),
            "http://api:8000/api/stats/regional?lat=1.5&lon=-2"
        );
        assert_eq!(upstream_url("http://api:8000", "/api/farms"), "http://api:8000/api/farms");
        assert_eq!(upstream_url("http://api:8000", "/api/farms?"), "http://api:8000/api/farms");
        assert_eq!(
            upstream_url("http://api:8000", "/api/diseases/Fire%20Blight%3Fx=1"),
            "http://api:8000/api/diseases/Fire%20Blight%3Fx=1"
        );
    }

    #[tokio::test]
    async fn test_forwards_query_and_cookie() {
        let base = spawn_upstream().await;
        let app = router(Upstream::new(base).unwrap());

        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/stats/regional?lat=44.5&lon=-73.2")
                    .header(header::COOKIE, "session=abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let body = body_json(resp).await;
        assert_eq!(body["query"], "lat=44.5&lon=-73.2");
        assert_eq!(body["cookie"], "session=abc");
    }

    #[tokio::test]
    async fn test_encoded_path_is_forwarded_unchanged() {
        let base = spawn_upstream().await;
        let app = router(Upstream::new(base).unwrap());

        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/diseases/Fire%20Blight%3Fadmin=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["path"], "/api/diseases/Fire%20Blight%3Fadmin=1");
        assert!(body["query"].is_null());
    }

    #[tokio::test]
    async fn test_upstream_status_passes_through() {
        let base = spawn_upstream().await;
        let app = router(Upstream::new(base).unwrap());

        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/farms/unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["error"], "no such farm");
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_bad_gateway() {
        // Bind then drop so the port is known to be closed.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let app = router(Upstream::new(format!("http://{addr}")).unwrap());
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/farms")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(resp).await;
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("upstream unavailable"));
    }
}
