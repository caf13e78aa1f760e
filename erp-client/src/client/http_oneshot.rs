// erp-client/src/client/http_oneshot.rs
// Oneshot HTTP client - in-memory calls
//
// Requires the "in-process" feature

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Method, Request, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::ImageUpload;
use tower::ServiceExt;

use crate::{ClientError, ClientResult};

use super::http::{HttpClient, decode_body};

const MULTIPART_BOUNDARY: &str = "erp-client-oneshot-boundary";

/// Oneshot HTTP client (in-memory calls)
///
/// Drives an axum `Router` through Tower's `oneshot` without opening a
/// socket. Useful for tests and for embedding a backend in-process.
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use erp_client::OneshotHttpClient;
///
/// let router: Router = mock_api();
/// let client = OneshotHttpClient::new(router);
/// let stock: serde_json::Value = client.get("/api/stock/").await?;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
    token: Option<String>,
}

impl OneshotHttpClient {
    /// # Arguments
    /// * `router` - a ready Router (`with_state` already applied)
    pub fn new(router: Router) -> Self {
        Self {
            router,
            token: None,
        }
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        content_type: Option<String>,
        body: Body,
    ) -> ClientResult<Request<Body>> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = &self.token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder
            .body(body)
            .map_err(|e| ClientError::Validation(format!("invalid request: {e}")))
    }

    async fn execute<T: DeserializeOwned>(&self, request: Request<Body>) -> ClientResult<T> {
        let method = request.method().clone();
        let path = request.uri().path().to_string();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Connection(format!("oneshot call failed: {e}")))?;

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Connection(format!("failed to read body: {e}")))?;
        tracing::debug!(%method, path = %path, status = status.as_u16(), "oneshot response");

        if !status.is_success() {
            return Err(ClientError::from_response(status, &body));
        }
        decode_body(&body)
    }
}

/// Encode a single-file `multipart/form-data` body.
fn multipart_body(field: &str, upload: &ImageUpload) -> Vec<u8> {
    let mut body = Vec::with_capacity(upload.bytes.len() + 256);
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{}\"\r\n",
            upload.file_name.replace('"', "")
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", upload.mime_type).as_bytes());
    body.extend_from_slice(&upload.bytes);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.request(Method::GET, path, None, Body::empty())?;
        self.execute(request).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let bytes = serde_json::to_vec(body)?;
        let request = self.request(
            Method::POST,
            path,
            Some("application/json".to_string()),
            Body::from(bytes),
        )?;
        self.execute(request).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.request(Method::POST, path, None, Body::empty())?;
        self.execute(request).await
    }

    async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        field: &str,
        upload: &ImageUpload,
    ) -> ClientResult<T> {
        let request = self.request(
            Method::POST,
            path,
            Some(format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}")),
            Body::from(multipart_body(field, upload)),
        )?;
        self.execute(request).await
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use serde_json::{Value, json};

    fn router() -> Router {
        Router::new()
            .route(
                "/api/echo-auth/",
                get(|headers: HeaderMap| async move {
                    let auth = headers
                        .get(header::AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("")
                        .to_string();
                    Json(json!({ "auth": auth }))
                }),
            )
            .route(
                "/api/echo/",
                post(|Json(body): Json<Value>| async move { Json(body) }),
            )
            .route(
                "/api/falla/",
                get(|| async {
                    (
                        StatusCode::CONFLICT,
                        Json(json!({"titulo": "Conflicto", "mensaje": "Registro duplicado"})),
                    )
                }),
            )
    }

    #[tokio::test]
    async fn bearer_token_is_attached() {
        let mut client = OneshotHttpClient::new(router());
        let anon: Value = client.get("/api/echo-auth/").await.unwrap();
        assert_eq!(anon["auth"], "");

        client.set_token(Some("t0k".into()));
        let authed: Value = client.get("/api/echo-auth/").await.unwrap();
        assert_eq!(authed["auth"], "Bearer t0k");
    }

    #[tokio::test]
    async fn json_body_round_trips() {
        let client = OneshotHttpClient::new(router());
        let echoed: Value = client
            .post("/api/echo/", &json!({"cantidad": "-5"}))
            .await
            .unwrap();
        assert_eq!(echoed, json!({"cantidad": "-5"}));
    }

    #[tokio::test]
    async fn error_body_becomes_typed_error() {
        let client = OneshotHttpClient::new(router());
        let err = client.get::<Value>("/api/falla/").await.unwrap_err();
        assert_eq!(err.title(), "Conflicto");
        assert_eq!(err.message(), "Registro duplicado");
        assert_eq!(err.status(), Some(StatusCode::CONFLICT));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let client = OneshotHttpClient::new(router());
        let err = client.get::<Value>("/api/nada/").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn multipart_body_names_the_field() {
        let upload = ImageUpload::new("foto.png", "image/png", vec![1, 2, 3]);
        let body = String::from_utf8_lossy(&multipart_body("imagen", &upload)).to_string();
        assert!(body.contains("name=\"imagen\"; filename=\"foto.png\""));
        assert!(body.contains("Content-Type: image/png"));
        assert!(body.ends_with(&format!("--{MULTIPART_BOUNDARY}--\r\n")));
    }
}
