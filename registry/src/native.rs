//! Native HTTP transport over `reqwest`, used by the asset host.

use std::time::Duration;

use crate::api::{ApiRequest, ApiResponse, Method, RequestBody, Transport, TransportError};
use crate::payload::PHOTO_FIELD;

const CONNECT_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// CLIENT
// =============================================================================

pub struct ReqwestTransport {
    http: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = request.url(&self.base_url);
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.http.request(method, url).query(&request.query);
        if request.timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(u64::from(request.timeout_ms)));
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart { fields, photo } => {
                let mut form = reqwest::multipart::Form::new();
                for (key, value) in fields.fields {
                    form = form.text(key, value);
                }
                if let Some(photo) = photo {
                    let part = reqwest::multipart::Part::bytes(photo.bytes)
                        .file_name(photo.upload.file_name)
                        .mime_str(&photo.upload.content_type)
                        .map_err(|e| TransportError::Network(e.to_string()))?;
                    form = form.part(PHOTO_FIELD, part);
                }
                builder.multipart(form)
            }
        };

        let response = builder.send().await.map_err(map_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_error)?;
        Ok(ApiResponse { status, body })
    }

    async fn sleep(&self, ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

fn map_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() { TransportError::Timeout } else { TransportError::Network(err.to_string()) }
}
