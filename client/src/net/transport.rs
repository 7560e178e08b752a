//! `gloo-net` implementation of the registry `Transport`.
//!
//! Client-side (hydrate): real `fetch` calls raced against a `gloo-timers`
//! timeout. Server-side (SSR): every request fails fast, since the backend is
//! only ever called from the browser.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::fmt::Display;

use registry::api::{ApiRequest, ApiResponse, Transport, TransportError};

#[derive(Clone, Debug)]
pub struct BrowserTransport {
    base_url: String,
}

impl BrowserTransport {
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned() }
    }
}

impl Transport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        #[cfg(feature = "hydrate")]
        {
            use futures::future::{Either, select};

            let timeout_ms = request.timeout_ms;
            let fetch = Box::pin(fetch(&self.base_url, request));
            if timeout_ms == 0 {
                return fetch.await;
            }
            let timer = gloo_timers::future::TimeoutFuture::new(timeout_ms);
            match select(fetch, timer).await {
                Either::Left((result, _)) => result,
                Either::Right(((), _)) => Err(TransportError::Timeout),
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&self.base_url, request);
            Err(TransportError::Network("backend calls are browser-only".to_owned()))
        }
    }

    async fn sleep(&self, ms: u64) {
        crate::util::time::sleep_ms(ms).await;
    }
}

#[cfg(feature = "hydrate")]
async fn fetch(base_url: &str, request: ApiRequest) -> Result<ApiResponse, TransportError> {
    use gloo_net::http::{Method as HttpMethod, RequestBuilder};
    use registry::api::{Method, RequestBody};

    let method = match request.method {
        Method::Get => HttpMethod::GET,
        Method::Post => HttpMethod::POST,
        Method::Put => HttpMethod::PUT,
        Method::Delete => HttpMethod::DELETE,
    };
    let mut builder = RequestBuilder::new(&request.url(base_url))
        .method(method)
        .query(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    if let Some(token) = &request.bearer {
        builder = builder.header("Authorization", &format!("Bearer {token}"));
    }
    let built = match request.body {
        RequestBody::Empty => builder.build(),
        RequestBody::Json(value) => builder.json(&value),
        RequestBody::Multipart { fields, photo } => builder.body(form_data(&fields, photo.as_ref())?),
    };
    let built = built.map_err(|e| TransportError::Network(e.to_string()))?;
    let response = built.send().await.map_err(|e| TransportError::Network(e.to_string()))?;
    let status = response.status();
    into_response(status, response.text().await)
}

/// Pair a status with its body. An unreadable body is a network failure, not
/// an empty answer.
pub fn into_response<E: Display>(status: u16, body: Result<String, E>) -> Result<ApiResponse, TransportError> {
    body.map(|body| ApiResponse { status, body })
        .map_err(|err| TransportError::Network(format!("could not read response body: {err}")))
}

#[cfg(feature = "hydrate")]
fn form_data(
    fields: &registry::payload::FormPayload,
    photo: Option<&registry::api::PhotoPart>,
) -> Result<web_sys::FormData, TransportError> {
    let broken = |_| TransportError::Network("could not build form data".to_owned());
    let form = web_sys::FormData::new().map_err(broken)?;
    for (key, value) in &fields.fields {
        form.append_with_str(key, value).map_err(broken)?;
    }
    if let Some(photo) = photo {
        let bytes = js_sys::Uint8Array::from(photo.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(&photo.upload.content_type);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(broken)?;
        form.append_with_blob_and_filename(registry::payload::PHOTO_FIELD, &blob, &photo.upload.file_name)
            .map_err(broken)?;
    }
    Ok(form)
}
