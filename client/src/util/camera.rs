//! Webcam capture for face identification.
//!
//! Requires a browser environment; every function is absent from SSR builds
//! and the identify page only calls them from hydrated event handlers.

#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, JsValue};

/// Ask for the camera and attach the stream to `video`.
///
/// # Errors
///
/// Returns a user-facing message if the browser has no camera API or the
/// user denies access.
#[cfg(feature = "hydrate")]
pub async fn start_camera(video: &web_sys::HtmlVideoElement) -> Result<web_sys::MediaStream, String> {
    let devices = web_sys::window()
        .ok_or("No browser window")?
        .navigator()
        .media_devices()
        .map_err(|_| "This browser cannot access a camera".to_owned())?;
    let constraints = web_sys::MediaStreamConstraints::new();
    constraints.set_video(&JsValue::TRUE);
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|_| "Camera request was rejected".to_owned())?;
    let stream: web_sys::MediaStream = wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(|_| "Camera access was denied".to_owned())?
        .dyn_into()
        .map_err(|_| "Camera returned an unexpected stream".to_owned())?;
    video.set_src_object(Some(&stream));
    if let Ok(play) = video.play() {
        let _ = wasm_bindgen_futures::JsFuture::from(play).await;
    }
    Ok(stream)
}

/// Draw the current video frame to an off-screen canvas and return it as a
/// JPEG data URL.
///
/// # Errors
///
/// Returns a message if the frame cannot be drawn or encoded.
#[cfg(feature = "hydrate")]
pub fn capture_frame(video: &web_sys::HtmlVideoElement) -> Result<String, String> {
    let document = web_sys::window().and_then(|w| w.document()).ok_or("No document")?;
    let canvas: web_sys::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| "Could not create canvas".to_owned())?
        .dyn_into()
        .map_err(|_| "Could not create canvas".to_owned())?;
    let (width, height) = (video.video_width(), video.video_height());
    if width == 0 || height == 0 {
        return Err("Camera is not ready yet".to_owned());
    }
    canvas.set_width(width);
    canvas.set_height(height);
    let ctx: web_sys::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into().ok())
        .ok_or("Canvas 2D context unavailable")?;
    ctx.draw_image_with_html_video_element(video, 0.0, 0.0)
        .map_err(|_| "Could not capture the frame".to_owned())?;
    canvas
        .to_data_url_with_type("image/jpeg")
        .map_err(|_| "Could not encode the frame".to_owned())
}

/// Stop every track of `stream`, releasing the camera.
#[cfg(feature = "hydrate")]
pub fn stop_camera(stream: &web_sys::MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<web_sys::MediaStreamTrack>() {
            track.stop();
        }
    }
}
