//! Reading user-picked image files into upload parts.

#[cfg(test)]
#[path = "photo_test.rs"]
mod photo_test;

#[cfg(feature = "hydrate")]
use registry::api::PhotoPart;
#[cfg(feature = "hydrate")]
use registry::payload::{PhotoUpload, validate_photo};

/// Human-readable size, e.g. `"1.5 MB"`.
#[allow(clippy::cast_precision_loss)]
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.0} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Short caption for an attached photo.
pub fn photo_caption(file_name: &str, size_bytes: u64) -> String {
    format!("{file_name} ({})", format_file_size(size_bytes))
}

/// First file of an `<input type="file">` change event.
#[cfg(feature = "hydrate")]
pub fn first_file(ev: &leptos::ev::Event) -> Option<web_sys::File> {
    use wasm_bindgen::JsCast;
    let input = ev.target()?.dyn_into::<web_sys::HtmlInputElement>().ok()?;
    input.files()?.get(0)
}

/// Validate `file` and read its bytes.
///
/// # Errors
///
/// Returns a user-facing message when the file breaks a photo rule or cannot
/// be read.
#[cfg(feature = "hydrate")]
pub async fn read_photo(file: &web_sys::File) -> Result<PhotoPart, String> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let upload = PhotoUpload { file_name: file.name(), content_type: file.type_(), size_bytes: file.size() as u64 };
    validate_photo(&upload).map_err(|e| e.to_string())?;
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| "Could not read the selected file".to_owned())?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(PhotoPart { upload, bytes })
}

/// Object URL for previewing `file` in an `<img>`.
#[cfg(feature = "hydrate")]
pub fn preview_url(file: &web_sys::File) -> Option<String> {
    web_sys::Url::create_object_url_with_blob(file).ok()
}

/// Whether `url` came from `preview_url` and must be revoked when dropped.
/// Captured camera frames are `data:` URLs and own nothing.
pub fn is_object_url(url: &str) -> bool {
    url.starts_with("blob:")
}

/// Store `next` in `slot`, returning the displaced URL when it needs revoking.
pub fn swap_preview(slot: &mut Option<String>, next: Option<String>) -> Option<String> {
    let old = std::mem::replace(slot, next)?;
    (is_object_url(&old) && slot.as_deref() != Some(old.as_str())).then_some(old)
}

/// Release an object URL made by `preview_url`. Other URLs are ignored.
pub fn revoke_preview(url: Option<String>) {
    let Some(url) = url.filter(|u| is_object_url(u)) else {
        return;
    };
    #[cfg(feature = "hydrate")]
    if let Err(err) = web_sys::Url::revoke_object_url(&url) {
        log::warn!("could not revoke {url}: {err:?}");
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = url;
}
