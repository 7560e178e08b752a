//! Image picker with preview and client-side type/size checks.

use leptos::prelude::*;
use registry::api::PhotoPart;

use crate::util::photo::photo_caption;

#[component]
pub fn PhotoInput(
    #[prop(into)] label: String,
    /// Currently attached photo, if any.
    #[prop(into)]
    photo: Signal<Option<PhotoPart>>,
    #[prop(into)] preview: Signal<Option<String>>,
    /// Called with the accepted photo and its preview URL.
    on_photo: Callback<(PhotoPart, Option<String>)>,
    on_error: Callback<String>,
) -> impl IntoView {
    let on_change = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            let Some(file) = crate::util::photo::first_file(&ev) else {
                return;
            };
            leptos::task::spawn_local(async move {
                match crate::util::photo::read_photo(&file).await {
                    Ok(part) => on_photo.run((part, crate::util::photo::preview_url(&file))),
                    Err(message) => on_error.run(message),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (ev, on_photo, on_error);
        }
    };

    view! {
        <label class="photo-input">
            <span class="form-field__label">{label}</span>
            <input type="file" accept="image/jpeg,image/png,image/webp" on:change=on_change/>
            {move || {
                preview
                    .get()
                    .map(|src| view! { <img class="photo-input__preview" src=src alt="Selected photo"/> })
            }}
            {move || {
                photo
                    .get()
                    .map(|part| {
                        view! {
                            <span class="photo-input__caption">
                                {photo_caption(&part.upload.file_name, part.upload.size_bytes)}
                            </span>
                        }
                    })
            }}
        </label>
    }
}
