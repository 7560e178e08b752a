//! Face identification page: upload a photo or capture one from the camera,
//! then ask the backend who it is.
//!
//! DESIGN
//! ======
//! The live camera stream is kept in a local `StoredValue` and stopped on
//! capture, on mode switch, and on cleanup. Only one recognition runs at a
//! time; `IdentifyState::begin` gates re-entry.

use leptos::prelude::*;
use leptos_router::components::A;
use registry::{ClientConfig, PersonRecord};
use registry::api::{PhotoPart, RecognitionResult};

use crate::components::error_banner::ErrorBanner;
use crate::components::person_card::PersonCard;
use crate::components::photo_input::PhotoInput;
use crate::components::toast_host::notify;
use crate::state::identify::{CaptureMode, IdentifyState, IdentifyStatus, result_headline};
use crate::state::toast::{ToastKind, ToastState};
use crate::util::photo::revoke_preview;

#[component]
pub fn IdentifyPage() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let state = RwSignal::new(IdentifyState::default());
    let photo = RwSignal::new(None::<PhotoPart>);
    let video_ref = NodeRef::<leptos::html::Video>::new();

    #[cfg(feature = "hydrate")]
    let stream: StoredValue<Option<web_sys::MediaStream>, LocalStorage> = StoredValue::new_local(None);
    #[cfg(feature = "hydrate")]
    let release_camera = move || {
        stream.update_value(|slot| {
            if let Some(active) = slot.take() {
                crate::util::camera::stop_camera(&active);
            }
        });
    };
    #[cfg(feature = "hydrate")]
    on_cleanup(release_camera);

    let release_preview = move || revoke_preview(state.try_with_untracked(|s| s.preview.clone()).flatten());
    on_cleanup(release_preview);

    let finish = move |result: Result<RecognitionResult, registry::ApiError>| {
        if let Err(err) = &result {
            notify(toasts, ToastKind::Error, err.to_string());
        }
        state.update(|s| s.finish(result.map_err(|err| err.to_string())));
    };

    let switch_mode = move |mode: CaptureMode| {
        #[cfg(feature = "hydrate")]
        release_camera();
        if state.with_untracked(|s| s.mode) != mode {
            release_preview();
        }
        photo.set(None);
        state.update(|s| s.switch_mode(mode));
    };

    let on_photo = Callback::new(move |(part, url): (PhotoPart, Option<String>)| {
        let previous = state.with_untracked(|s| s.preview.clone());
        let replaces = url.is_some() && url != previous;
        if !state.try_update(|s| s.begin(url.clone())).unwrap_or(false) {
            revoke_preview(url);
            return;
        }
        if replaces {
            revoke_preview(previous);
        }
        photo.set(Some(part.clone()));
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            finish(crate::net::api::identify_upload(part).await);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (part, finish);
        }
    });
    let on_photo_error = Callback::new(move |message: String| notify(toasts, ToastKind::Error, message));

    let on_start_camera = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let Some(video) = video_ref.get_untracked() else {
                return;
            };
            leptos::task::spawn_local(async move {
                match crate::util::camera::start_camera(&video).await {
                    Ok(active) => {
                        stream.set_value(Some(active));
                        state.update(|s| s.status = IdentifyStatus::CameraActive);
                    }
                    Err(message) => {
                        log::warn!("camera unavailable: {message}");
                        state.update(|s| s.status = IdentifyStatus::Failed(message));
                    }
                }
            });
        }
    };

    let on_capture = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let Some(video) = video_ref.get_untracked() else {
                return;
            };
            let data_url = match crate::util::camera::capture_frame(&video) {
                Ok(data_url) => data_url,
                Err(message) => {
                    notify(toasts, ToastKind::Error, message);
                    return;
                }
            };
            if !state.try_update(|s| s.begin(Some(data_url.clone()))).unwrap_or(false) {
                return;
            }
            release_camera();
            leptos::task::spawn_local(async move {
                finish(crate::net::api::identify_capture(data_url).await);
            });
        }
    };

    let mode = move || state.with(|s| s.mode);
    let camera_live = move || state.with(|s| s.status == IdentifyStatus::CameraActive);
    let busy = move || state.with(IdentifyState::is_busy);
    let failure = Signal::derive(move || match state.with(|s| s.status.clone()) {
        IdentifyStatus::Failed(message) => vec![message],
        _ => Vec::new(),
    });
    let preview = Signal::derive(move || state.with(|s| s.preview.clone()));
    let api_base_url = config.api_base_url.clone();

    view! {
        <div class="identify-page">
            <h1>"Identify a face"</h1>
            <div class="identify-page__modes" role="tablist">
                <button
                    class="btn"
                    class:btn--active=move || mode() == CaptureMode::Upload
                    on:click=move |_| switch_mode(CaptureMode::Upload)
                >
                    "Upload photo"
                </button>
                <button
                    class="btn"
                    class:btn--active=move || mode() == CaptureMode::Camera
                    on:click=move |_| switch_mode(CaptureMode::Camera)
                >
                    "Use camera"
                </button>
            </div>

            <Show when=move || mode() == CaptureMode::Upload>
                <PhotoInput
                    label="Photo to identify"
                    photo=photo
                    preview=preview
                    on_photo=on_photo
                    on_error=on_photo_error
                />
            </Show>

            <div class="identify-page__camera" class:hidden=move || mode() != CaptureMode::Camera>
                <video class="identify-page__video" node_ref=video_ref autoplay=true muted=true></video>
                <div class="identify-page__camera-actions">
                    <Show
                        when=camera_live
                        fallback=move || {
                            view! {
                                <button class="btn" on:click=on_start_camera disabled=busy>
                                    "Start camera"
                                </button>
                            }
                        }
                    >
                        <button class="btn btn--primary" on:click=on_capture>
                            "Capture"
                        </button>
                    </Show>
                </div>
            </div>

            <Show when=busy>
                <p class="identify-page__busy">"Recognizing…"</p>
            </Show>
            <ErrorBanner messages=failure/>

            {move || match state.with(|s| s.status.clone()) {
                IdentifyStatus::Done(result) => {
                    let headline = result_headline(&result);
                    let matched = result.matched;
                    let api_base_url = api_base_url.clone();
                    view! {
                        <section class="identify-page__result" class:identify-page__result--miss=!matched>
                            <h2>{headline}</h2>
                            {result
                                .record
                                .map(|record| {
                                    let href = format!("/person/{}", record.id);
                                    view! {
                                        <PersonCard
                                            record=record
                                            api_base_url=api_base_url
                                            on_select=Callback::new(|_: PersonRecord| {})
                                        />
                                        <A href=href attr:class="btn">"Open record"</A>
                                    }
                                })}
                            <button
                                class="btn"
                                on:click=move |_| {
                                    release_preview();
                                    state.update(IdentifyState::reset);
                                }
                            >
                                "Try another"
                            </button>
                        </section>
                    }
                        .into_any()
                }
                _ => ().into_any(),
            }}
        </div>
    }
}
