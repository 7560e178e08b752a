//! Core model and orchestration for the Smart Face ID registry front-end.
//!
//! This crate is UI-framework agnostic: the Leptos `client` renders from it
//! and the asset host reuses its API client for upstream probes. Everything
//! that can be tested without a browser lives here.
//!
//! ARCHITECTURE
//! ============
//! - `record` mirrors the backend's loosely typed person records.
//! - `wizard` + `schemas` drive the multi-section registration forms.
//! - `payload` turns a finished draft into the multipart body the backend expects.
//! - `query` filters, sorts, and paginates fetched lists client-side.
//! - `retry` + `fallback` hold the request retry and registration fallback policies.
//! - `api` is the typed HTTP client, generic over a `Transport`.
//! - `storage` abstracts `localStorage`/`sessionStorage`.

pub mod api;
pub mod config;
pub mod fallback;
pub mod payload;
pub mod query;
pub mod record;
pub mod retry;
pub mod schemas;
pub mod storage;
pub mod wizard;

#[cfg(feature = "native")]
pub mod native;

pub use api::{ApiError, ApiRequest, ApiResponse, RegistryApi, Transport, TransportError};
pub use config::ClientConfig;
pub use fallback::{ProvisionalReason, RegisterOutcome};
pub use record::{Category, PersonRecord};
pub use wizard::{Wizard, WizardSchema};
