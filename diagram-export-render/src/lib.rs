//! Diagram rendering through a remote HTTP endpoint.
//!
//! - [`request`]: URL-safe payload encoding and request URLs
//! - [`http`]: the [`Fetcher`] seam and the `ureq`-backed [`HttpFetcher`]
//! - [`exporter`]: [`DiagramExporter`], which turns entries into image files

pub mod error;
pub mod exporter;
pub mod http;
pub mod request;

pub use error::{ExportError, RenderFailure};
pub use exporter::{
    DiagramExporter, ExportObserver, PNG_SIGNATURE, RenderOutcome, RenderResult, RunSummary,
};
pub use http::{FetchError, Fetcher, HttpFetcher, MAX_RESPONSE_SIZE};
pub use request::{Endpoint, RenderRequest, encode_payload};
