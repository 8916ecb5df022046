//! Export orchestration
//!
//! Builds one request per composite (or per composite quadrant) and
//! hands them to an export backend.

mod backend;
mod local;
mod orchestrator;
mod request;

pub use backend::{ExportBackend, ExportTask, RecordingBackend};
pub use local::{LocalExportTask, LocalGeoTiffBackend};
pub use orchestrator::{build_export_requests, submit_requests};
pub use request::{ExportFormat, ExportRequest, ExportSettings};
