//! Building and submitting export requests

use std::sync::Arc;

use log::{info, warn};

use super::backend::ExportBackend;
use super::request::{ExportRequest, ExportSettings};
use crate::errors::{GrabError, GrabResult};
use crate::geometry::RegionOfInterest;
use crate::selection::CompositeImage;
use crate::utils::progress::ProgressTracker;

/// Requests exporting one composite over the region
///
/// Without splitting a single request covers the region's bounds and is
/// named `base_name`. With splitting there is one request per quadrant,
/// named `{base_name}_part_{index}`.
pub fn build_export_requests(composite: &Arc<CompositeImage>,
                             roi: &RegionOfInterest,
                             split_output: bool,
                             settings: &ExportSettings,
                             base_name: &str) -> Vec<ExportRequest> {
    let bounds = roi.bounds();

    if !split_output {
        return vec![ExportRequest::new(base_name, Arc::clone(composite), bounds, None, settings)];
    }

    bounds.quadrants()
        .iter()
        .map(|quadrant| {
            let name = format!("{}_part_{}", base_name, quadrant.index);
            ExportRequest::new(&name, Arc::clone(composite), quadrant.bbox, Some(*quadrant), settings)
        })
        .collect()
}

/// Hand every request to the backend and start it
///
/// Jobs are started in order and not waited on. Requests whose region
/// holds no pixel of the composite are skipped with a warning; any other
/// failure aborts the remaining submissions. Returns the started
/// descriptions.
pub fn submit_requests(requests: Vec<ExportRequest>, backend: &dyn ExportBackend) -> GrabResult<Vec<String>> {
    let progress = ProgressTracker::new(requests.len() as u64, "Submitting exports");
    let mut started = Vec::with_capacity(requests.len());

    for request in requests {
        info!("exporting: {}", request.description);
        progress.set_message(&request.description);

        let mut task = match backend.prepare(request) {
            Ok(task) => task,
            Err(GrabError::EmptyRegion(msg)) => {
                warn!("Skipping export, {}", msg);
                progress.increment(1);
                continue;
            }
            Err(e) => return Err(e),
        };
        task.start()?;

        started.push(task.description().to_string());
        progress.increment(1);
    }

    progress.finish();
    Ok(started)
}
