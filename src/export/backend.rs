//! Export job submission interface
//!
//! A backend turns a request into a task; starting the task enqueues the
//! job. Nothing here observes job completion.

use std::sync::Mutex;

use log::debug;

use super::request::ExportRequest;
use crate::errors::{GrabError, GrabResult};

/// Handle of a prepared export job
pub trait ExportTask {
    fn description(&self) -> &str;

    /// Enqueue the job
    fn start(&mut self) -> GrabResult<()>;
}

/// Destination that accepts export jobs
pub trait ExportBackend {
    /// Validate a request and create its task without starting it
    fn prepare(&self, request: ExportRequest) -> GrabResult<Box<dyn ExportTask + '_>>;
}

/// Backend that only records the requests it is asked to start
#[derive(Debug, Default)]
pub struct RecordingBackend {
    started: Mutex<Vec<ExportRequest>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests started so far, in start order
    pub fn started(&self) -> Vec<ExportRequest> {
        match self.started.lock() {
            Ok(started) => started.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

struct RecordingTask<'a> {
    backend: &'a RecordingBackend,
    description: String,
    request: Option<ExportRequest>,
}

impl ExportTask for RecordingTask<'_> {
    fn description(&self) -> &str {
        &self.description
    }

    fn start(&mut self) -> GrabResult<()> {
        let request = self.request.take()
            .ok_or_else(|| GrabError::ExportError(format!("Task {} already started", self.description)))?;

        debug!("Recording export {}", request);
        self.backend.started.lock()
            .map_err(|_| GrabError::ExportError("Recording backend lock poisoned".to_string()))?
            .push(request);
        Ok(())
    }
}

impl ExportBackend for RecordingBackend {
    fn prepare(&self, request: ExportRequest) -> GrabResult<Box<dyn ExportTask + '_>> {
        Ok(Box::new(RecordingTask {
            backend: self,
            description: request.description.clone(),
            request: Some(request),
        }))
    }
}
