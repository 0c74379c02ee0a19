//! Controller that owns its log ring and log file.

use crate::controller::{ControllerParams, IntegralController};
use crate::error::ControlResult;
use crate::log::LogRing;
use ic_core::Real;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, warn};

type FileSink = BufWriter<File>;

/// An [`IntegralController`] bundled with the resources it logs to.
///
/// Dropping without [`close`](Self::close) still flushes pending records, but
/// errors can then only be reported through `tracing`.
#[derive(Debug)]
pub struct ManagedController {
    controller: IntegralController<FileSink>,
}

impl ManagedController {
    /// Build a controller, a `capacity`-slot ring and, if `capacity > 0` and
    /// a path is given, a freshly truncated log file.
    ///
    /// Parameters are validated before the file is touched. Any failure
    /// releases whatever was already created.
    pub fn open(
        params: &ControllerParams,
        capacity: usize,
        log_path: Option<&Path>,
    ) -> ControlResult<Self> {
        let mut controller = IntegralController::from_params(params)?;
        if capacity > 0 {
            let sink = match log_path {
                Some(path) => Some(BufWriter::new(File::create(path)?)),
                None => None,
            };
            debug!(capacity, path = ?log_path, "opening controller log");
            controller.set_logging(Some(LogRing::new(capacity)), sink)?;
        }
        Ok(Self { controller })
    }

    pub fn adapt(&mut self, tag: u64, measured: Real) -> ControlResult<Real> {
        self.controller.adapt(tag, measured)
    }

    pub fn set_reference(&mut self, reference: Real) -> ControlResult<()> {
        self.controller.set_reference(reference)
    }

    pub fn signal(&self) -> Real {
        self.controller.signal()
    }

    pub fn controller(&self) -> &IntegralController<FileSink> {
        &self.controller
    }

    /// Flush pending records and close the log file.
    pub fn close(mut self) -> ControlResult<()> {
        self.release()
    }

    fn release(&mut self) -> ControlResult<()> {
        let parts = self.controller.flush_and_detach()?;
        if let Some(mut file) = parts.sink {
            file.flush()?;
        }
        Ok(())
    }
}

impl Drop for ManagedController {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            warn!(%err, "failed to release controller log");
        }
    }
}
