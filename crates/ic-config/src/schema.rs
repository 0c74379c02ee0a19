//! Configuration schema definitions.

use ic_controls::ControllerParams;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControllerConfig {
    pub version: u32,
    pub controller: ControllerParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingDef {
    /// Ring capacity in records. 0 disables logging.
    pub capacity: usize,
    /// Log file, truncated on open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl ControllerConfig {
    pub fn new(controller: ControllerParams) -> Self {
        Self {
            version: crate::LATEST_VERSION,
            controller,
            logging: None,
        }
    }

    pub fn with_logging(mut self, capacity: usize, path: Option<PathBuf>) -> Self {
        self.logging = Some(LoggingDef { capacity, path });
        self
    }

    pub fn log_capacity(&self) -> usize {
        self.logging.as_ref().map_or(0, |l| l.capacity)
    }

    pub fn log_path(&self) -> Option<&std::path::Path> {
        self.logging.as_ref().and_then(|l| l.path.as_deref())
    }
}
