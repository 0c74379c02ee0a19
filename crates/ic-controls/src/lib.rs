//! Integral feedback controller with ring-buffered adaptation logging.
//!
//! The controller drives a process variable toward a reference value using
//! pure integral feedback with output clamping. Every adaptation step can be
//! recorded into a fixed-capacity ring that is flushed to an injected sink as
//! fixed-width text whenever the ring wraps, and once more on teardown.
//!
//! # Architecture
//!
//! - [`IntegralController`] owns the bounds, the gain and the current signal
//! - [`LogRing`] holds the most recent [`LogRecord`]s, indexed by sequence id
//! - Sinks are any [`std::io::Write`]; pass `&mut W` to lend one
//! - [`ManagedController`] owns a ring and a log file for callers that just
//!   want a controller writing to a path

pub mod controller;
pub mod error;
pub mod log;
pub mod managed;

pub use controller::{ControllerContext, ControllerParams, Gain, IntegralController};
pub use error::{ControlError, ControlResult};
pub use log::{LogAttachment, LogRecord, LogRing};
pub use managed::ManagedController;
