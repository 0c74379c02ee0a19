//! ic-core: numeric foundation for icontrol.
//!
//! Contains:
//! - numeric (Real + validation and clamping helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;

pub use error::CoreError;
pub use numeric::*;
