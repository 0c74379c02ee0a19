//! Integral feedback controller.
//!
//! Each step computes `u' = clamp(u + K_I * (reference - measured), min, max)`.
//! There is no proportional or derivative action and no anti-windup: the
//! clamp bounds the output but the next step integrates from the clamped value.
//!
//! If no gain is supplied it is estimated on the first step as
//! `u / measured`, which scales the first correction to the ratio between the
//! initial signal and the first observation.

use crate::error::{ControlError, ControlResult};
use crate::log::{self, LogAttachment, LogRecord, LogRing};
use ic_core::{Real, clamp, ensure_finite, ensure_positive};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use tracing::{debug, trace, warn};

/// Integral gain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gain {
    /// Not known yet; taken from the first measurement.
    Unestimated,
    Estimated(Real),
}

impl Gain {
    /// Map a raw gain: anything not strictly positive means "estimate it".
    pub fn from_raw(k_i: Real) -> Self {
        if k_i > 0.0 {
            Gain::Estimated(k_i)
        } else {
            Gain::Unestimated
        }
    }

    /// The gain, if it is known yet.
    pub fn value(&self) -> Option<Real> {
        match *self {
            Gain::Estimated(k) => Some(k),
            Gain::Unestimated => None,
        }
    }
}

/// Constructor arguments for [`IntegralController`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerParams {
    /// Target value for the process variable.
    pub reference: Real,
    /// Lower bound of the control signal.
    pub min: Real,
    /// Upper bound of the control signal. May be `+inf`.
    pub max: Real,
    /// Signal before the first step.
    pub initial: Real,
    /// Integral gain, finite. Values `<= 0` are estimated on the first step.
    #[serde(default)]
    pub k_i: Real,
}

impl ControllerParams {
    /// Check the construction contract without building a controller.
    ///
    /// NaN fails every check. Infinite bounds pass wherever the ordering
    /// holds, so `max = +inf` gives a signal bounded only from below.
    pub fn validate(&self) -> ControlResult<()> {
        ensure_positive(self.reference, "reference must be positive")?;
        ensure_positive(self.min, "min must be positive")?;
        if self.max.is_nan() || self.max < self.min {
            return Err(ControlError::InvalidArg {
                what: "max must not be less than min",
            });
        }
        if self.initial.is_nan() || self.initial < self.min || self.initial > self.max {
            return Err(ControlError::InvalidArg {
                what: "initial must lie within [min, max]",
            });
        }
        ensure_finite(self.k_i, "k_i must be finite")?;
        Ok(())
    }
}

/// User-defined controller parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerContext {
    pub reference: Real,
    pub min: Real,
    pub max: Real,
    pub gain: Gain,
}

#[derive(Debug)]
struct LogState<W> {
    /// Next sequence id.
    id: u64,
    ring: Option<LogRing>,
    sink: Option<W>,
}

impl<W: Write> LogState<W> {
    fn disabled() -> Self {
        Self {
            id: 0,
            ring: None,
            sink: None,
        }
    }

    fn enabled_ring(&self) -> Option<&LogRing> {
        self.ring.as_ref().filter(|ring| ring.is_enabled())
    }

    fn record(&mut self, tag: u64, measured: Real, error: Real, signal: Real) {
        let Some(ring) = self.ring.as_mut().filter(|ring| ring.is_enabled()) else {
            return;
        };
        let wrapped = ring.push(LogRecord {
            id: self.id,
            tag,
            measured,
            error,
            signal,
        });
        if wrapped && let Some(sink) = self.sink.as_mut() {
            let capacity = ring.capacity();
            if let Err(err) = log::flush(sink, ring, capacity) {
                warn!(%err, id = self.id, capacity, "failed to flush adaptation log");
            }
        }
        self.id += 1;
    }

    fn take(&mut self) -> LogAttachment<W> {
        let state = std::mem::replace(self, Self::disabled());
        LogAttachment {
            ring: state.ring,
            sink: state.sink,
        }
    }
}

/// Discrete-time integral controller with optional ring-buffered logging.
///
/// `W` is the log sink type. Pass `&mut W` to keep ownership of a sink.
#[derive(Debug)]
pub struct IntegralController<W = io::Sink> {
    ctx: ControllerContext,
    signal: Real,
    log: LogState<W>,
}

impl<W: Write> IntegralController<W> {
    /// Create a controller with logging disabled.
    ///
    /// # Arguments
    ///
    /// * `reference` - Target value, `> 0`
    /// * `min` - Lower signal bound, `> 0`
    /// * `max` - Upper signal bound, `>= min`
    /// * `initial` - Starting signal, within `[min, max]`
    /// * `k_i` - Integral gain; `<= 0` means estimate on the first step
    pub fn new(
        reference: Real,
        min: Real,
        max: Real,
        initial: Real,
        k_i: Real,
    ) -> ControlResult<Self> {
        Self::from_params(&ControllerParams {
            reference,
            min,
            max,
            initial,
            k_i,
        })
    }

    /// Same as [`new`](Self::new), from a bundled parameter set.
    pub fn from_params(params: &ControllerParams) -> ControlResult<Self> {
        params.validate()?;
        let ctx = ControllerContext {
            reference: params.reference,
            min: params.min,
            max: params.max,
            gain: Gain::from_raw(params.k_i),
        };
        debug!(?ctx, initial = params.initial, "controller initialized");
        Ok(Self {
            ctx,
            signal: params.initial,
            log: LogState::disabled(),
        })
    }

    /// Compute the next control signal from a measurement.
    ///
    /// `tag` is stored with the log record and otherwise ignored. Fails with
    /// [`ControlError::InvalidArg`], leaving the controller untouched, when
    /// `measured` is not positive, when it would estimate a non-finite gain,
    /// or when the step has no defined result (e.g. `inf - inf`).
    pub fn adapt(&mut self, tag: u64, measured: Real) -> ControlResult<Real> {
        let measured = ensure_positive(measured, "measured value must be positive")?;

        let k_i = match self.ctx.gain {
            Gain::Estimated(k) => k,
            Gain::Unestimated => ensure_finite(
                self.signal / measured,
                "measured value too small to estimate the gain",
            )?,
        };

        let error = self.ctx.reference - measured;
        let raw = self.signal + k_i * error;
        if raw.is_nan() {
            return Err(ControlError::InvalidArg {
                what: "measured value gives an undefined control signal",
            });
        }

        if self.ctx.gain == Gain::Unestimated {
            debug!(k_i, signal = self.signal, measured, "estimated integral gain");
            self.ctx.gain = Gain::Estimated(k_i);
        }
        self.signal = clamp(raw, self.ctx.min, self.ctx.max);
        trace!(tag, measured, error, raw, signal = self.signal, "adapt");

        self.log.record(tag, measured, error, self.signal);
        Ok(self.signal)
    }

    /// Replace the reference. Bounds and the current signal are left as-is.
    pub fn set_reference(&mut self, reference: Real) -> ControlResult<()> {
        self.ctx.reference = ensure_positive(reference, "reference must be positive")?;
        debug!(reference, "reference updated");
        Ok(())
    }

    /// Attach, replace or remove the log ring and sink.
    ///
    /// The sequence id restarts at 0. Records buffered under the previous
    /// configuration are dropped without being flushed. When a sink is given
    /// the header line is written to it first; if that fails the error is
    /// returned but the new configuration stays in place.
    pub fn set_logging(
        &mut self,
        ring: Option<LogRing>,
        mut sink: Option<W>,
    ) -> ControlResult<()> {
        let header = match sink.as_mut() {
            Some(sink) => log::write_header(sink),
            None => Ok(()),
        };
        debug!(
            capacity = ring.as_ref().map_or(0, LogRing::capacity),
            has_sink = sink.is_some(),
            "logging configured"
        );
        self.log = LogState { id: 0, ring, sink };
        header.map_err(ControlError::from)
    }

    /// Remove ring and sink without flushing, returning them to the caller.
    pub fn detach_logging(&mut self) -> LogAttachment<W> {
        debug!(dropped = self.pending_records(), "logging detached");
        self.log.take()
    }

    /// Flush records written since the last wrap, then detach logging.
    pub fn flush_and_detach(&mut self) -> ControlResult<LogAttachment<W>> {
        let count = self.pending_records();
        let mut parts = self.log.take();
        if let (Some(ring), Some(sink)) = (parts.ring.as_ref(), parts.sink.as_mut()) {
            log::flush(sink, ring, count)?;
        }
        Ok(parts)
    }

    /// Flush pending records and release the controller.
    ///
    /// The ring and sink are returned, never closed here.
    pub fn teardown(mut self) -> ControlResult<LogAttachment<W>> {
        let parts = self.flush_and_detach()?;
        debug!(signal = self.signal, "controller torn down");
        Ok(parts)
    }

    /// Current control signal, always within `[min, max]`.
    pub fn signal(&self) -> Real {
        self.signal
    }

    /// Current reference value.
    pub fn reference(&self) -> Real {
        self.ctx.reference
    }

    /// Lower signal bound.
    pub fn min(&self) -> Real {
        self.ctx.min
    }

    /// Upper signal bound.
    pub fn max(&self) -> Real {
        self.ctx.max
    }

    /// Integral gain, [`Gain::Unestimated`] until the first successful step.
    pub fn gain(&self) -> Gain {
        self.ctx.gain
    }

    /// Reference, bounds and gain together.
    pub fn context(&self) -> &ControllerContext {
        &self.ctx
    }

    /// Id the next log record will get.
    pub fn sequence_id(&self) -> u64 {
        self.log.id
    }

    /// Whether a ring with non-zero capacity is attached.
    pub fn logging_enabled(&self) -> bool {
        self.log.enabled_ring().is_some()
    }

    /// Records buffered since the last wrap.
    pub fn pending_records(&self) -> usize {
        self.log
            .enabled_ring()
            .map_or(0, |ring| ring.pending(self.log.id))
    }

    /// The attached ring, if any.
    pub fn ring(&self) -> Option<&LogRing> {
        self.log.ring.as_ref()
    }

    /// The attached sink, if any.
    pub fn sink(&self) -> Option<&W> {
        self.log.sink.as_ref()
    }
}
