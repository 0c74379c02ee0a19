//! Adaptation log: fixed-capacity ring of records and its text format.
//!
//! Records are written into slot `id % capacity`. Writing the last slot is a
//! wrap, at which point the owner flushes the whole ring to its sink in slot
//! order. Lines are fixed-width:
//!
//! ```text
//! ID               USER_TAG         MEASURED         ERROR            U
//! 0                7                150.000000       -50.000000       133.333333
//! ```

use ic_core::Real;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// One adaptation step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Sequence id assigned by the controller.
    pub id: u64,
    /// Caller-supplied correlation tag.
    pub tag: u64,
    /// Measured process variable.
    pub measured: Real,
    /// `reference - measured`.
    pub error: Real,
    /// Control signal after clamping.
    pub signal: Real,
}

/// Fixed-capacity circular buffer of [`LogRecord`]s.
///
/// A ring with capacity 0 is valid and disables logging.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRing {
    slots: Box<[LogRecord]>,
}

impl LogRing {
    /// Ring with `capacity` default-filled slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![LogRecord::default(); capacity].into_boxed_slice(),
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Capacity is non-zero.
    pub fn is_enabled(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Slot that sequence id `id` maps to, `None` for a zero-capacity ring.
    fn slot_for(&self, id: u64) -> Option<usize> {
        if self.slots.is_empty() {
            None
        } else {
            Some((id % self.slots.len() as u64) as usize)
        }
    }

    /// Number of records written since the last wrap, given the next id.
    pub fn pending(&self, next_id: u64) -> usize {
        self.slot_for(next_id).unwrap_or(0)
    }

    /// Store `record` in the slot for its id.
    ///
    /// Returns `true` when the record landed in the last slot, i.e. the ring
    /// is full and should be flushed.
    pub fn push(&mut self, record: LogRecord) -> bool {
        let Some(slot) = self.slot_for(record.id) else {
            return false;
        };
        self.slots[slot] = record;
        slot == self.slots.len() - 1
    }

    /// The first `count` slots (clamped to capacity).
    pub fn records(&self, count: usize) -> &[LogRecord] {
        &self.slots[..count.min(self.slots.len())]
    }

    /// All slots in index order.
    pub fn slots(&self) -> &[LogRecord] {
        &self.slots
    }
}

/// Ring and sink handed back by detach or teardown.
#[derive(Debug)]
pub struct LogAttachment<W> {
    pub ring: Option<LogRing>,
    pub sink: Option<W>,
}

impl<W> LogAttachment<W> {
    /// Neither a ring nor a sink was attached.
    pub fn is_empty(&self) -> bool {
        self.ring.is_none() && self.sink.is_none()
    }
}

pub fn write_header<W: Write + ?Sized>(sink: &mut W) -> io::Result<()> {
    writeln!(
        sink,
        "{:<16} {:<16} {:<16} {:<16} {:<16}",
        "ID", "USER_TAG", "MEASURED", "ERROR", "U"
    )
}

pub fn write_record<W: Write + ?Sized>(sink: &mut W, record: &LogRecord) -> io::Result<()> {
    writeln!(
        sink,
        "{:<16} {:<16} {:<16.6} {:<16.6} {:<16.6}",
        record.id, record.tag, record.measured, record.error, record.signal
    )
}

/// Write the first `count` records of `ring` to `sink`, in slot order.
pub fn flush<W: Write + ?Sized>(sink: &mut W, ring: &LogRing, count: usize) -> io::Result<()> {
    if count == 0 {
        return Ok(());
    }
    for record in ring.records(count) {
        write_record(sink, record)?;
    }
    sink.flush()
}
