//! Measurement input parsing.

use crate::error::{CliError, CliResult};
use std::io::BufRead;

/// One measurement, tagged with its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub line: u64,
    pub measured: f64,
}

/// Read one measurement per line. Blank lines and `#` comments are skipped.
pub fn read_samples<R: BufRead>(reader: R) -> CliResult<Vec<Sample>> {
    let mut samples = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }
        let line_no = idx as u64 + 1;
        let measured = text.parse::<f64>().map_err(|_| CliError::BadMeasurement {
            line: line_no,
            text: text.to_string(),
        })?;
        samples.push(Sample {
            line: line_no,
            measured,
        });
    }
    Ok(samples)
}
