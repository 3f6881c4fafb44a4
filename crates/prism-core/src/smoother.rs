use std::collections::VecDeque;

use tracing::debug;

use crate::consts::{HISTORY_DEPTH, OVERSATURATION_CEILING};
use crate::frame::IntensityLine;

/// Bounded FIFO of the most recent intensity lines, all of equal length.
///
/// Pushing a line whose length differs from the stored lines discards the
/// history and restarts it with just the new line: the reader box was
/// resized, and the old columns no longer correspond to the new ones.
#[derive(Clone, Debug, Default)]
pub struct IntensityHistory {
    lines: VecDeque<IntensityLine>,
}

impl IntensityHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Length of the stored lines, when any exist.
    pub fn line_len(&self) -> Option<usize> {
        self.lines.front().map(IntensityLine::len)
    }

    /// Append a line, dropping the oldest once [`HISTORY_DEPTH`] is reached.
    pub fn push(&mut self, line: IntensityLine) {
        if let Some(expected) = self.line_len() {
            if line.len() != expected {
                debug!(
                    old_len = expected,
                    new_len = line.len(),
                    "intensity line length changed, resetting history"
                );
                self.lines.clear();
            }
        }
        if self.lines.len() == HISTORY_DEPTH {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// Element-wise mean across the stored lines, with the clipped-signal
    /// flag. None while the history is empty.
    pub fn averaged(&self) -> Option<SmoothedLine> {
        let first = self.lines.front()?;
        let n = self.lines.len() as f32;

        let mut values = vec![0.0f32; first.len()];
        for line in &self.lines {
            for (acc, v) in values.iter_mut().zip(&line.values) {
                *acc += v;
            }
        }
        for v in &mut values {
            *v /= n;
        }

        let oversaturated = is_oversaturated(&values);
        Some(SmoothedLine {
            values,
            oversaturated,
        })
    }
}

/// Averaged intensity line plus the clipped-signal flag.
///
/// Oversaturation is a warning for the caller, never an error: processing
/// continues with the clipped values.
#[derive(Clone, Debug, PartialEq)]
pub struct SmoothedLine {
    pub values: Vec<f32>,
    pub oversaturated: bool,
}

/// Whether any element exceeds [`OVERSATURATION_CEILING`].
pub fn is_oversaturated(values: &[f32]) -> bool {
    values.iter().any(|&v| v > OVERSATURATION_CEILING)
}
