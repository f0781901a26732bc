//! The source of randomness threaded through the samplers.

use rand::Rng;

/// A provider of integers drawn uniformly over an inclusive range.
///
/// Callers must only ask for ranges with `min <= max`; the samplers in [`crate::sampling`] check
/// this before drawing.
pub trait RandomSource {
    fn next_in_range(&mut self, min: usize, max: usize) -> usize;
}

/// Any `rand` generator works as a source.
///
/// `rand`'s uniform range sampling rejects and re-samples values that would otherwise bias the
/// result towards the low end of the range, so draws are uniform. Note that this says nothing about
/// unpredictability: `thread_rng()` is a reasonable choice, a seeded `StdRng` is reproducible but
/// obviously not secret.
impl<R: Rng + ?Sized> RandomSource for R {
    fn next_in_range(&mut self, min: usize, max: usize) -> usize {
        self.gen_range(min..=max)
    }
}

/// Replays a fixed sequence of raw values, cycling back to the start once exhausted.
///
/// Each raw value is reduced into the requested range (`min + value % span`), or used as is when
/// the range is all of `usize`. This is not uniform in any sense; it exists so a particular
/// generation can be reproduced exactly in tests.
#[derive(Clone, Debug)]
pub struct ReplaySource {
    values: Vec<usize>,
    position: usize,
}

impl ReplaySource {
    pub fn new(values: Vec<usize>) -> ReplaySource {
        ReplaySource {
            values,
            position: 0,
        }
    }

    /// How many values have been drawn so far (including wrapped-around draws).
    pub fn draws(&self) -> usize {
        self.position
    }
}

impl RandomSource for ReplaySource {
    fn next_in_range(&mut self, min: usize, max: usize) -> usize {
        if self.values.is_empty() {
            return min;
        }
        let raw = self.values[self.position % self.values.len()];
        self.position += 1;
        match (max - min).checked_add(1) {
            Some(span) => min + raw % span,
            // The whole of `usize`; every raw value is already in range.
            None => raw,
        }
    }
}
