//! Scripted `DeterministicRng` implementations.

use liveshop_core::rng::DeterministicRng;

/// Always draws the lowest value of the range: the first user, event and
/// product, and a quantity of one.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }
}

/// Replays a fixed script of draws, starting over when it runs out.
///
/// Each draw is clamped into the requested range, so one script stays valid
/// across catalogs of different sizes. An empty script behaves like
/// [`MockRng`].
#[derive(Debug)]
pub struct SequenceRng {
    script: Vec<u32>,
    cursor: usize,
}

impl SequenceRng {
    /// Replays `script` in order.
    #[must_use]
    pub fn new(script: Vec<u32>) -> Self {
        Self { script, cursor: 0 }
    }

    /// Number of draws taken so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        let Some(&value) = self.script.get(self.cursor % self.script.len().max(1)) else {
            return min;
        };
        self.cursor += 1;
        value.clamp(min, max)
    }
}
