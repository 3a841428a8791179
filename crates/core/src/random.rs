//! Injectable randomness for template selection and id generation.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::element::ElementId;

/// Source of pseudo-random numbers used by the composer.
///
/// Production code uses [`StdRandom::from_entropy`]; tests pass a seeded
/// source (or their own implementation) to get reproducible output.
pub trait RandomSource {
    fn next_u64(&mut self) -> u64;

    /// Returns an index in `0..len`, or 0 when `len` is 0.
    fn pick_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u64() % len as u64) as usize
    }

    fn next_element_id(&mut self) -> ElementId {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&self.next_u64().to_le_bytes());
        bytes[8..].copy_from_slice(&self.next_u64().to_le_bytes());
        ElementId::from_random_bytes(bytes)
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }

    fn pick_index(&mut self, len: usize) -> usize {
        (**self).pick_index(len)
    }

    fn next_element_id(&mut self) -> ElementId {
        (**self).next_element_id()
    }
}

/// Default random source backed by [`StdRng`].
#[derive(Clone, Debug)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for StdRandom {
    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }
}

/// Deterministic counter source; always picks the first template.
#[derive(Clone, Debug, Default)]
pub struct FirstChoice {
    counter: u64,
}

impl RandomSource for FirstChoice {
    fn next_u64(&mut self) -> u64 {
        self.counter = self.counter.wrapping_add(1);
        self.counter
    }

    fn pick_index(&mut self, _len: usize) -> usize {
        0
    }
}
