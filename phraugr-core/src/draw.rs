//! Random draw sources consumed by the routing rules.
//!
//! A run owns exactly one [`LineDraws`] implementation and threads it through
//! every routing decision. [`SeededDraws`] wraps a seeded [`StdRng`];
//! [`ScriptedDraws`] replays a fixed sequence so routing can be asserted
//! exactly.

use std::{collections::VecDeque, num::NonZeroUsize};

use rand::{Rng, SeedableRng, distributions::Standard, rngs::StdRng};

use crate::{PartitionError, Result, seed::Seed};

/// Source of the per-line random draws.
pub trait LineDraws {
    /// Returns an integer uniformly distributed in `[0, bound)`.
    ///
    /// # Errors
    /// Implementations backed by finite data may fail once exhausted.
    fn draw_index(&mut self, bound: NonZeroUsize) -> Result<usize>;

    /// Returns a real number uniformly distributed in `[0, 1)`.
    ///
    /// # Errors
    /// Implementations backed by finite data may fail once exhausted.
    fn draw_unit(&mut self) -> Result<f64>;
}

impl<D: LineDraws + ?Sized> LineDraws for &mut D {
    fn draw_index(&mut self, bound: NonZeroUsize) -> Result<usize> {
        (**self).draw_index(bound)
    }

    fn draw_unit(&mut self) -> Result<f64> {
        (**self).draw_unit()
    }
}

/// Pseudo-random draws from a [`StdRng`] seeded once per run.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
///
/// use phraugr_core::{LineDraws, Seed, SeededDraws};
///
/// let bound = NonZeroUsize::new(4).expect("non-zero");
/// let mut a = SeededDraws::new(&Seed::text("AB"));
/// let mut b = SeededDraws::new(&Seed::Numeric(4290));
/// for _ in 0..16 {
///     assert_eq!(a.draw_index(bound)?, b.draw_index(bound)?);
/// }
/// # Ok::<(), phraugr_core::PartitionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SeededDraws {
    rng: StdRng,
    seed: Option<u64>,
}

impl SeededDraws {
    /// Creates a draw source from `seed`. [`Seed::Entropy`] seeds from the
    /// operating system.
    #[must_use]
    pub fn new(seed: &Seed) -> Self {
        let resolved = seed.resolve();
        let rng = match resolved {
            Some(value) => StdRng::seed_from_u64(value),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            seed: resolved,
        }
    }

    /// Returns the integer seed in use, or `None` when seeded from entropy.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl LineDraws for SeededDraws {
    fn draw_index(&mut self, bound: NonZeroUsize) -> Result<usize> {
        Ok(self.rng.gen_range(0..bound.get()))
    }

    fn draw_unit(&mut self) -> Result<f64> {
        Ok(self.rng.sample(Standard))
    }
}

/// Replays a fixed sequence of draws.
///
/// Index draws are returned verbatim, without reduction by the bound, so a
/// script can also exercise out-of-range handling.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
///
/// use phraugr_core::{LineDraws, ScriptedDraws};
///
/// let bound = NonZeroUsize::new(3).expect("non-zero");
/// let mut draws = ScriptedDraws::indices([2, 0]);
/// assert_eq!(draws.draw_index(bound)?, 2);
/// assert_eq!(draws.draw_index(bound)?, 0);
/// assert!(draws.draw_index(bound).is_err());
/// # Ok::<(), phraugr_core::PartitionError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraws {
    indices: VecDeque<usize>,
    units: VecDeque<f64>,
    consumed: usize,
}

impl ScriptedDraws {
    /// Scripts a sequence of index draws.
    #[must_use]
    pub fn indices(values: impl IntoIterator<Item = usize>) -> Self {
        Self {
            indices: values.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Scripts a sequence of unit draws.
    #[must_use]
    pub fn units(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            units: values.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Number of draws handed out so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Returns `true` once every scripted value has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.indices.is_empty() && self.units.is_empty()
    }

    fn next<T>(queue: &mut VecDeque<T>, consumed: &mut usize) -> Result<T> {
        let value = queue.pop_front().ok_or(PartitionError::ScriptExhausted {
            consumed: *consumed,
        })?;
        *consumed += 1;
        Ok(value)
    }
}

impl LineDraws for ScriptedDraws {
    fn draw_index(&mut self, _bound: NonZeroUsize) -> Result<usize> {
        Self::next(&mut self.indices, &mut self.consumed)
    }

    fn draw_unit(&mut self) -> Result<f64> {
        Self::next(&mut self.units, &mut self.consumed)
    }
}
