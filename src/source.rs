//! Sources of time increments for stochastic entities.
//!
//! Each stochastic entity (the arrival process and every server) owns its own source, so a run is reproducible from
//! the seeds used to build them and no random state is shared between entities or runs.

use rand::SeedableRng;
use rand_distr::{Distribution, Exp};
use rand_pcg::Pcg64;

use crate::error::{check_rate, ConfigError};

/// Produces non-negative time increments.
pub trait TimeSource {
    /// Returns the next increment.
    fn sample(&mut self) -> f64;

    /// Returns `true` if every increment is guaranteed to be greater than zero.
    ///
    /// Arrival processes only accept such sources. The default is conservative.
    fn strictly_positive(&self) -> bool {
        false
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &mut T {
    fn sample(&mut self) -> f64 {
        (**self).sample()
    }

    fn strictly_positive(&self) -> bool {
        (**self).strictly_positive()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Box<T> {
    fn sample(&mut self) -> f64 {
        (**self).sample()
    }

    fn strictly_positive(&self) -> bool {
        (**self).strictly_positive()
    }
}

/// Exponentially distributed increments with the given rate, drawn from a dedicated PCG generator.
#[derive(Clone, Debug)]
pub struct Exponential {
    rate: f64,
    distr: Exp<f64>,
    rng: Pcg64,
}

impl Exponential {
    /// Creates a source with the given rate and a generator seeded with `seed`.
    pub fn new(rate: f64, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(rate, Pcg64::seed_from_u64(seed))
    }

    /// Creates a source with the given rate drawing from the provided generator.
    pub fn with_rng(rate: f64, rng: Pcg64) -> Result<Self, ConfigError> {
        let rate = check_rate("rate", rate)?;
        let distr = Exp::new(rate).map_err(|_| ConfigError::InvalidRate { name: "rate", value: rate })?;
        Ok(Self { rate, distr, rng })
    }

    /// Returns the rate of the distribution.
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl TimeSource for Exponential {
    fn sample(&mut self) -> f64 {
        self.distr.sample(&mut self.rng)
    }

    // zero has probability zero
    fn strictly_positive(&self) -> bool {
        true
    }
}

/// The same increment every time.
#[derive(Clone, Copy, Debug)]
pub struct Constant(f64);

impl Constant {
    /// Creates a source always returning `delay`.
    pub fn new(delay: f64) -> Result<Self, ConfigError> {
        if delay.is_finite() && delay >= 0. {
            Ok(Self(delay))
        } else {
            Err(ConfigError::InvalidTrace(format!("constant delay {}", delay)))
        }
    }
}

impl TimeSource for Constant {
    fn sample(&mut self) -> f64 {
        self.0
    }

    fn strictly_positive(&self) -> bool {
        self.0 > 0.
    }
}

/// Replays a fixed sequence of increments, starting over once it is exhausted.
#[derive(Clone, Debug)]
pub struct Trace {
    values: Vec<f64>,
    pos: usize,
}

impl Trace {
    /// Creates a trace from a non-empty list of non-negative finite increments.
    pub fn new(values: Vec<f64>) -> Result<Self, ConfigError> {
        if values.is_empty() {
            return Err(ConfigError::InvalidTrace("no values".to_string()));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v < 0.) {
            return Err(ConfigError::InvalidTrace(format!("increment {}", bad)));
        }
        Ok(Self { values, pos: 0 })
    }
}

impl TimeSource for Trace {
    fn sample(&mut self) -> f64 {
        let value = self.values[self.pos];
        self.pos = (self.pos + 1) % self.values.len();
        value
    }

    fn strictly_positive(&self) -> bool {
        self.values.iter().all(|v| *v > 0.)
    }
}
