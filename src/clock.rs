//! Clocked entities.
//!
//! The arrival process, every seat of the waiting line and every server of the service pool keep their own clock.
//! There is no global simulation time: each entity only ever moves its own clock forward, and the engine derives the
//! customer trajectory from comparing these clocks.

/// Identifier of a clocked entity (seat or server).
pub type Id = u32;

/// An identity plus the time of the last event that happened to the entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Clock {
    id: Id,
    epoch: f64,
}

impl Clock {
    /// Creates a clock with the given identifier starting at time zero.
    pub fn new(id: Id) -> Self {
        Self { id, epoch: 0.0 }
    }

    /// Returns the identifier assigned at construction.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the current clock value.
    pub fn epoch(&self) -> f64 {
        self.epoch
    }

    /// Moves the clock to `time`, which must not be earlier than the current epoch.
    pub(crate) fn set(&mut self, time: f64) {
        debug_assert!(
            time >= self.epoch,
            "clock {} moved backwards: {} -> {}",
            self.id,
            self.epoch,
            time
        );
        self.epoch = time;
    }

    /// Moves the clock forward by a non-negative `delay` and returns the new epoch.
    pub(crate) fn forward(&mut self, delay: f64) -> f64 {
        debug_assert!(delay >= 0., "negative delay {} for clock {}", delay, self.id);
        self.epoch += delay;
        self.epoch
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(0)
    }
}

/// A resource whose earliest available time drives the decision of an upstream stage.
///
/// The waiting line exposes it to the engine to decide rejections, the service pool exposes it to the line to decide
/// whether an accepted customer passes through or waits.
pub trait Resource {
    /// Returns the earliest time at which the resource can take the next customer.
    fn earliest_available(&self) -> f64;
}

impl<R: Resource + ?Sized> Resource for &mut R {
    fn earliest_available(&self) -> f64 {
        (**self).earliest_available()
    }
}

impl<R: Resource + ?Sized> Resource for Box<R> {
    fn earliest_available(&self) -> f64 {
        (**self).earliest_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let clock = Clock::new(7);
        assert_eq!(clock.id(), 7);
        assert_eq!(clock.epoch(), 0.);
    }

    #[test]
    fn forward_accumulates() {
        let mut clock = Clock::new(1);
        assert_eq!(clock.forward(1.5), 1.5);
        assert_eq!(clock.forward(0.), 1.5);
        assert_eq!(clock.forward(2.), 3.5);
        clock.set(4.);
        assert_eq!(clock.epoch(), 4.);
    }
}
