//! Arrival processes.

use crate::clock::Clock;
use crate::error::ConfigError;
use crate::source::TimeSource;

/// Generates successive customer arrival times.
pub trait Arrival {
    /// Moves the process to the next arrival and returns its time.
    ///
    /// Every returned value is strictly greater than the previously returned one.
    fn advance(&mut self) -> f64;

    /// Returns the time of the last arrival, or zero before the first one.
    fn epoch(&self) -> f64;
}

impl<A: Arrival + ?Sized> Arrival for &mut A {
    fn advance(&mut self) -> f64 {
        (**self).advance()
    }

    fn epoch(&self) -> f64 {
        (**self).epoch()
    }
}

impl<A: Arrival + ?Sized> Arrival for Box<A> {
    fn advance(&mut self) -> f64 {
        (**self).advance()
    }

    fn epoch(&self) -> f64 {
        (**self).epoch()
    }
}

/// Arrival process with independent inter-arrival times drawn from a time source.
///
/// With an [`Exponential`](crate::source::Exponential) source this is a Poisson process. Only sources whose increments
/// are all positive are accepted, so arrival times are strictly increasing.
#[derive(Clone, Debug)]
pub struct ArrivalProcess<T> {
    clock: Clock,
    source: T,
}

impl<T: TimeSource> ArrivalProcess<T> {
    /// Creates a process starting at time zero.
    ///
    /// Fails with [`ConfigError::NonPositiveArrivals`] if the source may yield a zero increment.
    pub fn new(source: T) -> Result<Self, ConfigError> {
        if !source.strictly_positive() {
            return Err(ConfigError::NonPositiveArrivals);
        }
        Ok(Self {
            clock: Clock::default(),
            source,
        })
    }
}

impl<T: TimeSource> Arrival for ArrivalProcess<T> {
    fn advance(&mut self) -> f64 {
        let delay = self.source.sample();
        self.clock.forward(delay)
    }

    fn epoch(&self) -> f64 {
        self.clock.epoch()
    }
}

/// Replays an explicit list of absolute arrival times.
///
/// After the list is exhausted, arrivals keep coming with the last gap of the schedule.
#[derive(Clone, Debug)]
pub struct ScheduledArrival {
    clock: Clock,
    times: Vec<f64>,
    next: usize,
    tail_gap: f64,
}

impl ScheduledArrival {
    /// Creates a process from a non-empty, non-negative and strictly increasing list of times.
    pub fn new(times: Vec<f64>) -> Result<Self, ConfigError> {
        let (first, last) = match (times.first(), times.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return Err(ConfigError::InvalidSchedule("no arrivals".to_string())),
        };
        if !first.is_finite() || first < 0. {
            return Err(ConfigError::InvalidSchedule(format!("first arrival at {}", first)));
        }
        if let Some(w) = times.windows(2).find(|w| !w[1].is_finite() || w[1] <= w[0]) {
            return Err(ConfigError::InvalidSchedule(format!("{} is followed by {}", w[0], w[1])));
        }
        let tail_gap = if times.len() > 1 { last - times[times.len() - 2] } else { last };
        if tail_gap <= 0. {
            return Err(ConfigError::InvalidSchedule(
                "a single arrival at time zero leaves no gap to continue with".to_string(),
            ));
        }
        Ok(Self {
            clock: Clock::default(),
            times,
            next: 0,
            tail_gap,
        })
    }

    /// Returns the number of scheduled arrivals not replayed yet.
    pub fn remaining(&self) -> usize {
        self.times.len() - self.next
    }
}

impl Arrival for ScheduledArrival {
    fn advance(&mut self) -> f64 {
        match self.times.get(self.next) {
            Some(&time) => {
                self.next += 1;
                self.clock.set(time);
                time
            }
            None => self.clock.forward(self.tail_gap),
        }
    }

    fn epoch(&self) -> f64 {
        self.clock.epoch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Constant, Exponential, Trace};

    #[test]
    fn poisson_is_strictly_increasing() {
        let mut arrival = ArrivalProcess::new(Exponential::new(3., 7).unwrap()).unwrap();
        let mut prev = arrival.advance();
        for _ in 0..10_000 {
            let next = arrival.advance();
            assert!(next > prev);
            assert_eq!(arrival.epoch(), next);
            prev = next;
        }
    }

    #[test]
    fn trace_increments() {
        let mut arrival = ArrivalProcess::new(Trace::new(vec![1., 0.5]).unwrap()).unwrap();
        assert_eq!(arrival.epoch(), 0.);
        assert_eq!(arrival.advance(), 1.);
        assert_eq!(arrival.advance(), 1.5);
        assert_eq!(arrival.advance(), 2.5);
    }

    #[test]
    fn zero_increments_are_refused() {
        assert!(matches!(
            ArrivalProcess::new(Constant::new(0.).unwrap()),
            Err(ConfigError::NonPositiveArrivals)
        ));
        assert!(matches!(
            ArrivalProcess::new(Trace::new(vec![1., 0., 2.]).unwrap()),
            Err(ConfigError::NonPositiveArrivals)
        ));

        // an accepted deterministic source never repeats a time
        let mut arrival = ArrivalProcess::new(Constant::new(0.25).unwrap()).unwrap();
        let first = arrival.advance();
        let second = arrival.advance();
        assert!(second > first);
    }

    #[test]
    fn schedule_replays_then_continues() {
        let mut arrival = ScheduledArrival::new(vec![0., 0.5, 3.]).unwrap();
        assert_eq!(arrival.remaining(), 3);
        assert_eq!(arrival.advance(), 0.);
        assert_eq!(arrival.advance(), 0.5);
        assert_eq!(arrival.advance(), 3.);
        assert_eq!(arrival.remaining(), 0);
        assert_eq!(arrival.advance(), 5.5);
        assert_eq!(arrival.advance(), 8.);
    }

    #[test]
    fn schedule_validation() {
        assert!(ScheduledArrival::new(vec![]).is_err());
        assert!(ScheduledArrival::new(vec![-1., 2.]).is_err());
        assert!(ScheduledArrival::new(vec![1., 1.]).is_err());
        assert!(ScheduledArrival::new(vec![2., 1.]).is_err());
        assert!(ScheduledArrival::new(vec![0.]).is_err());
        assert!(ScheduledArrival::new(vec![2.]).is_ok());
    }

    #[test]
    fn borrowed_process() {
        fn drive<A: Arrival>(mut arrival: A, steps: usize) {
            for _ in 0..steps {
                arrival.advance();
            }
        }

        let mut process = ArrivalProcess::new(Trace::new(vec![2.]).unwrap()).unwrap();
        drive(&mut process, 2);
        assert_eq!(process.epoch(), 4.);
        let boxed: Box<dyn Arrival> = Box::new(process);
        drive(boxed, 1);
    }
}
