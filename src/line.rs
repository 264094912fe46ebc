//! Waiting lines.

use crate::clock::{Clock, Id, Resource};
use crate::error::ConfigError;

/// A seat in the waiting line is simply a clock holding the scheduled start time of its last occupant.
pub type Seat = Clock;

/// Bounded waiting line.
///
/// The earliest available time of a line is the time at which an arriving customer can be admitted; arrivals before
/// it are rejected by the engine. The line itself never rejects anybody.
pub trait Line: Resource {
    /// Admits a customer arrived at `arrival_time` given the earliest time `server_ready_time` at which a server is
    /// free, and returns the scheduled service start time together with the seat taken by the customer.
    ///
    /// Customers that pass straight through to a free server still take a seat for an instant.
    fn wait_or_pass(&mut self, arrival_time: f64, server_ready_time: f64) -> (f64, Id);
}

impl<L: Line + ?Sized> Line for &mut L {
    fn wait_or_pass(&mut self, arrival_time: f64, server_ready_time: f64) -> (f64, Id) {
        (**self).wait_or_pass(arrival_time, server_ready_time)
    }
}

impl<L: Line + ?Sized> Line for Box<L> {
    fn wait_or_pass(&mut self, arrival_time: f64, server_ready_time: f64) -> (f64, Id) {
        (**self).wait_or_pass(arrival_time, server_ready_time)
    }
}

/// Fixed-capacity FIFO line implemented as a ring of seats.
///
/// Every admitted customer overwrites the seat at the cursor, so the cursor seat always holds the start time of the
/// customer admitted `capacity` admissions ago. An arrival earlier than that time finds all seats taken by customers
/// that have not started service yet.
///
/// This only holds if the service pool feeding [`Line::wait_or_pass`] reports its true earliest available server,
/// which makes start times non-decreasing in admission order. The line does not enforce it.
#[derive(Clone, Debug)]
pub struct Ring {
    seats: Vec<Seat>,
    cursor: usize,
}

impl Ring {
    /// Creates a line with `capacity` empty seats, numbered from zero.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        let seats = (0..capacity).map(|i| Seat::new(i as Id)).collect();
        Ok(Self { seats, cursor: 0 })
    }

    /// Returns the number of seats.
    pub fn capacity(&self) -> usize {
        self.seats.len()
    }

    /// Returns the index of the seat the next admitted customer will take.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns all seats in ring order.
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }
}

impl Resource for Ring {
    fn earliest_available(&self) -> f64 {
        self.seats[self.cursor].epoch()
    }
}

impl Line for Ring {
    fn wait_or_pass(&mut self, arrival_time: f64, server_ready_time: f64) -> (f64, Id) {
        let start = arrival_time.max(server_ready_time);
        let seat = &mut self.seats[self.cursor];
        seat.set(start);
        let seat_id = seat.id();
        self.cursor = (self.cursor + 1) % self.seats.len();
        (start, seat_id)
    }
}
