//! Simulation engine.

use crate::arrival::Arrival;
#[cfg(test)]
use crate::clock::Resource;
use crate::customer::Customer;
use crate::line::Line;
use crate::log::log_customer;
use crate::service::Service;
use crate::stats::Summary;

/// Ties an arrival process, a waiting line and a service pool together.
///
/// Each call to [`next`](Simulation::next) produces the complete record of the next arriving customer. Records come
/// out in arrival order. The parts can be owned or borrowed (`&mut`), in which case they stay inspectable by the
/// caller after the simulation is dropped.
pub struct Simulation<A, L, S> {
    arrival: A,
    line: L,
    service: S,
}

impl<A: Arrival, L: Line, S: Service> Simulation<A, L, S> {
    /// Creates a simulation from its three parts.
    pub fn new(arrival: A, line: L, service: S) -> Self {
        Self { arrival, line, service }
    }

    /// Generates the next customer.
    ///
    /// A customer arriving before the line's earliest available time is rejected and leaves no trace in the line or
    /// the service pool. Any other customer takes a seat, starts service as soon as both the customer and the
    /// soonest-free server are there, and departs after the sampled service duration.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Customer {
        let arrival_time = self.arrival.advance();
        if arrival_time < self.line.earliest_available() {
            let customer = Customer::rejected(arrival_time);
            log_customer(&customer);
            return customer;
        }

        let server_ready_time = self.service.earliest_available();
        let (start_time, seat_id) = self.line.wait_or_pass(arrival_time, server_ready_time);
        let (departure_time, server_id) = self.service.serve(start_time);

        let customer = Customer::departed(arrival_time, start_time, departure_time, seat_id, server_id);
        log_customer(&customer);
        customer
    }

    /// Returns an endless iterator over generated customers.
    pub fn customers(&mut self) -> impl Iterator<Item = Customer> + '_ {
        std::iter::repeat_with(move || self.next())
    }

    /// Generates `count` customers and returns their summary.
    pub fn run(&mut self, count: u64) -> Summary {
        let mut summary = Summary::new();
        for _ in 0..count {
            let customer = self.next();
            summary.record(&customer);
        }
        summary
    }

    /// Returns the arrival process.
    pub fn arrival(&self) -> &A {
        &self.arrival
    }

    /// Returns the waiting line.
    pub fn line(&self) -> &L {
        &self.line
    }

    /// Returns the service pool.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Consumes the simulation and returns its parts.
    pub fn into_parts(self) -> (A, L, S) {
        (self.arrival, self.line, self.service)
    }
}
