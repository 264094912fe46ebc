//! Service pools.

use rustc_hash::FxHashSet;

use crate::clock::{Clock, Id, Resource};
use crate::error::ConfigError;
use crate::source::TimeSource;

/// Serves admitted customers.
///
/// The earliest available time of a service pool is the time at which its soonest-free server can start the next
/// customer. The waiting line relies on it being exact.
pub trait Service: Resource {
    /// Starts serving a customer at `start_time`, which must not precede [`Resource::earliest_available`], and
    /// returns the departure time together with the server that serves the customer.
    fn serve(&mut self, start_time: f64) -> (f64, Id);
}

impl<S: Service + ?Sized> Service for &mut S {
    fn serve(&mut self, start_time: f64) -> (f64, Id) {
        (**self).serve(start_time)
    }
}

impl<S: Service + ?Sized> Service for Box<S> {
    fn serve(&mut self, start_time: f64) -> (f64, Id) {
        (**self).serve(start_time)
    }
}

/// A server whose clock always holds the time it becomes free.
#[derive(Clone, Debug)]
pub struct Server<T> {
    clock: Clock,
    source: T,
}

impl<T: TimeSource> Server<T> {
    /// Creates a server that is free from time zero, drawing service durations from `source`.
    pub fn new(id: Id, source: T) -> Self {
        Self {
            clock: Clock::new(id),
            source,
        }
    }

    /// Creates a server that becomes free at `available_at`, which must be finite and non-negative.
    pub fn available_at(id: Id, source: T, available_at: f64) -> Result<Self, ConfigError> {
        if !available_at.is_finite() || available_at < 0. {
            return Err(ConfigError::InvalidAvailability { id, time: available_at });
        }
        let mut server = Self::new(id, source);
        server.clock.set(available_at);
        Ok(server)
    }

    /// Returns the server identifier.
    pub fn id(&self) -> Id {
        self.clock.id()
    }

    /// Returns the time the server becomes free.
    pub fn epoch(&self) -> f64 {
        self.clock.epoch()
    }

    /// Adds one service duration to the clock and returns the new epoch.
    fn advance(&mut self) -> f64 {
        let duration = self.source.sample();
        self.clock.forward(duration)
    }
}

/// Pool of servers arranged in a binary min-heap by the time they become free.
///
/// The root is always the soonest-free server, so selecting it is O(1) and putting it back after it takes a customer
/// is O(log c) for c servers.
#[derive(Clone, Debug)]
pub struct MinHeapService<T> {
    heap: Vec<Server<T>>,
}

impl<T: TimeSource> MinHeapService<T> {
    /// Builds the pool from a non-empty list of servers with distinct identifiers, in any order.
    pub fn new(servers: Vec<Server<T>>) -> Result<Self, ConfigError> {
        if servers.is_empty() {
            return Err(ConfigError::NoServers);
        }
        let mut ids = FxHashSet::default();
        for server in servers.iter() {
            if !ids.insert(server.id()) {
                return Err(ConfigError::DuplicateServer(server.id()));
            }
        }
        let mut pool = Self { heap: servers };
        for i in (0..pool.heap.len() / 2).rev() {
            pool.sift_down(i);
        }
        Ok(pool)
    }

    /// Returns the number of servers.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Always false, a pool cannot be built without servers.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the servers in heap order, the soonest-free one first.
    pub fn servers(&self) -> &[Server<T>] {
        &self.heap
    }

    /// Checks that no server becomes free earlier than its parent in the heap.
    pub fn is_heap(&self) -> bool {
        (1..self.heap.len()).all(|i| self.heap[i].epoch() >= self.heap[(i - 1) / 2].epoch())
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut min = i;
            if left < n && self.heap[left].epoch() < self.heap[min].epoch() {
                min = left;
            }
            if right < n && self.heap[right].epoch() < self.heap[min].epoch() {
                min = right;
            }
            if min == i {
                return;
            }
            self.heap.swap(i, min);
            i = min;
        }
    }
}

impl<T: TimeSource> Resource for MinHeapService<T> {
    fn earliest_available(&self) -> f64 {
        self.heap[0].epoch()
    }
}

impl<T: TimeSource> Service for MinHeapService<T> {
    fn serve(&mut self, start_time: f64) -> (f64, Id) {
        let root = &mut self.heap[0];
        root.clock.set(start_time);
        let departure = root.advance();
        let server_id = root.id();
        self.sift_down(0);
        (departure, server_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Constant, Exponential, Trace};

    fn constant_pool(epochs: &[f64], duration: f64) -> MinHeapService<Constant> {
        let servers = epochs
            .iter()
            .enumerate()
            .map(|(i, t)| Server::available_at(i as Id, Constant::new(duration).unwrap(), *t).unwrap())
            .collect();
        MinHeapService::new(servers).unwrap()
    }

    #[test]
    fn construction_errors() {
        let empty: Vec<Server<Constant>> = Vec::new();
        assert!(matches!(MinHeapService::new(empty), Err(ConfigError::NoServers)));

        let c = Constant::new(1.).unwrap();
        let dup = vec![Server::new(1, c), Server::new(2, c), Server::new(1, c)];
        assert!(matches!(MinHeapService::new(dup), Err(ConfigError::DuplicateServer(1))));
    }

    #[test]
    fn availability_must_be_a_valid_time() {
        let c = Constant::new(1.).unwrap();
        for bad in [-1., f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Server::available_at(7, c, bad),
                Err(ConfigError::InvalidAvailability { id: 7, .. })
            ));
        }
        let server = Server::available_at(7, c, 2.5).unwrap();
        assert_eq!(server.epoch(), 2.5);
        assert_eq!(server.id(), 7);
    }

    #[test]
    fn build_heapifies_arbitrary_order() {
        let pool = constant_pool(&[9., 4., 7., 1., 8., 2., 6., 3., 5.], 1.);
        assert!(pool.is_heap());
        assert_eq!(pool.earliest_available(), 1.);
        assert_eq!(pool.servers()[0].id(), 3);
        assert_eq!(pool.len(), 9);
    }

    #[test]
    fn serve_picks_soonest_free_server() {
        let mut pool = constant_pool(&[5., 2., 3.], 10.);
        assert_eq!(pool.serve(2.), (12., 1));
        assert_eq!(pool.earliest_available(), 3.);
        assert_eq!(pool.serve(4.), (14., 2));
        assert_eq!(pool.serve(5.), (15., 0));
        assert_eq!(pool.earliest_available(), 12.);
        assert!(pool.is_heap());
    }

    #[test]
    fn ties_go_left() {
        // all servers free at zero, root taken first, then the left child
        let mut pool = constant_pool(&[0., 0., 0.], 1.);
        assert_eq!(pool.serve(0.).1, 0);
        assert_eq!(pool.servers()[0].id(), 1);
        assert_eq!(pool.serve(0.).1, 1);
        assert_eq!(pool.serve(0.).1, 2);
    }

    #[test]
    fn heap_invariant_holds_after_every_serve() {
        let servers = (0..13).map(|i| Server::new(i, Exponential::new(1.5, i as u64).unwrap())).collect();
        let mut pool = MinHeapService::new(servers).unwrap();
        let mut prev_ready = pool.earliest_available();
        for k in 0..5_000 {
            let start = pool.earliest_available().max(k as f64 * 0.05);
            let (departure, _) = pool.serve(start);
            assert!(departure >= start);
            assert!(pool.is_heap());
            assert!(pool.earliest_available() >= prev_ready);
            prev_ready = pool.earliest_available();
        }
    }

    #[test]
    fn departure_adds_sampled_duration() {
        let servers = vec![Server::new(4, Trace::new(vec![2., 1.]).unwrap())];
        let mut pool = MinHeapService::new(servers).unwrap();
        assert_eq!(pool.serve(0.), (2., 4));
        assert_eq!(pool.serve(3.), (4., 4));
        assert_eq!(pool.serve(4.), (6., 4));
    }
}
