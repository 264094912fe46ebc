//! Aggregated statistics of simulated customers and the analytic model they converge to.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::clock::Id;
use crate::customer::Customer;
use crate::error::{check_rate, ConfigError};

/// Running summary of a sequence of customer records.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Summary {
    customers: u64,
    rejected: u64,
    total_waiting_time: f64,
    total_sojourn_time: f64,
    served_by: BTreeMap<Id, u64>,
}

impl Summary {
    /// Creates an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accounts for one more customer.
    pub fn record(&mut self, customer: &Customer) {
        self.customers += 1;
        if customer.is_rejected() {
            self.rejected += 1;
            return;
        }
        self.total_waiting_time += customer.waiting_time().unwrap_or_default();
        self.total_sojourn_time += customer.sojourn_time().unwrap_or_default();
        if let Some(server) = customer.server_id() {
            *self.served_by.entry(server).or_default() += 1;
        }
    }

    /// Total number of recorded customers.
    pub fn customers(&self) -> u64 {
        self.customers
    }

    /// Number of rejected customers.
    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    /// Number of served customers.
    pub fn departed(&self) -> u64 {
        self.customers - self.rejected
    }

    /// Fraction of rejected customers, zero if nothing was recorded.
    pub fn rejection_ratio(&self) -> f64 {
        if self.customers == 0 {
            0.
        } else {
            self.rejected as f64 / self.customers as f64
        }
    }

    /// Binomial standard error of the rejection ratio.
    ///
    /// Successive rejections are correlated, so the true error of a single run is larger.
    pub fn rejection_ratio_std_error(&self) -> f64 {
        if self.customers == 0 {
            return 0.;
        }
        let p = self.rejection_ratio();
        (p * (1. - p) / self.customers as f64).sqrt()
    }

    /// Mean time served customers spent waiting.
    pub fn mean_waiting_time(&self) -> Option<f64> {
        self.mean_over_departed(self.total_waiting_time)
    }

    /// Mean time served customers spent in the system.
    pub fn mean_sojourn_time(&self) -> Option<f64> {
        self.mean_over_departed(self.total_sojourn_time)
    }

    /// Number of customers served by the given server.
    pub fn served_by(&self, server: Id) -> u64 {
        self.served_by.get(&server).copied().unwrap_or_default()
    }

    fn mean_over_departed(&self, total: f64) -> Option<f64> {
        match self.departed() {
            0 => None,
            n => Some(total / n as f64),
        }
    }
}

impl<'a> Extend<&'a Customer> for Summary {
    fn extend<I: IntoIterator<Item = &'a Customer>>(&mut self, iter: I) {
        for customer in iter {
            self.record(customer);
        }
    }
}

impl Extend<Customer> for Summary {
    fn extend<I: IntoIterator<Item = Customer>>(&mut self, iter: I) {
        for customer in iter {
            self.record(&customer);
        }
    }
}

/// Stationary solution of the M/M/c/K birth-death chain.
///
/// `capacity` counts waiting places only, so the system holds up to `servers + capacity` customers. This is the
/// model the simulation reproduces with a [`Ring`](crate::line::Ring) of `capacity` seats.
#[derive(Clone, Debug, Serialize)]
pub struct MmckModel {
    arrival_rate: f64,
    servers: usize,
    probabilities: Vec<f64>,
}

impl MmckModel {
    /// Solves the model for the given parameters.
    pub fn new(arrival_rate: f64, service_rate: f64, servers: usize, capacity: usize) -> Result<Self, ConfigError> {
        let arrival_rate = check_rate("arrival rate", arrival_rate)?;
        let service_rate = check_rate("service rate", service_rate)?;
        if servers == 0 {
            return Err(ConfigError::NoServers);
        }
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        // log-space weights, heavy loads overflow the plain products
        let log_load = (arrival_rate / service_rate).ln();
        let mut log_weights = Vec::with_capacity(servers + capacity + 1);
        log_weights.push(0.);
        for n in 1..=servers + capacity {
            let prev = log_weights[n - 1];
            log_weights.push(prev + log_load - (n.min(servers) as f64).ln());
        }
        let max = log_weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let weights: Vec<f64> = log_weights.into_iter().map(|w| (w - max).exp()).collect();
        let total: f64 = weights.iter().sum();
        let probabilities = weights.into_iter().map(|w| w / total).collect();
        Ok(Self {
            arrival_rate,
            servers,
            probabilities,
        })
    }

    /// Stationary probability of `n` customers in the system.
    pub fn probability(&self, n: usize) -> f64 {
        self.probabilities.get(n).copied().unwrap_or_default()
    }

    /// Probability that an arrival finds the system full.
    pub fn blocking_probability(&self) -> f64 {
        self.probabilities[self.probabilities.len() - 1]
    }

    /// Mean number of customers in the system.
    pub fn mean_in_system(&self) -> f64 {
        self.probabilities.iter().enumerate().map(|(n, p)| n as f64 * p).sum()
    }

    /// Mean number of waiting customers.
    pub fn mean_in_line(&self) -> f64 {
        self.probabilities
            .iter()
            .enumerate()
            .skip(self.servers + 1)
            .map(|(n, p)| (n - self.servers) as f64 * p)
            .sum()
    }

    /// Mean time an accepted customer spends in the system, by Little's law.
    pub fn mean_sojourn_time(&self) -> f64 {
        self.mean_in_system() / self.effective_arrival_rate()
    }

    /// Mean time an accepted customer waits before service.
    pub fn mean_waiting_time(&self) -> f64 {
        self.mean_in_line() / self.effective_arrival_rate()
    }

    fn effective_arrival_rate(&self) -> f64 {
        self.arrival_rate * (1. - self.blocking_probability())
    }
}
