//! Simulation configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::debug;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use crate::arrival::ArrivalProcess;
use crate::clock::Id;
use crate::error::{check_rate, ConfigError};
use crate::line::Ring;
use crate::service::{MinHeapService, Server};
use crate::simulation::Simulation;
use crate::source::Exponential;
use crate::stats::MmckModel;

/// Simulation of the M/M/c/K model with Poisson arrivals and exponential service.
pub type MmckSimulation = Simulation<ArrivalProcess<Exponential>, Ring, MinHeapService<Exponential>>;

fn default_seed() -> u64 {
    123
}

/// Parameters of an M/M/c/K simulation run.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QueueConfig {
    /// Mean number of arrivals per time unit.
    pub arrival_rate: f64,
    /// Number of servers.
    pub servers: usize,
    /// Mean number of customers a single server completes per time unit.
    pub service_rate: f64,
    /// Number of waiting places.
    pub capacity: usize,
    /// Seed from which the generators of all stochastic entities are derived.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl QueueConfig {
    /// Creates a configuration with the default seed.
    pub fn new(arrival_rate: f64, servers: usize, service_rate: f64, capacity: usize) -> Self {
        Self {
            arrival_rate,
            servers,
            service_rate,
            capacity,
            seed: default_seed(),
        }
    }

    /// Returns the same configuration with another seed.
    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    /// Reads a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let reader = BufReader::new(File::open(path)?);
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks all parameters without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_rate("arrival rate", self.arrival_rate)?;
        check_rate("service rate", self.service_rate)?;
        if self.servers == 0 {
            return Err(ConfigError::NoServers);
        }
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }

    /// Builds a simulation in which the arrival process and every server draw from their own generator.
    pub fn build(&self) -> Result<MmckSimulation, ConfigError> {
        self.validate()?;
        let mut seeds = Pcg64::seed_from_u64(self.seed);
        let arrival = ArrivalProcess::new(Exponential::new(self.arrival_rate, seeds.gen())?)?;
        let line = Ring::new(self.capacity)?;
        let servers = (0..self.servers)
            .map(|i| Exponential::new(self.service_rate, seeds.gen()).map(|source| Server::new(i as Id, source)))
            .collect::<Result<Vec<_>, _>>()?;
        let service = MinHeapService::new(servers)?;
        debug!(
            "Built M/M/{}/{} simulation: arrival rate {}, service rate {}, seed {}",
            self.servers, self.capacity, self.arrival_rate, self.service_rate, self.seed
        );
        Ok(Simulation::new(arrival, line, service))
    }

    /// Builds `count` independent simulations with consecutive seeds starting from the configured one.
    pub fn build_replications(&self, count: usize) -> Result<Vec<MmckSimulation>, ConfigError> {
        (0..count)
            .map(|i| self.clone().with_seed(self.seed.wrapping_add(i as u64)).build())
            .collect()
    }

    /// Returns the analytic model matching this configuration.
    pub fn model(&self) -> Result<MmckModel, ConfigError> {
        MmckModel::new(self.arrival_rate, self.service_rate, self.servers, self.capacity)
    }
}
