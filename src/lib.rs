//! mmck is a discrete-event simulator of finite-capacity multi-server queueing systems, the M/M/c/K model and its
//! variations. Customers arrive, wait in a bounded line if no server is free, are served by one of several servers and
//! depart. Customers arriving when the line is full are rejected.
//!
//! ## Contents
//!
//! - [Basic Concepts](crate#basic-concepts)
//! - [Example](crate#example)
//! - [Programming Interfaces](crate#programming-interfaces)
//! - [Why Rejections Work](crate#why-rejections-work)
//!
//! ## Basic Concepts
//!
//! Unlike a general discrete-event simulator, mmck has no event queue. The model is specialized to the pipeline
//! _arrival → wait → serve → depart_, and every stage is represented by entities that keep their own _clock_.
//!
//! **Clock.** A clock is an identity plus an _epoch_, the time of the last event that happened to the entity. Epochs
//! only move forward, and only the entity itself moves its clock.
//!
//! **Arrival process.** A clocked entity producing strictly increasing arrival times. The default process draws
//! exponential inter-arrival times, making arrivals a Poisson process.
//!
//! **Waiting line.** A fixed number of _seats_, each a clock holding the scheduled service start time of its last
//! occupant. Admitted customers take seats in circular order.
//!
//! **Service pool.** A set of _servers_, each a clock holding the time it becomes free. The pool always hands the next
//! customer to the server that becomes free soonest.
//!
//! **Simulation.** Each step of the simulation produces the complete record of one customer: arrival, service start
//! and departure times, the seat and the server, or the fact that the customer was rejected. Records come out in
//! arrival order.
//!
//! ## Example
//!
//! ```rust
//! use mmck::config::QueueConfig;
//!
//! // Two servers with service rate 1, five waiting places, arrival rate 2, random seed 123
//! let config = QueueConfig::new(2.0, 2, 1.0, 5).with_seed(123);
//! let mut sim = config.build().unwrap();
//!
//! // Look at the first customers one by one
//! for customer in sim.customers().take(5) {
//!     println!("{}", customer);
//! }
//!
//! // Generate many more and compare the rejection ratio with the analytic blocking probability
//! let summary = sim.run(100_000);
//! let model = config.model().unwrap();
//! println!("rejection ratio: {:.4}", summary.rejection_ratio());
//! println!("blocking probability: {:.4}", model.blocking_probability());
//! ```
//!
//! ## Programming Interfaces
//!
//! [`Simulation`] is the main interface. It is built from three parts implementing the [`Arrival`], [`Line`] and
//! [`Service`] traits, and exposes [`next`](Simulation::next) to generate a single customer,
//! [`customers`](Simulation::customers) to iterate over them and [`run`](Simulation::run) to summarize many of them.
//! The parts can be passed by value or by mutable reference, so the caller can inspect them during or after a run.
//!
//! The default parts are [`ArrivalProcess`] driven by a [`TimeSource`], the ring-buffer line [`Ring`] and the min-heap
//! service pool [`MinHeapService`]. Time sources produce non-negative increments: [`Exponential`] draws them from a
//! seeded PCG generator, while [`source::Trace`] and [`source::Constant`] make runs fully deterministic.
//! [`arrival::ScheduledArrival`] replays explicit arrival times.
//!
//! [`QueueConfig`] builds the standard M/M/c/K simulation from its parameters, deriving an independent generator for
//! the arrival process and for every server from a single seed. [`Summary`] aggregates customer records and
//! [`MmckModel`] gives the analytic values they converge to.
//!
//! Every constructor validates its input and returns a [`ConfigError`] instead of building a part whose earliest
//! available time would be undefined, such as a line without seats or a pool without servers.
//!
//! ## Why Rejections Work
//!
//! The engine rejects a customer arriving before the line's [`earliest_available`](Resource::earliest_available)
//! time. For [`Ring`] this is the start time stored in the seat under the cursor, which belongs to the customer
//! admitted `K` admissions ago. Since the service pool always reports the true earliest available server, service
//! start times never decrease in admission order. So an arrival before that start time finds `K` admitted customers
//! that have not started service, that is, a full line. No occupancy counter is kept: the coupling between the line
//! and an exact earliest-server selection is what makes the ring model a bounded queue.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod arrival;
pub mod clock;
pub mod config;
pub mod customer;
pub mod error;
pub mod line;
pub mod log;
pub mod service;
pub mod simulation;
pub mod source;
pub mod stats;

pub use arrival::{Arrival, ArrivalProcess};
pub use clock::{Clock, Id, Resource};
pub use colored;
pub use config::{MmckSimulation, QueueConfig};
pub use customer::{Customer, Fate};
pub use error::ConfigError;
pub use line::{Line, Ring, Seat};
pub use service::{MinHeapService, Server, Service};
pub use simulation::Simulation;
pub use source::{Exponential, TimeSource};
pub use stats::{MmckModel, Summary};
