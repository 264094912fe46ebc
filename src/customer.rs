//! Customer records.

use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::clock::Id;

/// What happened to a customer after arrival.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "fate")]
pub enum Fate {
    /// The line was full at arrival.
    Rejected,
    /// The customer waited (possibly for no time), was served and left.
    Departed {
        /// Time the service began.
        service_start_time: f64,
        /// Time the service ended.
        departure_time: f64,
        /// Seat taken in the waiting line.
        seat_id: Id,
        /// Server that served the customer.
        server_id: Id,
    },
}

/// Complete trajectory of one simulated customer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Customer {
    /// Time of arrival.
    pub arrival_time: f64,
    /// Outcome, carrying the service trajectory of accepted customers.
    #[serde(flatten)]
    pub fate: Fate,
}

impl Customer {
    /// Creates a record of a customer rejected at `arrival_time`.
    pub fn rejected(arrival_time: f64) -> Self {
        Self {
            arrival_time,
            fate: Fate::Rejected,
        }
    }

    /// Creates a record of a served customer.
    pub fn departed(
        arrival_time: f64,
        service_start_time: f64,
        departure_time: f64,
        seat_id: Id,
        server_id: Id,
    ) -> Self {
        Self {
            arrival_time,
            fate: Fate::Departed {
                service_start_time,
                departure_time,
                seat_id,
                server_id,
            },
        }
    }

    /// Returns true if the customer found the line full.
    pub fn is_rejected(&self) -> bool {
        matches!(self.fate, Fate::Rejected)
    }

    /// Returns the service start time of a served customer.
    pub fn service_start_time(&self) -> Option<f64> {
        match self.fate {
            Fate::Departed { service_start_time, .. } => Some(service_start_time),
            Fate::Rejected => None,
        }
    }

    /// Returns the departure time of a served customer.
    pub fn departure_time(&self) -> Option<f64> {
        match self.fate {
            Fate::Departed { departure_time, .. } => Some(departure_time),
            Fate::Rejected => None,
        }
    }

    /// Returns the seat taken by a served customer.
    pub fn seat_id(&self) -> Option<Id> {
        match self.fate {
            Fate::Departed { seat_id, .. } => Some(seat_id),
            Fate::Rejected => None,
        }
    }

    /// Returns the server of a served customer.
    pub fn server_id(&self) -> Option<Id> {
        match self.fate {
            Fate::Departed { server_id, .. } => Some(server_id),
            Fate::Rejected => None,
        }
    }

    /// Time spent in the line before service.
    pub fn waiting_time(&self) -> Option<f64> {
        self.service_start_time().map(|t| t - self.arrival_time)
    }

    /// Time spent being served.
    pub fn service_time(&self) -> Option<f64> {
        match self.fate {
            Fate::Departed {
                service_start_time,
                departure_time,
                ..
            } => Some(departure_time - service_start_time),
            Fate::Rejected => None,
        }
    }

    /// Total time spent in the system, from arrival to departure.
    pub fn sojourn_time(&self) -> Option<f64> {
        self.departure_time().map(|t| t - self.arrival_time)
    }
}

impl Display for Customer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.fate {
            Fate::Rejected => write!(f, "arrived: {:.3}\trejected", self.arrival_time),
            Fate::Departed {
                service_start_time,
                departure_time,
                seat_id,
                server_id,
            } => write!(
                f,
                "arrived: {:.3}\tserved: {:.3}\tdeparted: {:.3}\tseat: {}\tserver: {}",
                self.arrival_time, service_start_time, departure_time, seat_id, server_id
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_has_no_trajectory() {
        let c = Customer::rejected(0.);
        assert!(c.is_rejected());
        assert_eq!(c.service_start_time(), None);
        assert_eq!(c.departure_time(), None);
        assert_eq!(c.seat_id(), None);
        assert_eq!(c.server_id(), None);
        assert_eq!(c.sojourn_time(), None);
    }

    #[test]
    fn zero_duration_customer_is_not_rejected() {
        let c = Customer::departed(0., 0., 0., 0, 0);
        assert!(!c.is_rejected());
        assert_eq!(c.waiting_time(), Some(0.));
        assert_eq!(c.sojourn_time(), Some(0.));
    }

    #[test]
    fn derived_times() {
        let c = Customer::departed(1., 2.5, 4., 3, 1);
        assert_eq!(c.waiting_time(), Some(1.5));
        assert_eq!(c.service_time(), Some(1.5));
        assert_eq!(c.sojourn_time(), Some(3.));
        assert_eq!(c.seat_id(), Some(3));
        assert_eq!(c.server_id(), Some(1));
    }

    #[test]
    fn display() {
        assert_eq!(Customer::rejected(1.5).to_string(), "arrived: 1.500\trejected");
        assert_eq!(
            Customer::departed(1., 2., 3., 0, 1).to_string(),
            "arrived: 1.000\tserved: 2.000\tdeparted: 3.000\tseat: 0\tserver: 1"
        );
    }

    #[test]
    fn serialize() {
        let json = serde_json::to_value(Customer::rejected(2.)).unwrap();
        assert_eq!(json, serde_json::json!({"arrival_time": 2.0, "fate": "Rejected"}));
        let json = serde_json::to_value(Customer::departed(1., 2., 3., 0, 1)).unwrap();
        assert_eq!(json["fate"], "Departed");
        assert_eq!(json["server_id"], 1);
    }
}
