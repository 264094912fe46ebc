//! Configuration errors.

use thiserror::Error;

use crate::clock::Id;

/// Reasons for refusing to build a simulation component.
///
/// All of them are detected at construction time, so that a successfully built component never ends up in a state
/// where its earliest available time is undefined.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Waiting line with no seats.
    #[error("line capacity must be positive")]
    ZeroCapacity,

    /// Service pool with no servers.
    #[error("service pool must contain at least one server")]
    NoServers,

    /// Two servers share the same identifier.
    #[error("duplicate server id {0}")]
    DuplicateServer(Id),

    /// Rate parameter that is zero, negative or not finite.
    #[error("{name} must be a positive finite number, got {value}")]
    InvalidRate {
        /// Name of the parameter.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// Deterministic increment sequence that is empty or contains a negative or non-finite value.
    #[error("invalid time trace: {0}")]
    InvalidTrace(String),

    /// Arrival process whose time source may yield a zero increment.
    #[error("arrival source must yield strictly positive increments")]
    NonPositiveArrivals,

    /// Server made available at a negative or non-finite time.
    #[error("server {id} cannot become available at {time}")]
    InvalidAvailability {
        /// Server identifier.
        id: Id,
        /// Rejected time.
        time: f64,
    },

    /// Arrival schedule that is empty, negative or not strictly increasing.
    #[error("invalid arrival schedule: {0}")]
    InvalidSchedule(String),

    /// Configuration file could not be read.
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Checks that `value` is a positive finite rate.
pub(crate) fn check_rate(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0. {
        Ok(value)
    } else {
        Err(ConfigError::InvalidRate { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_check() {
        assert_eq!(check_rate("rate", 2.5).unwrap(), 2.5);
        for bad in [0., -1., f64::NAN, f64::INFINITY] {
            assert!(matches!(
                check_rate("rate", bad),
                Err(ConfigError::InvalidRate { name: "rate", .. })
            ));
        }
    }

    #[test]
    fn messages() {
        assert_eq!(ConfigError::ZeroCapacity.to_string(), "line capacity must be positive");
        assert_eq!(ConfigError::DuplicateServer(3).to_string(), "duplicate server id 3");
        assert_eq!(
            ConfigError::InvalidAvailability { id: 1, time: -2. }.to_string(),
            "server 1 cannot become available at -2"
        );
    }
}
