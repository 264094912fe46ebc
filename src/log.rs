//! Logging of customer records.
//!
//! Records are emitted at trace level under the `mmck::customer` target, so a long run can be followed with
//! `RUST_LOG=mmck::customer=trace` without the rest of the crate's logs.

use colored::{ColoredString, Colorize};
use log::{log_enabled, trace, Level};

use crate::customer::Customer;

/// Log target of customer records.
pub const CUSTOMER_TARGET: &str = "mmck::customer";

/// Renders a customer record, rejected customers in red and served ones in green.
pub fn colorize(customer: &Customer) -> ColoredString {
    let text = customer.to_string();
    if customer.is_rejected() {
        text.red()
    } else {
        text.green()
    }
}

/// Logs a customer record if trace logging is enabled for the customer target.
pub fn log_customer(customer: &Customer) {
    if log_enabled!(target: CUSTOMER_TARGET, Level::Trace) {
        trace!(target: CUSTOMER_TARGET, "{}", colorize(customer));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colorize_keeps_text() {
        colored::control::set_override(false);
        assert_eq!(colorize(&Customer::rejected(1.)).to_string(), "arrived: 1.000\trejected");
        let served = Customer::departed(0., 0., 1., 0, 0);
        assert_eq!(colorize(&served).to_string(), served.to_string());
    }

    #[test]
    fn logging_without_logger_is_noop() {
        log_customer(&Customer::rejected(0.));
    }
}
