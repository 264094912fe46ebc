use std::time::Instant;

use clap::Parser;
use log::info;

use mmck::log::colorize;
use mmck::{ConfigError, QueueConfig};

#[derive(Parser, Debug)]
#[clap(about, long_about = None)]
struct Args {
    /// Configuration JSON file (overrides the model parameters below).
    #[clap(long)]
    config: Option<String>,

    /// Arrival rate.
    #[clap(long, default_value = "2.0")]
    arrival_rate: f64,

    /// Number of servers.
    #[clap(long, default_value = "2")]
    servers: usize,

    /// Service rate of each server.
    #[clap(long, default_value = "1.0")]
    service_rate: f64,

    /// Number of waiting places.
    #[clap(long, default_value = "5")]
    capacity: usize,

    /// Number of customers to simulate.
    #[clap(long, default_value = "10000000")]
    customers: u64,

    /// Number of first customers to print.
    #[clap(long, default_value = "0")]
    print: usize,

    /// Print the summary as JSON.
    #[clap(long)]
    json: bool,

    /// Random seed.
    #[clap(long, default_value = "123")]
    seed: u64,
}

fn main() -> Result<(), ConfigError> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => QueueConfig::from_json_file(path)?,
        None => {
            QueueConfig::new(args.arrival_rate, args.servers, args.service_rate, args.capacity).with_seed(args.seed)
        }
    };
    info!("Simulating {} customers with {:?}", args.customers, config);

    let mut sim = config.build()?;
    for customer in sim.customers().take(args.print) {
        println!("{}", colorize(&customer));
    }

    let t = Instant::now();
    let summary = sim.run(args.customers);
    let elapsed = t.elapsed().as_secs_f64();
    let model = config.model()?;

    if args.json {
        let report = serde_json::json!({
            "config": config,
            "summary": summary,
            "blocking_probability": model.blocking_probability(),
            "mean_sojourn_time": model.mean_sojourn_time(),
        });
        println!("{:#}", report);
    } else {
        println!("rejection ratio:      {:.6}", summary.rejection_ratio());
        println!("blocking probability: {:.6}", model.blocking_probability());
        if let Some(sojourn) = summary.mean_sojourn_time() {
            println!("mean sojourn time:    {:.6} (expected {:.6})", sojourn, model.mean_sojourn_time());
        }
        if let Some(waiting) = summary.mean_waiting_time() {
            println!("mean waiting time:    {:.6} (expected {:.6})", waiting, model.mean_waiting_time());
        }
    }
    info!(
        "Processed {} customers in {:.2}s ({:.0} customers/s)",
        args.customers,
        elapsed,
        args.customers as f64 / elapsed
    );
    Ok(())
}
