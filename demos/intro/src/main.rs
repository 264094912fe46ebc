use mmck::arrival::ScheduledArrival;
use mmck::source::Trace;
use mmck::{Customer, MinHeapService, Ring, Server, Simulation};

fn main() {
    // Customers arrive at fixed times instead of a Poisson process
    let arrival = ScheduledArrival::new(vec![0.0, 0.5, 1.0, 1.5, 2.0, 6.0]).unwrap();

    // Two waiting places
    let line = Ring::new(2).unwrap();

    // Two servers with deterministic service durations
    let servers = vec![
        Server::new(1, Trace::new(vec![3.0]).unwrap()),
        Server::new(2, Trace::new(vec![4.0, 1.0]).unwrap()),
    ];
    let service = MinHeapService::new(servers).unwrap();

    // Each call to next() returns the complete record of the next customer
    let mut sim = Simulation::new(arrival, line, service);
    for _ in 0..6 {
        let customer: Customer = sim.next();
        match customer.waiting_time() {
            None => println!("{}  <- line was full", customer),
            Some(wait) if wait > 0.0 => println!("{}  <- waited {:.1}", customer, wait),
            Some(_) => println!("{}", customer),
        }
    }
}
