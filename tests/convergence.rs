use mmck::{QueueConfig, Summary};

const REPLICATIONS: usize = 4;
const CUSTOMERS_PER_REPLICATION: u64 = 250_000;

fn simulate(config: &QueueConfig) -> Summary {
    let mut summary = Summary::new();
    for mut sim in config.build_replications(REPLICATIONS).unwrap() {
        summary.extend(sim.customers().take(CUSTOMERS_PER_REPLICATION as usize));
    }
    summary
}

fn check(config: QueueConfig) {
    let _ = env_logger::builder().is_test(true).try_init();
    let model = config.model().unwrap();
    let summary = simulate(&config);

    let expected = model.blocking_probability();
    let observed = summary.rejection_ratio();
    // rejections are correlated, allow well beyond the binomial error
    let tolerance = 0.005f64.max(20. * summary.rejection_ratio_std_error());
    assert!(
        (observed - expected).abs() < tolerance,
        "{:?}: rejection ratio {} vs blocking probability {}",
        config,
        observed,
        expected
    );

    let expected = model.mean_sojourn_time();
    let observed = summary.mean_sojourn_time().unwrap();
    assert!(
        (observed - expected).abs() < 0.03 * expected,
        "{:?}: mean sojourn time {} vs {}",
        config,
        observed,
        expected
    );
}

#[test]
fn single_server_single_seat() {
    check(QueueConfig::new(1., 1, 1., 1).with_seed(11));
}

#[test]
fn two_servers_five_seats() {
    check(QueueConfig::new(2., 2, 1., 5).with_seed(123));
}

#[test]
fn overloaded_pool() {
    check(QueueConfig::new(6., 4, 1., 3).with_seed(7));
}

#[test]
fn light_load_rarely_rejects() {
    check(QueueConfig::new(1., 5, 1., 2).with_seed(3));
}
