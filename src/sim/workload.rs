use super::job::ProcessSpec;
use crate::core::Ticks;
use rand::prelude::*;

/// Bernoulli arrival process: at each tick in `0..ticks` a process arrives with
/// probability `p_arrival` and is short with probability `p_short`. Ids are
/// `P1`, `P2`, ... in arrival order. The same seed yields the same workload.
pub fn bernoulli_jobs(
    ticks: Ticks,
    p_arrival: f64,
    p_short: f64,
    short_ticks: Ticks,
    long_ticks: Ticks,
    seed: u64,
) -> Vec<ProcessSpec> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut jobs = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let burst_time = if rng.random::<f64>() < p_short {
                short_ticks
            } else {
                long_ticks
            };

            jobs.push(ProcessSpec::new(format!("P{}", jobs.len() + 1), t, burst_time));
        }
    }

    jobs
}
