pub mod driver;
pub mod job;
pub mod result;
pub mod timeline;
pub mod workload;

pub use driver::Sim;
pub use job::{ParseSpecError, ProcessSpec, ProcessState};
pub use result::SimulationResult;
pub use timeline::{IDLE_ID, Subject, TimelineSegment};
pub use workload::bernoulli_jobs;

use crate::{
    config::{Policy, SimConfig},
    core::Ticks,
    error::SimError,
    scheduler::{FifoScheduler, RoundRobinScheduler},
};

/// Round Robin over `specs` with the given time quantum.
pub fn simulate(specs: &[ProcessSpec], quantum: Ticks) -> Result<SimulationResult, SimError> {
    let scheduler = RoundRobinScheduler::new(quantum)?;
    Sim::new(specs.to_vec(), scheduler)?.run()
}

/// First-Come-First-Served over `specs`.
pub fn simulate_fcfs(specs: &[ProcessSpec]) -> Result<SimulationResult, SimError> {
    Sim::new(specs.to_vec(), FifoScheduler)?.run()
}

pub fn run(specs: &[ProcessSpec], config: &SimConfig) -> Result<SimulationResult, SimError> {
    match config.policy {
        Policy::RoundRobin => simulate(specs, config.quantum),
        Policy::Fcfs => simulate_fcfs(specs),
    }
}
