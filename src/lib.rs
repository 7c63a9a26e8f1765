//! Round Robin CPU scheduling model.
//!
//! Given a fixed set of processes (id, arrival time, burst time) and a time
//! quantum, reconstructs the exact sequence of CPU slices and idle gaps and
//! derives per-process completion figures and summary metrics.
//!
//! ```
//! use rr_model::{ProcessSpec, simulate};
//!
//! let specs = [ProcessSpec::new("P1", 0, 5), ProcessSpec::new("P2", 1, 3)];
//! let result = simulate(&specs, 2).unwrap();
//! assert_eq!(result.metrics.total_time, 8);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod metrics;
pub mod scheduler;
pub mod sim;

pub use config::{DEFAULT_QUANTUM, Policy, SimConfig};
pub use error::{InternalFault, InvalidInputError, SimError};
pub use metrics::{Metrics, aggregate};
pub use scheduler::Scheduler;
pub use sim::{
    ProcessSpec, ProcessState, Sim, SimulationResult, Subject, TimelineSegment, run, simulate,
    simulate_fcfs,
};
