use crate::core::Ticks;

/// Errors returned by a simulation run. No partial result accompanies either kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    /// The caller handed in something that cannot be scheduled.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    /// The engine reached a state the algorithm never produces. Always a bug.
    #[error("internal consistency fault: {0}")]
    Internal(#[from] InternalFault),
}

/// Rejected input, detected before any simulation state exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInputError {
    #[error("at least one process is required")]
    NoProcesses,

    #[error("time quantum must be greater than 0")]
    ZeroQuantum,

    #[error("process #{index} has an empty id")]
    EmptyId { index: usize },

    #[error("process #{index} uses the reserved id \"IDLE\"")]
    ReservedId { index: usize },

    #[error("process id {id:?} is not unique")]
    DuplicateId { id: String },

    #[error("process {id:?} has a burst time of 0")]
    ZeroBurst { id: String },

    #[error("latest arrival plus total burst time does not fit in {} ticks", Ticks::MAX)]
    TimeOverflow,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternalFault {
    #[error("ready queue empty at t={now} with unfinished processes and no pending arrivals")]
    StalledWithoutArrivals { now: Ticks },

    #[error("simulation did not finish within {bound} steps")]
    IterationBoundExceeded { bound: u64 },
}

impl SimError {
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }
}
