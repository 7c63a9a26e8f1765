use super::{KernelCtx, Scheduler, TaskId, Ticks};
use crate::error::InvalidInputError;

#[derive(Debug, Clone, Copy)]
pub struct RoundRobinScheduler {
    quantum: Ticks,
}

impl RoundRobinScheduler {
    pub fn new(quantum: Ticks) -> Result<Self, InvalidInputError> {
        if quantum == 0 {
            return Err(InvalidInputError::ZeroQuantum);
        }
        Ok(Self { quantum })
    }

    pub fn quantum(&self) -> Ticks {
        self.quantum
    }
}

impl Scheduler for RoundRobinScheduler {
    // Wakeups and preemptions both go to the tail; the arrival/re-queue
    // ordering is decided by when the driver calls us.
    fn enqueue(&mut self, ctx: &mut KernelCtx, task: TaskId) {
        ctx.ready_push_back(task);
    }

    fn time_slice(&self, _ctx: &KernelCtx, _task: TaskId) -> Ticks {
        self.quantum
    }

    fn max_slices(&self, required_service: Ticks) -> u64 {
        required_service.div_ceil(self.quantum)
    }
}
