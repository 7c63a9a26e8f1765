pub mod fifo;
pub mod round_robin;

use crate::core::{KernelCtx, TaskId, Ticks};
pub use fifo::FifoScheduler;
pub use round_robin::RoundRobinScheduler;

/// Queueing policy plugged into `SchedCore`.
pub trait Scheduler {
    /// Place a Ready task in the ready queue, on arrival or after its slice
    /// expired.
    fn enqueue(&mut self, ctx: &mut KernelCtx, task: TaskId);

    /// CPU time granted to `task` for its next turn. The core caps this at
    /// the task's remaining service.
    fn time_slice(&self, ctx: &KernelCtx, task: TaskId) -> Ticks;

    /// Upper bound on the number of slices a task needing `required_service`
    /// is split into.
    fn max_slices(&self, required_service: Ticks) -> u64;
}
