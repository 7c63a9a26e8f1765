use super::{KernelCtx, Scheduler, TaskId, Ticks};

/// First-Come-First-Served: every task runs to completion on its first turn.
#[derive(Debug, Default, Clone, Copy)]
pub struct FifoScheduler;

impl Scheduler for FifoScheduler {
    fn enqueue(&mut self, ctx: &mut KernelCtx, task: TaskId) {
        ctx.ready_push_back(task);
    }

    fn time_slice(&self, ctx: &KernelCtx, task: TaskId) -> Ticks {
        ctx.task(task).remaining_service()
    }

    fn max_slices(&self, _required_service: Ticks) -> u64 {
        1
    }
}
