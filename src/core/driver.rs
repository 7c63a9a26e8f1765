use super::{
    event::SchedCoreEvent,
    observer::Observer,
    state::{KernelCtx, Slot, TaskId, Ticks},
};
use crate::scheduler::Scheduler;
use tracing::trace;

/// Single-CPU scheduling core. Moves tasks between the ready queue and the
/// CPU, records every span on the timeline and defers queue placement and
/// slice length to the scheduler policy.
pub struct SchedCore<S: Scheduler> {
    pub ctx: KernelCtx,
    pub scheduler: S,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            ctx: KernelCtx::new(),
            scheduler,
            observer: Observer::new(),
        }
    }

    pub fn wake_task(&mut self, task: TaskId) -> SchedCoreEvent {
        self.ctx.mark_ready(task);
        self.scheduler.enqueue(&mut self.ctx, task);
        trace!(task, now = self.ctx.now, "task admitted");
        SchedCoreEvent::TaskArrived {
            task,
            at: self.ctx.now,
        }
    }

    /// Leave the CPU idle until `until` and record the gap.
    pub fn idle_until(&mut self, until: Ticks) -> SchedCoreEvent {
        debug_assert!(self.ctx.cpu_is_idle() && self.ctx.ready.is_empty());
        debug_assert!(until > self.ctx.now, "idle span must move time forward");

        let from = self.ctx.now;
        self.ctx.record(Slot::Idle, from, until);
        self.ctx.advance_time(until - from);
        trace!(from, to = until, "cpu idle");
        SchedCoreEvent::CpuIdle { from, to: until }
    }

    /// Pop the head of the ready queue and run it for one slice. The task stays
    /// on the CPU until `finish_slice`, so arrivals during the slice can be
    /// admitted ahead of it.
    pub fn run_next_slice(&mut self) -> Option<SchedCoreEvent> {
        let task = self.ctx.ready_pop_front()?;
        self.ctx.set_running(task);

        let remaining = self.ctx.task(task).remaining_service();
        let slice = self.scheduler.time_slice(&self.ctx, task).min(remaining);

        let start = self.ctx.now;
        self.ctx.task_mut(task).consumed_service += slice;
        self.ctx.advance_time(slice);
        let end = self.ctx.now;
        self.ctx.record(Slot::Task(task), start, end);

        trace!(task, start, end, "task ran");
        Some(SchedCoreEvent::TaskRan { task, start, end })
    }

    /// Take the running task off the CPU: complete it or hand it back to the
    /// scheduler for re-queueing.
    pub fn finish_slice(&mut self) -> Option<SchedCoreEvent> {
        let task = self.ctx.clear_cpu()?;
        let remaining = self.ctx.task(task).remaining_service();

        if remaining == 0 {
            let now = self.ctx.now;
            self.ctx.mark_completed(task, now);
            trace!(task, now, "task completed");
            return Some(SchedCoreEvent::TaskCompleted { task, at: now });
        }

        self.ctx.mark_ready(task);
        self.scheduler.enqueue(&mut self.ctx, task);
        trace!(task, remaining, "task preempted");
        Some(SchedCoreEvent::TaskPreempted { task, remaining })
    }

    pub fn observe(&mut self) {
        self.observer.observe(&self.ctx);
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TaskState;
    use crate::scheduler::RoundRobinScheduler;

    fn rr(quantum: Ticks) -> SchedCore<RoundRobinScheduler> {
        SchedCore::new(RoundRobinScheduler::new(quantum).unwrap())
    }

    #[test]
    fn test_slice_is_capped_by_remaining_service() {
        let mut core = rr(4);
        let task = core.ctx.create_task(0, 3);
        core.wake_task(task);

        let ran = core.run_next_slice();
        assert_eq!(
            ran,
            Some(SchedCoreEvent::TaskRan {
                task,
                start: 0,
                end: 3
            })
        );
        assert_eq!(
            core.finish_slice(),
            Some(SchedCoreEvent::TaskCompleted { task, at: 3 })
        );
        assert_eq!(core.ctx.task(task).state, TaskState::Completed);
        assert_eq!(core.ctx.completed_count(), 1);
    }

    #[test]
    fn test_preempted_task_goes_behind_queued_work() {
        let mut core = rr(2);
        let a = core.ctx.create_task(0, 5);
        let b = core.ctx.create_task(0, 1);
        core.wake_task(a);
        core.wake_task(b);

        core.run_next_slice();
        assert_eq!(
            core.finish_slice(),
            Some(SchedCoreEvent::TaskPreempted {
                task: a,
                remaining: 3
            })
        );
        assert_eq!(core.ctx.ready.iter().collect::<Vec<_>>(), vec![b, a]);
    }

    #[test]
    fn test_idle_span_advances_time() {
        let mut core = rr(2);
        assert_eq!(core.idle_until(4), SchedCoreEvent::CpuIdle { from: 0, to: 4 });
        assert_eq!(core.now(), 4);
        assert_eq!(core.ctx.timeline.len(), 1);
        core.observe();
        assert_eq!(core.observer().steps(), 1);
    }

    #[test]
    fn test_empty_queue_runs_nothing() {
        let mut core = rr(2);
        assert_eq!(core.run_next_slice(), None);
        assert_eq!(core.finish_slice(), None);
    }
}
