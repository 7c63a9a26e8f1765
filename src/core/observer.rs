use super::state::{KernelCtx, Slot, TaskState};

/// Counts engine steps and checks kernel invariants after each one.
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, core: &KernelCtx) {
        self.step += 1;

        // Between steps the CPU is always released
        debug_assert!(
            core.current.is_none(),
            "CPU still holds task {:?} at end of step",
            core.current
        );

        for task_id in core.ready.iter() {
            let task = core.task(task_id);
            debug_assert_eq!(
                task.state,
                TaskState::Ready,
                "Queued task {task_id} must be Ready"
            );
            debug_assert!(
                task.remaining_service() > 0,
                "Queued task {task_id} has no service left"
            );
            debug_assert!(
                task.arrival_time <= core.now,
                "Task {task_id} queued before its arrival"
            );
        }

        for task in &core.tasks {
            debug_assert!(
                task.consumed_service <= task.required_service,
                "Task {} consumed more service than required",
                task.id
            );
            debug_assert_eq!(
                task.state == TaskState::Completed,
                task.completion_time.is_some(),
                "Task {} completion time out of sync with state",
                task.id
            );
        }

        for pair in core.timeline.windows(2) {
            debug_assert_eq!(
                pair[0].end, pair[1].start,
                "Timeline gap or overlap between {:?} and {:?}",
                pair[0], pair[1]
            );
            debug_assert!(
                !(pair[0].slot == Slot::Idle && pair[1].slot == Slot::Idle),
                "Adjacent idle spans at t={}",
                pair[0].end
            );
        }

        if let Some(last) = core.timeline.last() {
            debug_assert_eq!(last.end, core.now, "Timeline does not end at now");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_steps() {
        let ctx = KernelCtx::new();
        let mut observer = Observer::new();
        observer.observe(&ctx);
        observer.observe(&ctx);
        assert_eq!(observer.steps(), 2);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "Timeline gap or overlap")]
    fn test_flags_timeline_gap() {
        let mut ctx = KernelCtx::new();
        let task = ctx.create_task(0, 3);
        ctx.record(Slot::Task(task), 0, 1);
        ctx.record(Slot::Task(task), 2, 3);
        ctx.now = 3;
        Observer::new().observe(&ctx);
    }
}
