use crate::core::{TaskId, Ticks};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedCoreEvent {
    // Admitted to the ready queue
    TaskArrived {
        task: TaskId,
        at: Ticks,
    },
    TaskRan {
        task: TaskId,
        start: Ticks,
        end: Ticks,
    },
    // Quantum expired with service left; back of the queue
    TaskPreempted {
        task: TaskId,
        remaining: Ticks,
    },
    TaskCompleted {
        task: TaskId,
        at: Ticks,
    },
    // Nothing runnable until the next arrival
    CpuIdle {
        from: Ticks,
        to: Ticks,
    },
}
