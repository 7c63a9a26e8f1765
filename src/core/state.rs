use rustc_hash::FxHashSet;
use std::collections::VecDeque;

// Index into Task Vec; equals the process's position in the caller's input
pub type TaskId = usize;
pub type Ticks = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    // Not yet arrived
    Pending,
    Ready,
    Running,
    Completed,
}

#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub state: TaskState,
    pub arrival_time: Ticks,
    pub required_service: Ticks,
    pub consumed_service: Ticks,
    pub first_run_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,
}

impl Task {
    pub fn remaining_service(&self) -> Ticks {
        self.required_service - self.consumed_service
    }
}

/// Occupant of the CPU for one recorded span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Task(TaskId),
    Idle,
}

/// One contiguous span of CPU time, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pub slot: Slot,
    pub start: Ticks,
    pub end: Ticks,
}

impl Slice {
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

/// FIFO ready queue. Membership is tracked separately so a task can never
/// sit in the queue twice.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    tasks: VecDeque<TaskId>,
    members: FxHashSet<TaskId>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, task_id: TaskId) {
        let inserted = self.members.insert(task_id);
        assert!(inserted, "Task {task_id} already present in the ready queue");
        self.tasks.push_back(task_id);
    }

    pub fn pop_front(&mut self) -> Option<TaskId> {
        let task = self.tasks.pop_front()?;
        let removed = self.members.remove(&task);
        debug_assert!(removed, "Task {task} missing ready queue membership");
        Some(task)
    }

    pub fn contains(&self, task_id: TaskId) -> bool {
        self.members.contains(&task_id)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.tasks.iter().copied()
    }
}

#[derive(Debug)]
pub struct KernelCtx {
    pub now: Ticks,
    pub current: Option<TaskId>,
    pub tasks: Vec<Task>,
    pub ready: ReadyQueue,
    pub timeline: Vec<Slice>,
    completed: usize,
}

impl KernelCtx {
    pub fn new() -> Self {
        Self {
            now: 0,
            current: None,
            tasks: Vec::new(),
            ready: ReadyQueue::new(),
            timeline: Vec::new(),
            completed: 0,
        }
    }

    pub fn create_task(&mut self, arrival_time: Ticks, required_service: Ticks) -> TaskId {
        let id = self.tasks.len();
        self.tasks.push(Task {
            id,
            state: TaskState::Pending,
            arrival_time,
            required_service,
            consumed_service: 0,
            first_run_time: None,
            completion_time: None,
        });
        id
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self
            .now
            .checked_add(delta)
            .expect("Clock overflow; input must bound the schedule's end time");
    }

    pub fn task(&self, task_id: TaskId) -> &Task {
        &self.tasks[task_id]
    }

    pub fn task_mut(&mut self, task_id: TaskId) -> &mut Task {
        &mut self.tasks[task_id]
    }

    pub fn ready_push_back(&mut self, task_id: TaskId) {
        debug_assert_eq!(
            self.task(task_id).state,
            TaskState::Ready,
            "Task {task_id} must be Ready when enqueued"
        );
        self.ready.push_back(task_id);
    }

    pub fn ready_pop_front(&mut self) -> Option<TaskId> {
        self.ready.pop_front()
    }

    pub fn cpu_is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn mark_ready(&mut self, task_id: TaskId) {
        let task = self.task_mut(task_id);
        debug_assert!(
            task.state != TaskState::Completed,
            "Completed task {} cannot be ready",
            task.id
        );
        task.state = TaskState::Ready;
    }

    pub fn set_running(&mut self, task_id: TaskId) {
        debug_assert!(
            !self.ready.contains(task_id),
            "Running task {task_id} must not be enqueued"
        );
        debug_assert!(self.current.is_none(), "CPU already running a task");

        let now = self.now;
        self.current = Some(task_id);
        let task = self.task_mut(task_id);
        task.state = TaskState::Running;
        task.first_run_time.get_or_insert(now);
    }

    pub fn clear_cpu(&mut self) -> Option<TaskId> {
        self.current.take()
    }

    pub fn mark_completed(&mut self, task_id: TaskId, completion_time: Ticks) {
        debug_assert!(
            !self.ready.contains(task_id),
            "Completing task {task_id} that is still enqueued"
        );

        let task = &mut self.tasks[task_id];
        debug_assert_eq!(task.remaining_service(), 0);
        task.state = TaskState::Completed;
        task.completion_time = Some(completion_time);
        self.completed += 1;
    }

    pub fn completed_count(&self) -> usize {
        self.completed
    }

    pub fn record(&mut self, slot: Slot, start: Ticks, end: Ticks) {
        if end > start {
            self.timeline.push(Slice { slot, start, end });
        }
    }
}

impl Default for KernelCtx {
    fn default() -> Self {
        Self::new()
    }
}
