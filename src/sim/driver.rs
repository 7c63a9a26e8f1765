use super::{
    job::{ProcessSpec, ProcessState},
    result::SimulationResult,
    timeline::{IDLE_ID, Subject, TimelineSegment},
};
use crate::{
    core::{SchedCore, SchedCoreEvent, Slot, TaskId, Ticks},
    error::{InternalFault, InvalidInputError, SimError},
    metrics,
    scheduler::Scheduler,
};
use rustc_hash::FxHashSet;
use tracing::{debug, error};

/// Drives a `SchedCore` over a fixed, fully known set of processes.
pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
    // Input order; index == TaskId
    jobs: Vec<ProcessSpec>,
    // TaskIds sorted by arrival, ties kept in input order
    arrivals: Vec<TaskId>,
    job_cursor: usize,
    step_bound: u64,
}

impl<S: Scheduler> Sim<S> {
    pub fn new(jobs: Vec<ProcessSpec>, scheduler: S) -> Result<Self, SimError> {
        validate(&jobs)?;

        let mut core = SchedCore::new(scheduler);
        for job in &jobs {
            core.ctx.create_task(job.arrival_time, job.burst_time);
        }

        let mut arrivals: Vec<TaskId> = (0..jobs.len()).collect();
        arrivals.sort_by_key(|&task| jobs[task].arrival_time);

        // Every step either runs a slice or admits at least one arrival
        let step_bound = jobs
            .iter()
            .map(|job| core.scheduler.max_slices(job.burst_time))
            .fold(jobs.len() as u64, u64::saturating_add);

        Ok(Self {
            core,
            jobs,
            arrivals,
            job_cursor: 0,
            step_bound,
        })
    }

    /// One iteration of the scheduling loop: either idle until (and admit)
    /// the next arrival, or run the head of the ready queue for one slice.
    pub fn step(&mut self) -> Result<Vec<SchedCoreEvent>, SimError> {
        let mut events = Vec::new();
        if self.all_jobs_completed() {
            return Ok(events);
        }

        if self.core.ctx.ready.is_empty() {
            let Some(next_arrival) = self.next_arrival_time() else {
                let fault = InternalFault::StalledWithoutArrivals {
                    now: self.core.now(),
                };
                error!(%fault, "scheduler stalled");
                return Err(fault.into());
            };

            if next_arrival > self.core.now() {
                events.push(self.core.idle_until(next_arrival));
            }
            self.handle_arrivals(&mut events);
        } else {
            events.extend(self.core.run_next_slice());
            // Arrivals during the slice queue ahead of the preempted task
            self.handle_arrivals(&mut events);
            events.extend(self.core.finish_slice());
        }

        self.core.observe();
        Ok(events)
    }

    fn handle_arrivals(&mut self, events: &mut Vec<SchedCoreEvent>) {
        let now = self.core.now();
        while let Some(&task) = self.arrivals.get(self.job_cursor) {
            if self.jobs[task].arrival_time > now {
                break;
            }
            events.push(self.core.wake_task(task));
            self.job_cursor += 1;
        }
    }

    fn next_arrival_time(&self) -> Option<Ticks> {
        self.arrivals
            .get(self.job_cursor)
            .map(|&task| self.jobs[task].arrival_time)
    }

    pub fn all_jobs_completed(&self) -> bool {
        self.core.ctx.completed_count() == self.jobs.len()
    }

    pub fn step_bound(&self) -> u64 {
        self.step_bound
    }

    pub fn jobs(&self) -> &[ProcessSpec] {
        &self.jobs
    }

    /// Current state of every process, in input order.
    pub fn processes(&self) -> Vec<ProcessState> {
        self.jobs
            .iter()
            .zip(&self.core.ctx.tasks)
            .map(|(job, task)| ProcessState::from_task(job, task))
            .collect()
    }

    pub fn timeline(&self) -> Vec<TimelineSegment> {
        self.core
            .ctx
            .timeline
            .iter()
            .map(|slice| TimelineSegment {
                subject: match slice.slot {
                    Slot::Task(task) => Subject::Process(self.jobs[task].id.clone()),
                    Slot::Idle => Subject::Idle,
                },
                start_time: slice.start,
                end_time: slice.end,
            })
            .collect()
    }

    /// Run to completion.
    pub fn run(mut self) -> Result<SimulationResult, SimError> {
        debug!(
            processes = self.jobs.len(),
            step_bound = self.step_bound,
            "Starting simulation"
        );

        while !self.all_jobs_completed() && self.core.observer().steps() < self.step_bound {
            self.step()?;
        }
        self.finish()
    }

    /// Assemble the result of a simulation that was stepped to completion.
    /// Unfinished processes at this point mean the step bound ran out.
    pub fn finish(self) -> Result<SimulationResult, SimError> {
        if !self.all_jobs_completed() {
            let fault = InternalFault::IterationBoundExceeded {
                bound: self.step_bound,
            };
            error!(%fault, now = self.core.now(), "scheduler livelock");
            return Err(fault.into());
        }

        let processes = self.processes();
        let timeline = self.timeline();
        let metrics = metrics::aggregate(&processes, &timeline);

        debug!(
            steps = self.core.observer().steps(),
            segments = timeline.len(),
            total_time = metrics.total_time,
            "Simulation finished"
        );

        Ok(SimulationResult {
            processes,
            timeline,
            metrics,
        })
    }
}

fn validate(jobs: &[ProcessSpec]) -> Result<(), InvalidInputError> {
    if jobs.is_empty() {
        return Err(InvalidInputError::NoProcesses);
    }

    let mut seen = FxHashSet::default();
    for (index, job) in jobs.iter().enumerate() {
        if job.id.is_empty() {
            return Err(InvalidInputError::EmptyId { index });
        }
        if job.id == IDLE_ID {
            return Err(InvalidInputError::ReservedId { index });
        }
        if !seen.insert(job.id.as_str()) {
            return Err(InvalidInputError::DuplicateId { id: job.id.clone() });
        }
        if job.burst_time == 0 {
            return Err(InvalidInputError::ZeroBurst { id: job.id.clone() });
        }
    }

    // The schedule ends no later than the last arrival plus all service
    let latest_arrival = jobs.iter().map(|job| job.arrival_time).max().unwrap_or(0);
    jobs.iter()
        .try_fold(latest_arrival, |end, job| end.checked_add(job.burst_time))
        .ok_or(InvalidInputError::TimeOverflow)?;

    Ok(())
}
