use crate::core::{Task, Ticks};
use std::{fmt, str::FromStr};

/// A process as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcessSpec {
    pub id: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
}

impl ProcessSpec {
    pub fn new(id: impl Into<String>, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            id: id.into(),
            arrival_time,
            burst_time,
        }
    }
}

impl fmt::Display for ProcessSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.id, self.arrival_time, self.burst_time)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseSpecError {
    #[error("expected ID:ARRIVAL:BURST, got {0:?}")]
    Format(String),

    #[error("invalid {field} {value:?}: expected a non-negative integer")]
    Number { field: &'static str, value: String },
}

/// Parses `ID:ARRIVAL:BURST`; `,` is accepted as the separator too.
impl FromStr for ProcessSpec {
    type Err = ParseSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sep = if s.contains(':') { ':' } else { ',' };
        let fields: Vec<&str> = s.split(sep).map(str::trim).collect();
        let &[id, arrival, burst] = fields.as_slice() else {
            return Err(ParseSpecError::Format(s.to_owned()));
        };

        let number = |field: &'static str, value: &str| {
            value.parse::<Ticks>().map_err(|_| ParseSpecError::Number {
                field,
                value: value.to_owned(),
            })
        };

        Ok(Self {
            id: id.to_owned(),
            arrival_time: number("arrival time", arrival)?,
            burst_time: number("burst time", burst)?,
        })
    }
}

/// Snapshot of one process's scheduling state. The timing fields stay `None`
/// until the process completes and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessState {
    pub id: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub remaining_time: Ticks,
    pub first_run_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,
    pub turnaround_time: Option<Ticks>,
    pub waiting_time: Option<Ticks>,
}

impl ProcessState {
    pub(crate) fn from_task(spec: &ProcessSpec, task: &Task) -> Self {
        let completion_time = task.completion_time;
        let turnaround_time = completion_time.map(|c| c - spec.arrival_time);
        let waiting_time = turnaround_time.map(|t| t - spec.burst_time);

        Self {
            id: spec.id.clone(),
            arrival_time: spec.arrival_time,
            burst_time: spec.burst_time,
            remaining_time: task.remaining_service(),
            first_run_time: task.first_run_time,
            completion_time,
            turnaround_time,
            waiting_time,
        }
    }

    pub fn spec(&self) -> ProcessSpec {
        ProcessSpec::new(self.id.clone(), self.arrival_time, self.burst_time)
    }

    pub fn is_completed(&self) -> bool {
        self.completion_time.is_some()
    }

    // Time to first run
    pub fn response_time(&self) -> Option<Ticks> {
        self.first_run_time.map(|t| t - self.arrival_time)
    }
}
