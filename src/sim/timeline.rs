use crate::core::Ticks;
use std::fmt;

/// Reserved subject id for spans where no process runs.
pub const IDLE_ID: &str = "IDLE";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subject {
    Process(String),
    Idle,
}

impl Subject {
    /// Process id, or `"IDLE"`.
    pub fn id(&self) -> &str {
        match self {
            Self::Process(id) => id,
            Self::Idle => IDLE_ID,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One Gantt chart entry, `[start_time, end_time)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineSegment {
    pub subject: Subject,
    pub start_time: Ticks,
    pub end_time: Ticks,
}

impl TimelineSegment {
    pub fn subject_id(&self) -> &str {
        self.subject.id()
    }

    pub fn duration(&self) -> Ticks {
        self.end_time - self.start_time
    }
}
