use super::{job::ProcessState, timeline::TimelineSegment};
use crate::metrics::Metrics;
use rustc_hash::FxHashSet;

/// Output of a finished run. `processes` is in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub processes: Vec<ProcessState>,
    pub timeline: Vec<TimelineSegment>,
    pub metrics: Metrics,
}

impl SimulationResult {
    /// Subject ids in order of first appearance on the timeline, `"IDLE"` included.
    pub fn distinct_subjects(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();
        self.timeline
            .iter()
            .map(TimelineSegment::subject_id)
            .filter(|id| seen.insert(*id))
            .collect()
    }

    pub fn process(&self, id: &str) -> Option<&ProcessState> {
        self.processes.iter().find(|p| p.id == id)
    }
}
