use crate::{
    core::Ticks,
    sim::{ProcessState, TimelineSegment},
};
use average::{Estimate, Mean};
use std::fmt;

/// Summary statistics of one finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub avg_waiting_time: f64,
    pub avg_turnaround_time: f64,
    pub avg_response_time: f64,
    /// Busy share of `total_time`, 0 to 100.
    pub cpu_utilization_percent: f64,
    /// Completed processes per time unit.
    pub throughput: f64,
    pub total_processes: usize,
    /// End of the last timeline segment.
    pub total_time: Ticks,
}

/// Derive summary statistics from final process states and the timeline.
///
/// Expects every state to be completed; averages are taken over completed
/// states only.
pub fn aggregate(states: &[ProcessState], timeline: &[TimelineSegment]) -> Metrics {
    debug_assert!(!states.is_empty(), "aggregate needs at least one process");
    debug_assert!(
        states.iter().all(ProcessState::is_completed),
        "aggregate called before every process completed"
    );

    let total_time = timeline.last().map_or(0, |seg| seg.end_time);
    let busy_time: Ticks = timeline
        .iter()
        .filter(|seg| !seg.subject.is_idle())
        .map(TimelineSegment::duration)
        .sum();

    let (cpu_utilization_percent, throughput) = if total_time > 0 {
        (
            100.0 * busy_time as f64 / total_time as f64,
            states.len() as f64 / total_time as f64,
        )
    } else {
        (0.0, 0.0)
    };

    Metrics {
        avg_waiting_time: avg(states.iter().filter_map(|s| s.waiting_time)),
        avg_turnaround_time: avg(states.iter().filter_map(|s| s.turnaround_time)),
        avg_response_time: avg(states.iter().filter_map(ProcessState::response_time)),
        cpu_utilization_percent,
        throughput,
        total_processes: states.len(),
        total_time,
    }
}

fn avg(iter: impl Iterator<Item = Ticks>) -> f64 {
    iter.map(|t| t as f64).collect::<Mean>().estimate()
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Avg Waiting Time: {:.2}", self.avg_waiting_time)?;
        writeln!(f, "Avg Turnaround Time: {:.2}", self.avg_turnaround_time)?;
        writeln!(f, "Avg Response Time: {:.2}", self.avg_response_time)?;
        writeln!(f, "CPU Utilization: {:.2}%", self.cpu_utilization_percent)?;
        writeln!(f, "Throughput: {:.4} processes/unit time", self.throughput)?;
        writeln!(f, "Total Processes: {}", self.total_processes)?;
        write!(f, "Total Time: {}", self.total_time)
    }
}
