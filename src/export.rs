//! Plain-text renderings of a result for files and terminals.

use crate::{
    core::Ticks,
    sim::{ProcessState, TimelineSegment},
};
use std::{
    borrow::Cow,
    io::{self, Write},
};

pub const CSV_HEADER: &str =
    "Process ID,Arrival Time,Burst Time,Completion Time,Turnaround Time,Waiting Time";

/// One row per process, input order. Unset timing fields are left empty.
pub fn write_csv<W: Write>(mut w: W, states: &[ProcessState]) -> io::Result<()> {
    writeln!(w, "{CSV_HEADER}")?;
    for state in states {
        writeln!(
            w,
            "{},{},{},{},{},{}",
            csv_field(&state.id),
            state.arrival_time,
            state.burst_time,
            cell(state.completion_time),
            cell(state.turnaround_time),
            cell(state.waiting_time),
        )?;
    }
    Ok(())
}

pub fn to_csv_string(states: &[ProcessState]) -> String {
    let mut buf = Vec::new();
    // Writing to a Vec cannot fail
    let _ = write_csv(&mut buf, states);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Text Gantt chart: `start..end  subject` per segment.
pub fn write_timeline<W: Write>(mut w: W, timeline: &[TimelineSegment]) -> io::Result<()> {
    let width = timeline
        .last()
        .map_or(1, |seg| seg.end_time.to_string().len());
    for seg in timeline {
        writeln!(
            w,
            "{:>width$}..{:<width$}  {}",
            seg.start_time,
            seg.end_time,
            seg.subject_id(),
        )?;
    }
    Ok(())
}

// Quoted per RFC 4180 when the id would otherwise break the row
fn csv_field(text: &str) -> Cow<'_, str> {
    if text.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", text.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(text)
    }
}

fn cell(value: Option<Ticks>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
