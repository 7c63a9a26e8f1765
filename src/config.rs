use crate::core::Ticks;
use std::{fmt, str::FromStr};

pub const DEFAULT_QUANTUM: Ticks = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Policy {
    #[default]
    RoundRobin,
    Fcfs,
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rr" | "round-robin" => Ok(Self::RoundRobin),
            "fcfs" | "fifo" => Ok(Self::Fcfs),
            other => Err(format!("unknown policy {other:?} (expected rr or fcfs)")),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RoundRobin => "rr",
            Self::Fcfs => "fcfs",
        })
    }
}

/// Parameters of one simulation run. `quantum` is ignored under FCFS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub quantum: Ticks,
    pub policy: Policy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
            policy: Policy::RoundRobin,
        }
    }
}
