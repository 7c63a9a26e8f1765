//! Round Robin scheduling simulator CLI
//!
//! # Example
//!
//! ```bash
//! # Two processes, quantum 2
//! rr_model -q 2 -p P1:0:5 -p P2:1:3
//!
//! # Processes from a file, results exported as CSV
//! rr_model -q 4 --input procs.csv --csv results.csv
//!
//! # Generated workload, step-by-step trace
//! rr_model --random 40 --seed 7 --trace
//! ```

use clap::Parser;
use rr_model::{
    DEFAULT_QUANTUM, Policy, ProcessSpec, Scheduler, Sim, SimConfig, SimError, SimulationResult,
    core::SchedCoreEvent,
    export,
    scheduler::{FifoScheduler, RoundRobinScheduler},
    sim::bernoulli_jobs,
};
use std::{
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Round Robin CPU scheduling simulator
///
/// Reconstructs the execution timeline of a fixed process set and reports
/// per-process and aggregate timing metrics.
#[derive(Parser, Debug)]
#[command(name = "rr_model")]
#[command(version, about, long_about = None)]
struct Args {
    /// Time quantum
    #[arg(short = 'q', long, default_value_t = DEFAULT_QUANTUM)]
    quantum: u64,

    /// Scheduling policy: rr or fcfs
    #[arg(long, default_value_t = Policy::RoundRobin)]
    policy: Policy,

    /// Process as ID:ARRIVAL:BURST (repeatable)
    #[arg(short = 'p', long = "process")]
    processes: Vec<ProcessSpec>,

    /// File with one `id,arrival,burst` per line
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Generate a workload over this many ticks instead
    #[arg(long)]
    random: Option<u64>,

    /// Seed for --random. When omitted, a random seed is used.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the per-process table as CSV to this file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print every scheduling event
    #[arg(long)]
    trace: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,rr_model=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: io::Error,
    },

    #[error("{}:{line}: {message}", path.display())]
    Input {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error(transparent)]
    Sim(#[from] SimError),
}

fn run(args: Args) -> Result<(), CliError> {
    let mut specs = args.processes;
    if let Some(path) = &args.input {
        specs.extend(read_specs(path)?);
    }
    if let Some(ticks) = args.random {
        let seed = args.seed.unwrap_or_else(rand::random);
        info!(ticks, seed, "Generating workload");
        specs.extend(bernoulli_jobs(ticks, 0.3, 0.3, 2, 6, seed));
    }

    let config = SimConfig {
        quantum: args.quantum,
        policy: args.policy,
    };
    info!(
        processes = specs.len(),
        quantum = config.quantum,
        policy = %config.policy,
        "Starting simulation"
    );

    let result = match (config.policy, args.trace) {
        (_, false) => rr_model::run(&specs, &config)?,
        (Policy::RoundRobin, true) => {
            let scheduler = RoundRobinScheduler::new(config.quantum).map_err(SimError::from)?;
            traced(Sim::new(specs, scheduler)?)?
        }
        (Policy::Fcfs, true) => traced(Sim::new(specs, FifoScheduler)?)?,
    };

    let stdout = io::stdout();
    print_report(&mut stdout.lock(), &result).map_err(|source| CliError::Io {
        path: PathBuf::from("<stdout>"),
        source,
    })?;

    if let Some(path) = &args.csv {
        let io_err = |source: io::Error| CliError::Io {
            path: path.clone(),
            source,
        };
        let file = fs::File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        export::write_csv(&mut writer, &result.processes).map_err(io_err)?;
        writer.flush().map_err(io_err)?;
        info!(path = %path.display(), "Results exported");
    }

    Ok(())
}

// Step manually so every event can be printed, then collect the result.
fn traced<S: Scheduler>(mut sim: Sim<S>) -> Result<SimulationResult, SimError> {
    while !sim.all_jobs_completed() && sim.core.observer().steps() < sim.step_bound() {
        let now = sim.core.now();
        for event in sim.step()? {
            println!("t={} {}", now, describe(&sim, &event));
        }
    }
    sim.finish()
}

fn describe<S: Scheduler>(sim: &Sim<S>, event: &SchedCoreEvent) -> String {
    let name = |task: usize| sim.jobs()[task].id.as_str();
    match *event {
        SchedCoreEvent::TaskArrived { task, at } => format!("{} arrived at {at}", name(task)),
        SchedCoreEvent::TaskRan { task, start, end } => {
            format!("{} ran [{start}, {end})", name(task))
        }
        SchedCoreEvent::TaskPreempted { task, remaining } => {
            format!("{} preempted, {remaining} left", name(task))
        }
        SchedCoreEvent::TaskCompleted { task, at } => format!("{} completed at {at}", name(task)),
        SchedCoreEvent::CpuIdle { from, to } => format!("IDLE [{from}, {to})"),
    }
}

fn print_report<W: Write>(w: &mut W, result: &SimulationResult) -> io::Result<()> {
    writeln!(w, "Timeline:")?;
    export::write_timeline(&mut *w, &result.timeline)?;

    writeln!(w)?;
    writeln!(
        w,
        "{:<10} {:>7} {:>5} {:>10} {:>10} {:>7}",
        "Process", "Arrival", "Burst", "Completion", "Turnaround", "Waiting"
    )?;
    for p in &result.processes {
        writeln!(
            w,
            "{:<10} {:>7} {:>5} {:>10} {:>10} {:>7}",
            p.id,
            p.arrival_time,
            p.burst_time,
            p.completion_time.unwrap_or_default(),
            p.turnaround_time.unwrap_or_default(),
            p.waiting_time.unwrap_or_default(),
        )?;
    }

    writeln!(w)?;
    writeln!(w, "{}", result.metrics)
}

fn read_specs(path: &Path) -> Result<Vec<ProcessSpec>, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_owned(),
        source,
    })?;
    parse_specs(&text, path)
}

/// One `id,arrival,burst` per line. Blank lines and `#` comments are skipped,
/// as is a header on the first remaining line when its arrival column is not
/// a number.
fn parse_specs(text: &str, path: &Path) -> Result<Vec<ProcessSpec>, CliError> {
    let mut specs = Vec::new();
    let mut first_content = true;
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let header_allowed = std::mem::replace(&mut first_content, false);
        match line.parse::<ProcessSpec>() {
            Ok(spec) => specs.push(spec),
            Err(_) if header_allowed && is_header(line) => continue,
            Err(e) => {
                return Err(CliError::Input {
                    path: path.to_owned(),
                    line: idx + 1,
                    message: e.to_string(),
                });
            }
        }
    }
    Ok(specs)
}

fn is_header(line: &str) -> bool {
    line.split([',', ':'])
        .nth(1)
        .is_some_and(|col| col.trim().parse::<u64>().is_err())
}
