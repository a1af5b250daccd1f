use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};

use sched_model::sim::{
    demo_processes, load_processes, palette_index, process_table, random_processes, Playback,
    ProcessSet,
};
use sched_model::{check, compare, simulate, Policy, Quantum, ScheduleSegment, SimulationResult};

const PALETTE: [&str; 10] = [
    "\x1b[41m", "\x1b[44m", "\x1b[42m", "\x1b[43m", "\x1b[45m", "\x1b[105m", "\x1b[104m",
    "\x1b[46m", "\x1b[101m", "\x1b[106m",
];
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    Fcfs,
    Sjf,
    Priority,
    Rr,
}

/// Simulate classic CPU scheduling policies and print the timeline and
/// per-process metrics.
#[derive(Debug, Parser)]
#[command(name = "sched_model")]
struct Opts {
    /// Scheduling policy.
    #[arg(short, long, value_enum, default_value = "fcfs", env = "SCHED_MODEL_POLICY")]
    policy: PolicyArg,

    /// Round Robin time quantum. Values that are not a positive integer
    /// are treated as 1.
    #[arg(short, long, default_value = "2", env = "SCHED_MODEL_QUANTUM")]
    quantum: String,

    /// JSON file with an array of processes
    /// ({"label", "arrivalTime", "burstTime", "priority"}).
    #[arg(short, long, value_name = "PATH", conflicts_with = "random")]
    workload: Option<PathBuf>,

    /// Generate random processes instead of using the demo set.
    #[arg(short, long)]
    random: bool,

    /// Number of processes to generate with --random.
    #[arg(long, default_value_t = 5)]
    count: usize,

    /// Seed for --random.
    #[arg(long, default_value_t = 0, env = "SCHED_MODEL_SEED")]
    seed: u64,

    /// Run all four policies and print their metrics side by side.
    #[arg(long)]
    compare: bool,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,

    /// Show which process is running at this tick.
    #[arg(long, value_name = "TICK")]
    at: Option<u64>,

    /// Verify timeline and completion invariants after the run.
    #[arg(long)]
    check: bool,

    /// Disable colored Gantt output.
    #[arg(long)]
    no_color: bool,

    /// Enable verbose output. Specify multiple times to increase verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Opts {
    fn policy(&self) -> Policy {
        match self.policy {
            PolicyArg::Fcfs => Policy::Fcfs,
            PolicyArg::Sjf => Policy::Sjf,
            PolicyArg::Priority => Policy::Priority,
            PolicyArg::Rr => Policy::RoundRobin {
                quantum: self.quantum(),
            },
        }
    }

    fn quantum(&self) -> Quantum {
        Quantum::parse(&self.quantum)
    }

    fn processes(&self) -> Result<ProcessSet> {
        if let Some(path) = &self.workload {
            return load_processes(path)
                .with_context(|| format!("Failed to load workload {}", path.display()));
        }
        if self.random {
            return Ok(random_processes(self.count, self.seed));
        }
        Ok(demo_processes())
    }
}

fn init_logging(verbose: u8) -> Result<()> {
    let llv = match verbose {
        0 => simplelog::LevelFilter::Warn,
        1 => simplelog::LevelFilter::Info,
        2 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    let mut lcfg = simplelog::ConfigBuilder::new();
    lcfg.set_time_level(simplelog::LevelFilter::Off)
        .set_location_level(simplelog::LevelFilter::Off)
        .set_target_level(simplelog::LevelFilter::Off)
        .set_thread_level(simplelog::LevelFilter::Off);
    simplelog::TermLogger::init(
        llv,
        lcfg.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;
    Ok(())
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    init_logging(opts.verbose)?;
    info!("Opts: {:?}", opts);

    let uses_quantum = opts.compare || opts.policy == PolicyArg::Rr;
    if uses_quantum && opts.quantum.trim().parse::<u64>().map_or(true, |q| q == 0) {
        warn!("quantum {:?} is not a positive integer, using {}", opts.quantum, opts.quantum());
    }

    let processes = opts.processes()?;
    let processes = processes.as_slice();

    if opts.compare {
        let rows = compare(processes, opts.quantum());
        if opts.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }
        println!(
            "{:<10} {:>10} {:>10} {:>8} {:>8}",
            "policy", "avg wait", "avg tat", "util %", "total"
        );
        for row in rows {
            println!(
                "{:<10} {:>10.2} {:>10.2} {:>8.2} {:>8}",
                row.policy.short_name(),
                row.metrics.avg_waiting_time,
                row.metrics.avg_turnaround_time,
                row.metrics.cpu_utilization_percent,
                row.metrics.total_duration
            );
        }
        return Ok(());
    }

    let policy = opts.policy();
    let result = simulate(processes, policy);

    if opts.check {
        check(&result, processes).context("Simulation broke an invariant")?;
        info!("all invariants hold");
    }

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{policy}");
    print_gantt(&result, !opts.no_color);
    println!();
    print_table(processes, &result);
    println!();
    println!(
        "Avg wait {:.2}  Avg turnaround {:.2}  Utilization {:.2}%  Total {}",
        result.metrics.avg_waiting_time,
        result.metrics.avg_turnaround_time,
        result.metrics.cpu_utilization_percent,
        result.metrics.total_duration
    );

    if let Some(tick) = opts.at {
        let mut playback = Playback::new(&result);
        playback.seek(tick);
        let tick = playback.tick();
        match playback.active(&result) {
            Some(ScheduleSegment::Process { label, start, end, .. }) => {
                println!("t={tick}: {label} running ({start}-{end})")
            }
            Some(ScheduleSegment::Idle { start, end }) => {
                println!("t={tick}: CPU idle ({start}-{end})")
            }
            None => println!("t={tick}: not started"),
        }
    }

    Ok(())
}

fn print_gantt(result: &SimulationResult, color: bool) {
    let mut bar = String::new();
    let mut axis = String::from("0");
    let mut col = 0;

    for segment in &result.schedule {
        let name = segment.label().unwrap_or("idle");
        // Two columns per tick, wide enough for the label
        let width = (segment.duration() as usize * 2).max(name.len() + 2);
        let cell = format!("{name:^width$}");
        match segment.label() {
            Some(label) if color => {
                bar.push_str(PALETTE[palette_index(label, PALETTE.len())]);
                bar.push_str(&cell);
                bar.push_str(RESET);
            }
            _ => bar.push_str(&cell),
        }
        bar.push('|');

        col += width + 1;
        let end = segment.end().to_string();
        if axis.len() < col {
            axis.push_str(&" ".repeat(col - axis.len()));
        } else {
            axis.push(' ');
        }
        axis.push_str(&end);
    }

    println!("|{bar}");
    println!("{axis}");
}

fn print_table(processes: &[sched_model::Process], result: &SimulationResult) {
    println!(
        "{:<8} {:>8} {:>6} {:>9} {:>11} {:>11} {:>8}",
        "process", "arrival", "burst", "priority", "completion", "turnaround", "waiting"
    );
    for row in process_table(processes, result) {
        let p = row.process;
        let (completion, turnaround, waiting) = match row.completion {
            Some(c) => (
                c.completion_time.to_string(),
                c.turnaround_time.to_string(),
                c.waiting_time.to_string(),
            ),
            None => ("-".into(), "-".into(), "-".into()),
        };
        println!(
            "{:<8} {:>8} {:>6} {:>9} {:>11} {:>11} {:>8}",
            p.label(),
            p.arrival_time(),
            p.burst_time(),
            p.priority(),
            completion,
            turnaround,
            waiting
        );
    }
}
