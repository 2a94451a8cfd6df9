use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use average::{Estimate, Max, Mean};
use clap::{Args, Parser, Subcommand};
use env_logger::Builder;
use os_model::{
    ReplaceRequest, ReplacementKind, ScheduleRequest, SchedulerKind, SchedulingResult,
    core::{PageId, Ticks},
    replace, schedule,
    sim::Process,
};
use rand::prelude::*;
use serde::Serialize;

/// Simulate CPU scheduling and page replacement policies
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one scheduling policy (FCFS, SJF, Priority, RoundRobin)
    Schedule {
        #[command(flatten)]
        workload: ProcessSource,

        /// Policy name; overrides the request file
        #[arg(short, long)]
        algorithm: Option<String>,

        /// Round-robin time quantum; overrides the request file
        #[arg(short, long)]
        quantum: Option<Ticks>,
    },
    /// Run one page replacement policy (FIFO, Optimal, LRU, LFU)
    Replace {
        #[command(flatten)]
        workload: PageSource,

        /// Policy name; overrides the request file
        #[arg(short, long)]
        algorithm: Option<String>,
    },
    /// Run every policy of a family on the same workload and summarize
    Compare {
        #[command(subcommand)]
        family: Family,
    },
}

#[derive(Subcommand, Debug)]
enum Family {
    Cpu {
        #[command(flatten)]
        workload: ProcessSource,

        /// Round-robin time quantum
        #[arg(short, long, default_value_t = 2)]
        quantum: Ticks,
    },
    Paging {
        #[command(flatten)]
        workload: PageSource,
    },
}

#[derive(Args, Debug)]
struct ProcessSource {
    /// Request JSON: {"algorithm", "processes", "timeQuantum"}
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    input: Option<PathBuf>,

    /// Generate this many ticks of Bernoulli arrivals instead of reading a file
    #[arg(long, default_value_t = 50)]
    ticks: u64,

    /// Per-tick arrival probability
    #[arg(long, default_value_t = 0.3)]
    p_arrival: f64,

    /// Probability that an arriving process is short
    #[arg(long, default_value_t = 0.3)]
    p_short: f64,

    #[arg(long, default_value_t = 2)]
    short_burst: Ticks,

    #[arg(long, default_value_t = 6)]
    long_burst: Ticks,

    /// Priorities are drawn from 0..levels
    #[arg(long, default_value_t = 4)]
    priority_levels: i64,

    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Args, Debug)]
struct PageSource {
    /// Request JSON: {"algorithm", "pages", "size"}
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    input: Option<PathBuf>,

    /// Comma-separated reference string, e.g. 7,0,1,2,0,3
    #[arg(short, long, value_delimiter = ',')]
    pages: Vec<PageId>,

    /// Frame table size; overrides the request file
    #[arg(short, long)]
    frames: Option<usize>,

    /// Length of a generated reference string when no pages are given
    #[arg(long, default_value_t = 30)]
    length: usize,

    /// Distinct pages in a generated reference string
    #[arg(long, default_value_t = 8)]
    distinct: PageId,

    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> Result<()> {
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    match Cli::parse().command {
        Command::Schedule {
            workload,
            algorithm,
            quantum,
        } => {
            let mut request = workload.load()?;
            if let Some(algorithm) = algorithm {
                request.algorithm = algorithm;
            }
            if quantum.is_some() {
                request.time_quantum = quantum;
            }
            let result = request
                .run()
                .with_context(|| format!("scheduling with {:?} failed", request.algorithm))?;
            print_json(&result)
        }
        Command::Replace {
            workload,
            algorithm,
        } => {
            let mut request = workload.load()?;
            if let Some(algorithm) = algorithm {
                request.algorithm = algorithm;
            }
            let result = request
                .run()
                .with_context(|| format!("replacement with {:?} failed", request.algorithm))?;
            print_json(&result)
        }
        Command::Compare {
            family: Family::Cpu { workload, quantum },
        } => compare_cpu(&workload.load()?.processes, quantum),
        Command::Compare {
            family: Family::Paging { workload },
        } => {
            let request = workload.load()?;
            compare_paging(&request.pages, request.size)
        }
    }
}

impl ProcessSource {
    fn load(&self) -> Result<ScheduleRequest> {
        if let Some(path) = &self.input {
            return read_json(path);
        }
        Ok(ScheduleRequest {
            algorithm: SchedulerKind::Fcfs.to_string(),
            processes: self.bernoulli_processes(),
            time_quantum: None,
        })
    }

    fn bernoulli_processes(&self) -> Vec<Process> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut processes = Vec::new();

        for t in 0..self.ticks {
            if rng.random::<f64>() < self.p_arrival {
                let burst_time = if rng.random::<f64>() < self.p_short {
                    self.short_burst
                } else {
                    self.long_burst
                };

                processes.push(Process {
                    id: processes.len() as u64 + 1,
                    arrival_time: t,
                    burst_time,
                    priority: rng.random_range(0..self.priority_levels.max(1)),
                });
            }
        }

        processes
    }
}

impl PageSource {
    fn load(&self) -> Result<ReplaceRequest> {
        let mut request = match &self.input {
            Some(path) => read_json(path)?,
            None => ReplaceRequest {
                algorithm: ReplacementKind::Fifo.to_string(),
                pages: if self.pages.is_empty() {
                    self.random_references()
                } else {
                    self.pages.clone()
                },
                size: 3,
            },
        };
        if let Some(frames) = self.frames {
            request.size = frames;
        }
        Ok(request)
    }

    fn random_references(&self) -> Vec<PageId> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        (0..self.length)
            .map(|_| rng.random_range(0..self.distinct.max(1)))
            .collect()
    }
}

fn compare_cpu(processes: &[Process], quantum: Ticks) -> Result<()> {
    if processes.is_empty() {
        bail!("workload has no processes; raise --ticks or --p-arrival");
    }
    println!("{} processes, quantum {}", processes.len(), quantum);
    println!(
        "{:<12} {:>10} {:>12} {:>10} {:>12} {:>8}",
        "policy", "waiting", "turnaround", "response", "max waiting", "slices"
    );

    for kind in SchedulerKind::ALL {
        let result = schedule(kind, processes, Some(quantum))?;
        let response = avg(result.process_stats.iter().map(|s| s.response_time as f64));
        println!(
            "{:<12} {:>10.2} {:>12.2} {:>10.2} {:>12} {:>8}",
            kind.name(),
            result.average_waiting_time,
            result.average_turnaround_time,
            response,
            longest_wait(&result),
            result.gantt_chart.len()
        );
    }
    Ok(())
}

fn compare_paging(pages: &[PageId], frames: usize) -> Result<()> {
    println!("{} references, {} frames", pages.len(), frames);
    println!(
        "{:<10} {:>8} {:>8} {:>12}",
        "policy", "faults", "hits", "fault ratio"
    );

    for kind in ReplacementKind::ALL {
        let result = replace(kind, pages, frames)?;
        let ratio = if pages.is_empty() {
            0.0
        } else {
            result.total_page_faults as f64 / pages.len() as f64
        };
        println!(
            "{:<10} {:>8} {:>8} {:>12.3}",
            kind.name(),
            result.total_page_faults,
            result.total_page_hits,
            ratio
        );
    }
    Ok(())
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().estimate()
}

// Longest starvation
fn longest_wait(result: &SchedulingResult) -> f64 {
    let mut max = Max::new();
    for stats in &result.process_stats {
        max.add(stats.waiting_time as f64);
    }
    max.max()
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
