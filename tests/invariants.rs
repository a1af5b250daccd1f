// Randomized sweeps over seeded workloads. Every case is reproducible
// from its seed.

use rand::prelude::*;

use sched_model::sim::random_processes;
use sched_model::{check, simulate, Policy, Process, ProcessId, Quantum, ScheduleSegment};

const SEEDS: u64 = 200;

fn workload(seed: u64) -> Vec<Process> {
    let count = (seed % 12) as usize;
    random_processes(count, seed).as_slice().to_vec()
}

// Wider arrival spread than the generator, so runs contain idle gaps
fn sparse_workload(seed: u64) -> Vec<Process> {
    let mut rng = StdRng::seed_from_u64(seed);
    (1..=rng.random_range(1..10u64))
        .map(|i| {
            Process::new(
                ProcessId(i),
                format!("P{i}"),
                rng.random_range(0..40),
                rng.random_range(1..6),
                rng.random_range(-3..3),
            )
            .unwrap()
        })
        .collect()
}

fn policies() -> Vec<Policy> {
    let mut all = vec![Policy::Fcfs, Policy::Sjf, Policy::Priority];
    all.extend((1..=5).map(|q| Policy::RoundRobin {
        quantum: Quantum::normalize(q),
    }));
    all
}

#[test]
fn every_policy_satisfies_the_invariants() {
    for seed in 0..SEEDS {
        for processes in [workload(seed), sparse_workload(seed)] {
            for policy in policies() {
                let result = simulate(&processes, policy);
                if let Err(violation) = check(&result, &processes) {
                    panic!("seed {seed} {policy}: {violation}");
                }

                let summed: u64 = result.schedule.iter().map(ScheduleSegment::duration).sum();
                assert_eq!(summed, result.total_duration());
                assert_eq!(result.completed.len(), processes.len());

                for record in &result.completed {
                    assert!(record.completion_time > record.arrival_time);
                    assert_eq!(
                        record.turnaround_time,
                        record.waiting_time + record.burst_time
                    );
                }
            }
        }
    }
}

#[test]
fn non_preemptive_policies_run_each_process_once() {
    for seed in 0..SEEDS {
        let processes = sparse_workload(seed);
        for policy in [Policy::Fcfs, Policy::Sjf, Policy::Priority] {
            let result = simulate(&processes, policy);
            for p in &processes {
                let segments: Vec<_> = result.segments_of(p.id()).collect();
                assert_eq!(segments.len(), 1, "seed {seed} {policy} {}", p.label());
                assert_eq!(segments[0].duration(), p.burst_time());
                assert!(segments[0].start() >= p.arrival_time());
            }
        }
    }
}

#[test]
fn round_robin_slices_respect_quantum() {
    for seed in 0..SEEDS {
        let processes = sparse_workload(seed);
        for q in 1..=4 {
            let result = simulate(
                &processes,
                Policy::RoundRobin {
                    quantum: Quantum::normalize(q),
                },
            );
            for segment in result.schedule.iter().filter(|s| !s.is_idle()) {
                assert!(segment.duration() <= q as u64, "seed {seed} q={q}");
            }
            for p in &processes {
                let ran: u64 = result.segments_of(p.id()).map(ScheduleSegment::duration).sum();
                assert_eq!(ran, p.burst_time(), "seed {seed} q={q}");
            }
        }
    }
}

#[test]
fn fcfs_ignores_input_order_when_arrivals_are_distinct() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let processes: Vec<Process> = (0..8u64)
            .map(|i| {
                Process::new(
                    ProcessId(i),
                    format!("P{i}"),
                    (i * 3) as i64,
                    rng.random_range(1..7),
                    0,
                )
                .unwrap()
            })
            .collect();

        let mut shuffled = processes.clone();
        shuffled.shuffle(&mut rng);

        let a = simulate(&processes, Policy::Fcfs);
        let b = simulate(&shuffled, Policy::Fcfs);
        assert_eq!(a.schedule, b.schedule, "seed {seed}");
        assert_eq!(a.metrics, b.metrics, "seed {seed}");
    }
}

#[test]
fn runs_are_deterministic() {
    for seed in 0..SEEDS / 4 {
        let processes = workload(seed);
        for policy in policies() {
            assert_eq!(
                simulate(&processes, policy),
                simulate(&processes, policy),
                "seed {seed} {policy}"
            );
        }
    }
}
