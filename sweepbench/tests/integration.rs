//! Integration tests for SweepBench
//!
//! These tests verify the end-to-end behavior of isolated execution, sweeps,
//! and report generation.

use clap::Parser;
use std::sync::Arc;
use std::time::{Duration, Instant};
use sweepbench::{
    Cli, ERR_MARKER, ExecutionOutcome, ExecutorConfig, FailureReason, IsolatedExecutor,
    Strategy, SweepRunner, WorkUnit, parse_json_report, run_with_cli, stack,
};

/// Small stack so recursion trips the guard quickly
const SMALL_STACK: usize = 256 * 1024;

fn small_stack_runner() -> SweepRunner {
    SweepRunner::new(IsolatedExecutor::new(ExecutorConfig {
        stack_size: SMALL_STACK,
        ..ExecutorConfig::default()
    }))
}

fn count_upper(buf: &[u8]) -> usize {
    buf.iter().filter(|b| b.is_ascii_uppercase()).count()
}

/// Recurses `depth` times without any bound of its own
fn recurse(depth: usize) -> usize {
    stack::probe();
    if depth == 0 {
        0
    } else {
        1 + std::hint::black_box(recurse(depth - 1))
    }
}

#[allow(unconditional_recursion)]
fn recurse_forever(depth: usize) -> usize {
    stack::probe();
    1 + std::hint::black_box(recurse_forever(depth + 1))
}

fn bounded_strategy() -> Strategy<Vec<u8>> {
    Strategy::new("bounded", false, |_, input: &Arc<Vec<u8>>| {
        let input = Arc::clone(input);
        WorkUnit::new("bounded", move || count_upper(&input))
    })
}

fn recursive_strategy() -> Strategy<Vec<u8>> {
    Strategy::new("unbounded-recursive", true, |size, _: &Arc<Vec<u8>>| {
        WorkUnit::new("unbounded-recursive", move || recurse(size))
    })
}

fn buffer(size: usize) -> Vec<u8> {
    (0..size).map(|i| if i % 3 == 0 { b'A' } else { b'a' }).collect()
}

/// A bounded unit completes in isolation
#[test]
fn test_bounded_unit_completes_isolated() {
    let executor = IsolatedExecutor::default();
    for n in [0usize, 1, 1000, 100_000] {
        let outcome = executor.run(WorkUnit::new("sum", move || (0..n).sum::<usize>()), true);
        assert!(!outcome.is_failed(), "n={n}");
        assert!(outcome.elapsed_nanos().is_some());
    }
}

/// Unbounded recursion is contained and the caller returns promptly
#[test]
fn test_stack_exhaustion_is_contained() {
    let executor = IsolatedExecutor::new(ExecutorConfig {
        stack_size: SMALL_STACK,
        ..ExecutorConfig::default()
    });

    let start = Instant::now();
    let outcome = executor.run(WorkUnit::new("forever", || recurse_forever(0)), true);

    assert!(matches!(
        outcome.failure_reason(),
        Some(FailureReason::StackExhausted { .. })
    ));
    assert!(start.elapsed() < Duration::from_secs(30));
}

/// Faults other than recursion are contained too
#[test]
fn test_panic_is_contained() {
    let executor = IsolatedExecutor::default();
    let outcome = executor.run(
        WorkUnit::new("index", || {
            let v: Vec<u32> = Vec::new();
            std::hint::black_box(&v)[3]
        }),
        true,
    );

    match outcome.failure_reason() {
        Some(FailureReason::Panicked { message }) => assert!(message.contains("index")),
        other => panic!("expected a contained panic, got {other:?}"),
    }
}

/// Table length and order match the declared sizes and strategies
#[test]
fn test_sweep_shape_and_order() {
    let sizes = [10, 100, 1000, 5000];
    let strategies = vec![bounded_strategy(), recursive_strategy()];

    let table = small_stack_runner()
        .run_sweep(&sizes, &strategies, buffer)
        .unwrap();

    assert_eq!(table.len(), sizes.len() * strategies.len());
    let mut points = table.points().iter();
    for &size in &sizes {
        for strategy in &strategies {
            let point = points.next().unwrap();
            assert_eq!(point.size, size);
            assert_eq!(point.strategy, strategy.name());
        }
    }
}

/// Running the same deterministic unit directly twice gives two completions
#[test]
fn test_direct_runs_are_repeatable() {
    let executor = IsolatedExecutor::default();
    let data = Arc::new(buffer(10_000));

    let outcomes: Vec<ExecutionOutcome> = (0..2)
        .map(|_| {
            let data = Arc::clone(&data);
            executor.run(WorkUnit::new("count", move || count_upper(&data)), false)
        })
        .collect();

    for outcome in outcomes {
        assert!(!outcome.is_failed());
        assert!(outcome.elapsed_nanos().is_some());
    }
}

/// An always-faulting strategy never stops its neighbour from running
#[test]
fn test_failure_isolation_across_sizes() {
    let strategies = vec![
        Strategy::sized("faulty", true, |n| {
            WorkUnit::new("faulty", move || -> usize { panic!("fault at {n}") })
        }),
        Strategy::sized("steady", true, |n| {
            WorkUnit::new("steady", move || (0..n).map(|i| i ^ 7).sum::<usize>())
        }),
    ];

    let table = SweepRunner::default()
        .run_sweep_sized(&[10, 20, 30], &strategies)
        .unwrap();

    assert_eq!(table.len(), 6);
    assert_eq!(table.failure_count("faulty"), 3);
    assert_eq!(table.failure_count("steady"), 0);
    assert_eq!(table.points_for("steady").count(), 3);
}

/// Small sizes pass for both; once recursion fails it keeps failing
#[test]
fn test_bounded_vs_recursive_scenario() {
    let strategies = vec![bounded_strategy(), recursive_strategy()];
    let runner = small_stack_runner();

    let table = runner.run_sweep(&[10, 100], &strategies, buffer).unwrap();
    let first_row = &table.points()[..2];
    assert!(first_row.iter().all(|p| !p.outcome.is_failed()));
    assert!(!table.points()[2].outcome.is_failed());

    let sizes = [10, 1_000, 10_000, 100_000, 1_000_000];
    let table = runner.run_sweep(&sizes, &strategies, buffer).unwrap();

    assert_eq!(table.failure_count("bounded"), 0);
    let recursive: Vec<bool> = table
        .points_for("unbounded-recursive")
        .map(|p| p.outcome.is_failed())
        .collect();
    assert!(recursive.last().copied().unwrap_or(false));
    if let Some(first_failure) = recursive.iter().position(|&f| f) {
        assert!(recursive[first_failure..].iter().all(|&f| f));
    }
}

/// The CLI writes a table, a chart, and a parseable JSON report
#[test]
fn test_cli_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let table_path = dir.path().join("out/results.txt");
    let chart_path = dir.path().join("out/chart.svg");
    let report_path = dir.path().join("report.json");

    let cli = Cli::try_parse_from([
        "sweepbench",
        "--group",
        "capitals",
        "--sizes",
        "10,100",
        "--stack-size",
        "262144",
        "--format",
        "json",
        "--no-progress",
        "--table",
        table_path.to_str().unwrap(),
        "--chart",
        chart_path.to_str().unwrap(),
        "--output",
        report_path.to_str().unwrap(),
    ])
    .unwrap();
    run_with_cli(cli).unwrap();

    let report = parse_json_report(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report.sizes, vec![10, 100]);
    assert_eq!(report.strategies, vec!["iterative", "recursive"]);
    assert_eq!(report.summary.total_points, 4);
    assert_eq!(report.summary.failed, 0);
    assert_eq!(report.meta.seed, Some(42));

    let table = std::fs::read_to_string(&table_path).unwrap();
    assert!(table.contains("iterative (ms)"));
    assert!(!table.lines().any(|l| l.starts_with('|') && l.contains(ERR_MARKER)));

    let chart = std::fs::read_to_string(&chart_path).unwrap();
    assert!(chart.starts_with("<svg"));
    assert_eq!(chart.matches("<circle").count(), 4);
}

/// Exhausted points show up as ERR in the table and are left out of the chart
#[test]
fn test_cli_marks_exhausted_points() {
    let dir = tempfile::tempdir().unwrap();
    let table_path = dir.path().join("results.txt");
    let chart_path = dir.path().join("chart.svg");
    let report_path = dir.path().join("report.csv");

    let cli = Cli::try_parse_from([
        "sweepbench",
        "--group",
        "capitals",
        "--sizes",
        "10,1000000",
        "--stack-size",
        "262144",
        "--format",
        "csv",
        "--no-progress",
        "--table",
        table_path.to_str().unwrap(),
        "--chart",
        chart_path.to_str().unwrap(),
        "--output",
        report_path.to_str().unwrap(),
    ])
    .unwrap();
    run_with_cli(cli).unwrap();

    let csv = std::fs::read_to_string(&report_path).unwrap();
    assert!(csv.contains("1000000,recursive,failed,,,stack-exhausted"));
    assert!(csv.contains("1000000,iterative,passed"));

    let table = std::fs::read_to_string(&table_path).unwrap();
    let big_row = table.lines().find(|l| l.contains("1000000")).unwrap();
    assert!(big_row.contains(ERR_MARKER));

    let chart = std::fs::read_to_string(&chart_path).unwrap();
    assert_eq!(chart.matches("<circle").count(), 3);
    assert!(chart.contains("recursive (1 ERR)"));
}
