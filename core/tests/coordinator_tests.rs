use std::collections::HashMap;
use std::sync::Arc;

use linereduce_core::{Coordinator, EngineError, Mapper, Reducer, Task};

fn lines_source(lines: &[&str]) -> Vec<Result<Task, EngineError>> {
    lines
        .iter()
        .enumerate()
        .map(|(index, payload)| {
            Ok(Task {
                index,
                payload: payload.to_string(),
            })
        })
        .collect()
}

/// Emits (word, 1) per whitespace-separated word, lowercased.
struct WordSplit;

impl Mapper for WordSplit {
    fn map(&self, input: &str) -> Vec<(String, i64)> {
        input
            .split_whitespace()
            .map(|w| (w.to_lowercase(), 1))
            .collect()
    }
}

/// Commutative/associative summation.
struct Sum;

impl Reducer for Sum {
    fn reduce(&self, _key: &str, values: &[i64]) -> i64 {
        values.iter().sum()
    }
}

// ============================================================
// Core correctness
// ============================================================

#[tokio::test]
async fn test_word_count_scenario_with_two_workers() {
    let source = lines_source(&["the cat sat", "the dog sat"]);
    let result = Coordinator::new(2)
        .run(source, Arc::new(WordSplit), &Sum)
        .await
        .expect("run should terminate");

    let expected: HashMap<String, i64> = [("the", 2), ("cat", 1), ("sat", 2), ("dog", 1)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    assert_eq!(result, expected);
}

#[tokio::test]
async fn test_result_contains_exactly_the_emitted_keys() {
    let source = lines_source(&["alpha beta", "beta gamma", "gamma delta"]);
    let result = Coordinator::new(3)
        .run(source, Arc::new(WordSplit), &Sum)
        .await
        .unwrap();

    let mut keys: Vec<&str> = result.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["alpha", "beta", "delta", "gamma"]);
}

#[tokio::test]
async fn test_parallel_run_matches_sequential_fold() {
    let lines: Vec<String> = (0..50)
        .map(|i| format!("w{} w{} shared tail{}", i % 7, i % 3, i % 5))
        .collect();
    let line_refs: Vec<&str> = lines.iter().map(String::as_str).collect();

    // Reference result computed with a plain sequential fold.
    let mut sequential: HashMap<String, Vec<i64>> = HashMap::new();
    for line in &line_refs {
        for (k, v) in WordSplit.map(line) {
            sequential.entry(k).or_default().push(v);
        }
    }
    let expected: HashMap<String, i64> = sequential
        .iter()
        .map(|(k, vs)| (k.clone(), Sum.reduce(k, vs)))
        .collect();

    let result = Coordinator::new(4)
        .run(lines_source(&line_refs), Arc::new(WordSplit), &Sum)
        .await
        .unwrap();
    assert_eq!(result, expected);
}

// ============================================================
// Boundary conditions
// ============================================================

#[tokio::test]
async fn test_empty_input_terminates_with_empty_result() {
    let result = Coordinator::new(4)
        .run(Vec::new(), Arc::new(WordSplit), &Sum)
        .await
        .unwrap();
    assert!(result.is_empty(), "no tasks must mean no keys");
}

#[tokio::test]
async fn test_single_worker_matches_larger_pools() {
    let lines: Vec<String> = (0..30).map(|i| format!("a b{} c{}", i % 4, i % 9)).collect();
    let line_refs: Vec<&str> = lines.iter().map(String::as_str).collect();

    let baseline = Coordinator::new(1)
        .run(lines_source(&line_refs), Arc::new(WordSplit), &Sum)
        .await
        .unwrap();
    for pool_size in [2, 3, 8] {
        let result = Coordinator::new(pool_size)
            .run(lines_source(&line_refs), Arc::new(WordSplit), &Sum)
            .await
            .unwrap();
        assert_eq!(result, baseline, "pool size {pool_size} diverged from N=1");
    }
}

#[tokio::test]
async fn test_pool_larger_than_task_count() {
    let source = lines_source(&["only two", "tasks here"]);
    let result = Coordinator::new(16)
        .run(source, Arc::new(WordSplit), &Sum)
        .await
        .unwrap();
    assert_eq!(result["only"], 1);
    assert_eq!(result["tasks"], 1);
}

#[tokio::test]
async fn test_repeat_runs_are_deterministic() {
    let lines: Vec<String> = (0..40).map(|i| format!("x{} y{} z", i % 6, i % 11)).collect();
    let line_refs: Vec<&str> = lines.iter().map(String::as_str).collect();

    let first = Coordinator::new(3)
        .run(lines_source(&line_refs), Arc::new(WordSplit), &Sum)
        .await
        .unwrap();
    for _ in 0..5 {
        let again = Coordinator::new(3)
            .run(lines_source(&line_refs), Arc::new(WordSplit), &Sum)
            .await
            .unwrap();
        assert_eq!(again, first, "interleaving must not affect the result");
    }
}

// ============================================================
// Emission edge cases
// ============================================================

#[tokio::test]
async fn test_zero_emission_tasks_add_no_keys() {
    let mapper = Arc::new(|input: &str| {
        if input.contains("skip") {
            Vec::new()
        } else {
            vec![(input.to_string(), 1)]
        }
    });
    let source = lines_source(&["skip me", "keep", "skip too"]);
    let result = Coordinator::new(2).run(source, mapper, &Sum).await.unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result["keep"], 1);
}

#[tokio::test]
async fn test_all_tasks_emit_nothing() {
    let mapper = Arc::new(|_: &str| Vec::<(String, i64)>::new());
    let source = lines_source(&["a", "b", "c", "d"]);
    let result = Coordinator::new(2).run(source, mapper, &Sum).await.unwrap();
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_shared_key_collects_every_contribution() {
    // Every task emits the same key; a value-counting reducer then proves
    // that no contribution was lost before reduce ran.
    let mapper = Arc::new(|_: &str| vec![("shared".to_string(), 1)]);
    let count_values = |_: &str, values: &[i64]| values.len() as i64;

    let lines: Vec<String> = (0..25).map(|i| format!("line {i}")).collect();
    let line_refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let result = Coordinator::new(5)
        .run(lines_source(&line_refs), mapper, &count_values)
        .await
        .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result["shared"], 25, "every task must contribute one value");
}

#[tokio::test]
async fn test_reducer_sees_full_value_sequence_per_key() {
    // Each task emits its own index under one key; the reducer folds them
    // into a sum that only comes out right if all values arrived.
    let mapper = Arc::new(|input: &str| {
        let n: i64 = input.parse().unwrap();
        vec![("total".to_string(), n)]
    });
    let lines: Vec<String> = (1..=10).map(|i| i.to_string()).collect();
    let line_refs: Vec<&str> = lines.iter().map(String::as_str).collect();

    let result = Coordinator::new(4)
        .run(lines_source(&line_refs), mapper, &Sum)
        .await
        .unwrap();
    assert_eq!(result["total"], 55);
}
