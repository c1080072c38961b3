//! Forward pass: earliest start/finish times via Kahn's algorithm.

use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use tracing::debug;

use crate::models::{Task, TaskTiming};

/// Compute earliest start/finish times for every reachable task.
///
/// Fills `timings` with a default entry per task, then propagates earliest
/// times in topological order. A task's earliest start is the running maximum
/// of its predecessors' earliest finishes, so results do not depend on the
/// order in which same-level tasks are dequeued.
///
/// Works on a local copy of the in-degree counters; the construction-time
/// map is left untouched so the calculation can be re-run on an unmodified
/// graph.
///
/// Returns the ids of tasks that never reached in-degree 0 (sorted). A
/// non-empty list means the graph has a cycle and the earliest times of the
/// returned tasks are not meaningful.
pub(crate) fn forward_pass(
    tasks: &FxHashMap<String, Task>,
    successors: &FxHashMap<String, Vec<String>>,
    in_degree: &FxHashMap<String, usize>,
    timings: &mut FxHashMap<String, TaskTiming>,
) -> Vec<String> {
    let mut remaining = in_degree.clone();
    let mut queue: VecDeque<&str> = VecDeque::new();

    for (id, task) in tasks {
        let mut timing = TaskTiming::default();
        let ready = remaining.get(id).copied().unwrap_or(0) == 0;
        if ready {
            // Source task: starts at 0, finishes after its own duration.
            timing.earliest_finish = task.duration;
        }
        timings.insert(id.clone(), timing);
        if ready {
            queue.push_back(id.as_str());
        }
    }

    while let Some(id) = queue.pop_front() {
        let finish = timings.get(id).map(|t| t.earliest_finish).unwrap_or(0);

        let Some(succs) = successors.get(id) else {
            continue;
        };
        for succ in succs {
            let Some(task) = tasks.get(succ) else {
                continue;
            };
            if let Some(timing) = timings.get_mut(succ) {
                if finish > timing.earliest_start {
                    timing.earliest_start = finish;
                }
                timing.earliest_finish = timing.earliest_start + task.duration;
            }
            if let Some(count) = remaining.get_mut(succ) {
                *count -= 1;
                if *count == 0 {
                    queue.push_back(succ.as_str());
                }
            }
        }
    }

    let mut unvisited: Vec<String> = remaining
        .iter()
        .filter(|(_, &count)| count > 0)
        .map(|(id, _)| id.clone())
        .collect();
    unvisited.sort();

    debug!(
        tasks = tasks.len(),
        unvisited = unvisited.len(),
        "forward pass complete"
    );

    unvisited
}

#[cfg(test)]
mod tests {
    use super::*;

    type Graph = (
        FxHashMap<String, Task>,
        FxHashMap<String, Vec<String>>,
        FxHashMap<String, usize>,
    );

    fn graph(task_defs: &[(&str, u64)], edges: &[(&str, &str)]) -> Graph {
        let mut tasks = FxHashMap::default();
        let mut successors: FxHashMap<String, Vec<String>> = FxHashMap::default();
        let mut in_degree: FxHashMap<String, usize> = FxHashMap::default();
        for &(id, duration) in task_defs {
            tasks.insert(id.to_string(), Task::new(id, duration));
            successors.insert(id.to_string(), Vec::new());
            in_degree.insert(id.to_string(), 0);
        }
        for &(from, to) in edges {
            successors.get_mut(from).unwrap().push(to.to_string());
            *in_degree.get_mut(to).unwrap() += 1;
        }
        (tasks, successors, in_degree)
    }

    #[test]
    fn test_chain_earliest_times() {
        let (tasks, successors, in_degree) =
            graph(&[("a", 3), ("b", 2), ("c", 4)], &[("a", "b"), ("b", "c")]);
        let mut timings = FxHashMap::default();
        let unvisited = forward_pass(&tasks, &successors, &in_degree, &mut timings);

        assert!(unvisited.is_empty());
        assert_eq!(timings["a"].earliest_start, 0);
        assert_eq!(timings["a"].earliest_finish, 3);
        assert_eq!(timings["b"].earliest_start, 3);
        assert_eq!(timings["b"].earliest_finish, 5);
        assert_eq!(timings["c"].earliest_start, 5);
        assert_eq!(timings["c"].earliest_finish, 9);
    }

    #[test]
    fn test_diamond_takes_latest_predecessor() {
        // a -> b -> d, a -> c -> d; d cannot start before c finishes at 7.
        let (tasks, successors, in_degree) = graph(
            &[("a", 2), ("b", 3), ("c", 5), ("d", 1)],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        );
        let mut timings = FxHashMap::default();
        let unvisited = forward_pass(&tasks, &successors, &in_degree, &mut timings);

        assert!(unvisited.is_empty());
        assert_eq!(timings["d"].earliest_start, 7);
        assert_eq!(timings["d"].earliest_finish, 8);
    }

    #[test]
    fn test_cycle_reports_unvisited_tasks() {
        let (tasks, successors, in_degree) = graph(
            &[("a", 1), ("b", 2), ("c", 3)],
            &[("a", "b"), ("b", "c"), ("c", "b")],
        );
        let mut timings = FxHashMap::default();
        let unvisited = forward_pass(&tasks, &successors, &in_degree, &mut timings);

        assert_eq!(unvisited, vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_in_degree_map_untouched() {
        let (tasks, successors, in_degree) = graph(&[("a", 1), ("b", 2)], &[("a", "b")]);
        let before = in_degree.clone();
        let mut timings = FxHashMap::default();
        forward_pass(&tasks, &successors, &in_degree, &mut timings);
        assert_eq!(in_degree, before);
    }
}
