//! Backward pass: latest start/finish times via reverse topological propagation.

use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use tracing::debug;

use crate::models::{Task, TaskTiming};

/// Compute latest start/finish times and slack for every task.
///
/// Seeds every task with `latest_finish = project_finish` (no task is on the
/// critical tail until a successor proves otherwise), then propagates from
/// the graph's sinks backward through the predecessor index: a predecessor
/// must finish no later than the earliest-starting successor that depends on
/// it, reconciled by minimum over all successors.
///
/// Uses a dedicated successors-remaining counter computed fresh from the
/// successor lists. The forward pass's in-degree counter must not be reused
/// here; it counts the wrong direction and has already been consumed.
///
/// Must only be called after a cycle-free forward pass has populated
/// `timings`, so every task is reachable and `latest_finish >=
/// earliest_finish >= duration` holds throughout.
pub(crate) fn backward_pass(
    tasks: &FxHashMap<String, Task>,
    successors: &FxHashMap<String, Vec<String>>,
    predecessors: &FxHashMap<String, Vec<String>>,
    project_finish: u64,
    timings: &mut FxHashMap<String, TaskTiming>,
) {
    let mut remaining: FxHashMap<&str, usize> =
        FxHashMap::with_capacity_and_hasher(tasks.len(), Default::default());
    let mut queue: VecDeque<&str> = VecDeque::new();

    for (id, task) in tasks {
        if let Some(timing) = timings.get_mut(id) {
            timing.latest_finish = project_finish;
            timing.latest_start = project_finish - task.duration;
        }
        let successor_count = successors.get(id).map_or(0, Vec::len);
        remaining.insert(id.as_str(), successor_count);
        if successor_count == 0 {
            queue.push_back(id.as_str());
        }
    }

    while let Some(id) = queue.pop_front() {
        let start = timings.get(id).map(|t| t.latest_start).unwrap_or(0);

        let Some(preds) = predecessors.get(id) else {
            continue;
        };
        for pred in preds {
            let Some(task) = tasks.get(pred) else {
                continue;
            };
            if let Some(timing) = timings.get_mut(pred) {
                if start < timing.latest_finish {
                    timing.latest_finish = start;
                }
                timing.latest_start = timing.latest_finish - task.duration;
            }
            if let Some(count) = remaining.get_mut(pred.as_str()) {
                *count -= 1;
                if *count == 0 {
                    queue.push_back(pred.as_str());
                }
            }
        }
    }

    for timing in timings.values_mut() {
        timing.slack = timing.latest_start - timing.earliest_start;
    }

    debug!(project_finish, "backward pass complete");
}
