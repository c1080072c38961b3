//! The workflow DAG: task registry, dependency edges and computed times.

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, trace};

use crate::backward_pass::backward_pass;
use crate::forward_pass::forward_pass;
use crate::models::{Task, TaskTiming};

/// Errors that can occur while building or calculating a workflow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// A dependency referenced a task id that was never added.
    #[error("unknown task id: {0}")]
    UnknownTask(String),
    /// The dependency graph has a cycle; the listed tasks were never reached
    /// by the traversal and have no well-defined schedule times.
    #[error("cycle detected in dependency graph, unreachable tasks: {0:?}")]
    CycleDetected(Vec<String>),
}

/// A workflow of tasks with precedence dependencies.
///
/// Built incrementally with [`add_task`](Workflow::add_task) and
/// [`add_dependency`](Workflow::add_dependency), then evaluated as a batch
/// with [`calculate_times`](Workflow::calculate_times). The queries return
/// zeroes until a calculation has succeeded.
#[derive(Debug, Clone, Default)]
pub struct Workflow {
    tasks: FxHashMap<String, Task>,
    /// Forward adjacency: task id -> ids that must start after it finishes.
    successors: FxHashMap<String, Vec<String>>,
    /// Reverse adjacency, maintained incrementally so the backward pass
    /// never has to scan successor lists for predecessors.
    predecessors: FxHashMap<String, Vec<String>>,
    /// Construction-time in-degree counters; the passes work on copies.
    in_degree: FxHashMap<String, usize>,
    timings: FxHashMap<String, TaskTiming>,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task with the given duration. Idempotent by id: the first
    /// definition wins and later duplicates are ignored.
    pub fn add_task(&mut self, id: impl Into<String>, duration: u64) {
        let id = id.into();
        if self.tasks.contains_key(&id) {
            trace!(%id, "duplicate task id, keeping first definition");
            return;
        }
        self.successors.insert(id.clone(), Vec::new());
        self.predecessors.insert(id.clone(), Vec::new());
        self.in_degree.insert(id.clone(), 0);
        self.tasks.insert(id.clone(), Task::new(id, duration));
    }

    /// Add a precedence edge: `from` must finish before `to` can start.
    ///
    /// Fails with [`WorkflowError::UnknownTask`] if either id has not been
    /// added; nothing is mutated in that case.
    pub fn add_dependency(&mut self, from: &str, to: &str) -> Result<(), WorkflowError> {
        if !self.tasks.contains_key(from) {
            return Err(WorkflowError::UnknownTask(from.to_string()));
        }
        if !self.tasks.contains_key(to) {
            return Err(WorkflowError::UnknownTask(to.to_string()));
        }

        if let Some(succs) = self.successors.get_mut(from) {
            succs.push(to.to_string());
        }
        if let Some(preds) = self.predecessors.get_mut(to) {
            preds.push(from.to_string());
        }
        if let Some(count) = self.in_degree.get_mut(to) {
            *count += 1;
        }
        trace!(%from, %to, "dependency added");
        Ok(())
    }

    /// Run the forward and backward passes over the final graph.
    ///
    /// Fails with [`WorkflowError::CycleDetected`] if some tasks can never be
    /// scheduled; the error names the unreachable tasks. On failure any
    /// previously computed times are cleared rather than left stale.
    ///
    /// Idempotent: re-running on an unmodified graph yields identical times.
    pub fn calculate_times(&mut self) -> Result<(), WorkflowError> {
        self.timings.clear();

        let mut timings: FxHashMap<String, TaskTiming> =
            FxHashMap::with_capacity_and_hasher(self.tasks.len(), Default::default());
        let unvisited = forward_pass(&self.tasks, &self.successors, &self.in_degree, &mut timings);
        if !unvisited.is_empty() {
            return Err(WorkflowError::CycleDetected(unvisited));
        }

        let project_finish = timings
            .values()
            .map(|t| t.earliest_finish)
            .max()
            .unwrap_or(0);
        backward_pass(
            &self.tasks,
            &self.successors,
            &self.predecessors,
            project_finish,
            &mut timings,
        );

        debug!(
            tasks = self.tasks.len(),
            project_finish, "schedule times calculated"
        );
        self.timings = timings;
        Ok(())
    }

    /// Earliest time the whole project can complete: the maximum earliest
    /// finish over all tasks. 0 for an empty workflow.
    pub fn earliest_completion_time(&self) -> u64 {
        self.timings
            .values()
            .map(|t| t.earliest_finish)
            .max()
            .unwrap_or(0)
    }

    /// Latest completion time: the minimum latest finish over all tasks.
    /// 0 for an empty workflow.
    pub fn latest_completion_time(&self) -> u64 {
        self.timings
            .values()
            .map(|t| t.latest_finish)
            .min()
            .unwrap_or(0)
    }

    /// Computed times for one task, if a calculation has succeeded.
    pub fn timing(&self, id: &str) -> Option<&TaskTiming> {
        self.timings.get(id)
    }

    /// Ids of zero-slack tasks (sorted). These form the critical path.
    pub fn critical_tasks(&self) -> Vec<&str> {
        let mut critical: Vec<&str> = self
            .timings
            .iter()
            .filter(|(_, timing)| timing.is_critical())
            .map(|(id, _)| id.as_str())
            .collect();
        critical.sort_unstable();
        critical
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn dependency_count(&self) -> usize {
        self.successors.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
