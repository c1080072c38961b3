//! Core data types for the workflow scheduler.

/// A task in the workflow graph.
#[derive(Clone, Debug)]
pub struct Task {
    pub id: String,
    /// Duration in abstract time units (non-negative).
    pub duration: u64,
}

impl Task {
    pub fn new(id: impl Into<String>, duration: u64) -> Self {
        Self {
            id: id.into(),
            duration,
        }
    }
}

/// Per-task timing information computed by the forward and backward passes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskTiming {
    /// Earliest possible start time (from forward pass).
    pub earliest_start: u64,
    /// Earliest possible finish time (from forward pass).
    pub earliest_finish: u64,
    /// Latest allowable start time (from backward pass).
    pub latest_start: u64,
    /// Latest allowable finish time (from backward pass).
    pub latest_finish: u64,
    /// Slack = latest_start - earliest_start.
    pub slack: u64,
}

impl TaskTiming {
    /// A task is on the critical path iff it has no slack.
    pub fn is_critical(&self) -> bool {
        self.slack == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_timing_critical() {
        let timing = TaskTiming {
            earliest_start: 0,
            earliest_finish: 5,
            latest_start: 0,
            latest_finish: 5,
            slack: 0,
        };
        assert!(timing.is_critical());

        let timing_with_slack = TaskTiming {
            earliest_start: 0,
            earliest_finish: 5,
            latest_start: 2,
            latest_finish: 7,
            slack: 2,
        };
        assert!(!timing_with_slack.is_critical());
    }
}
