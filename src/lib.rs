//! Critical Path Method (CPM) workflow scheduling.
//!
//! Builds a DAG of tasks with durations and precedence dependencies, then
//! computes earliest/latest start and finish times with a forward and a
//! backward topological pass. Zero-slack tasks form the critical path.

pub mod cli;
pub mod input;
pub mod logging;

mod backward_pass;
mod forward_pass;
mod models;
mod workflow;

use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use tracing::info;

pub use models::{Task, TaskTiming};
pub use workflow::{Workflow, WorkflowError};

use crate::cli::CliArgs;

/// High-level entry point used by `main.rs`.
pub fn run(args: CliArgs) -> Result<()> {
    let mut workflow = match &args.input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("failed to open {path}"))?;
            input::build_workflow(BufReader::new(file), false)?
        }
        None => {
            let stdin = std::io::stdin();
            input::build_workflow(stdin.lock(), true)?
        }
    };

    info!(
        tasks = workflow.task_count(),
        dependencies = workflow.dependency_count(),
        "workflow built"
    );

    workflow.calculate_times()?;

    println!(
        "Earliest time all tasks will be completed: {}",
        workflow.earliest_completion_time()
    );
    println!(
        "Latest time all tasks will be completed: {}",
        workflow.latest_completion_time()
    );

    if args.schedule {
        print_schedule(&workflow);
    }

    Ok(())
}

/// Per-task schedule table, critical tasks marked with `*`.
fn print_schedule(workflow: &Workflow) {
    println!();
    println!(
        "{:<12} {:>8} {:>6} {:>6} {:>6} {:>6} {:>6}",
        "task", "duration", "est", "eft", "lst", "lft", "slack"
    );
    let mut tasks: Vec<&Task> = workflow.tasks().collect();
    tasks.sort_by(|a, b| a.id.cmp(&b.id));
    for task in tasks {
        if let Some(t) = workflow.timing(&task.id) {
            let marker = if t.is_critical() { " *" } else { "" };
            println!(
                "{:<12} {:>8} {:>6} {:>6} {:>6} {:>6} {:>6}{marker}",
                task.id,
                task.duration,
                t.earliest_start,
                t.earliest_finish,
                t.latest_start,
                t.latest_finish,
                t.slack
            );
        }
    }
    println!();
    println!("critical tasks: {}", workflow.critical_tasks().join(", "));
}
