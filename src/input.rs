//! Line-oriented input protocol for building a workflow.
//!
//! The format is: a task count, that many `id duration` lines, a dependency
//! count, then that many `fromId toId` lines. Malformed task/dependency lines
//! are reported and skipped without aborting the batch; a malformed count is
//! fatal because the reader cannot resynchronise afterwards.

use std::io::BufRead;

use anyhow::{bail, Context, Result};
use tracing::warn;

use crate::workflow::Workflow;

/// Read a workflow definition from `reader`.
///
/// With `interactive` set, the original console prompts are printed before
/// each section; file input stays prompt-free.
pub fn build_workflow<R: BufRead>(reader: R, interactive: bool) -> Result<Workflow> {
    let mut lines = reader.lines();
    let mut workflow = Workflow::new();

    prompt(interactive, "Enter the number of tasks:");
    let task_count = read_count(&mut lines).context("expected the number of tasks")?;

    prompt(interactive, "Enter tasks (format: id duration):");
    for _ in 0..task_count {
        let Some(line) = next_line(&mut lines)? else {
            warn!("input ended before all task lines were read");
            break;
        };
        add_task_line(&mut workflow, &line);
    }

    prompt(interactive, "Enter the number of dependencies:");
    let dependency_count =
        read_count(&mut lines).context("expected the number of dependencies")?;

    prompt(interactive, "Enter dependencies (format: fromId toId):");
    for _ in 0..dependency_count {
        let Some(line) = next_line(&mut lines)? else {
            warn!("input ended before all dependency lines were read");
            break;
        };
        add_dependency_line(&mut workflow, &line);
    }

    Ok(workflow)
}

fn prompt(interactive: bool, text: &str) {
    if interactive {
        println!("{text}");
    }
}

/// Next non-blank line, or `None` at end of input.
fn next_line<B: BufRead>(lines: &mut std::io::Lines<B>) -> Result<Option<String>> {
    for line in lines {
        let line = line?;
        if !line.trim().is_empty() {
            return Ok(Some(line));
        }
    }
    Ok(None)
}

fn read_count<B: BufRead>(lines: &mut std::io::Lines<B>) -> Result<usize> {
    let Some(line) = next_line(lines)? else {
        bail!("input ended early");
    };
    line.trim()
        .parse::<usize>()
        .with_context(|| format!("invalid count: {line:?}"))
}

fn add_task_line(workflow: &mut Workflow, line: &str) {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [id, duration] = tokens.as_slice() else {
        warn!(%line, "invalid task input, expected format: id duration");
        return;
    };
    match duration.parse::<u64>() {
        Ok(duration) => workflow.add_task(*id, duration),
        Err(_) => warn!(%line, "invalid task duration, expected a non-negative integer"),
    }
}

fn add_dependency_line(workflow: &mut Workflow, line: &str) {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [from, to] = tokens.as_slice() else {
        warn!(%line, "invalid dependency input, expected format: fromId toId");
        return;
    };
    if let Err(err) = workflow.add_dependency(from, to) {
        warn!(%line, error = %err, "skipping dependency");
    }
}
