//! Sequential rendering of discovered template tasks.
//!
//! Each task is read, rendered against a scoped copy of the shared parameter
//! model, and written, one at a time. A failing task is reported and skipped;
//! it never stops the tasks after it. Every task sees these extra bindings:
//!
//! - `from_name` / `to_name`: source and output file names
//! - `now_date`: run start as an ISO date (`2024-05-01`)
//! - `now_datetime`: run start as an ISO date-time (`2024-05-01T13:45:10`)
//! - `now`: run start as a timestamp value

use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::error::Result;
use crate::matcher::TemplateTask;
use crate::params::ParameterNode;
use crate::reporter::Reporter;
use crate::templates::Render;

/// A task that could not be completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    pub source: PathBuf,
    pub message: String,
}

/// Outcome of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Outputs written (or, in dry-run mode, rendered).
    pub rendered: Vec<PathBuf>,
    pub failed: Vec<TaskFailure>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Renders [`TemplateTask`]s through a [`Render`] collaborator.
pub struct TemplateRunner<'a> {
    renderer: &'a dyn Render,
    reporter: &'a dyn Reporter,
    started: DateTime<Local>,
    dry_run: bool,
}

impl<'a> TemplateRunner<'a> {
    pub fn new(renderer: &'a dyn Render, reporter: &'a dyn Reporter) -> Self {
        Self {
            renderer,
            reporter,
            started: Local::now(),
            dry_run: false,
        }
    }

    /// Fix the run timestamp instead of taking the current time.
    pub fn with_start_time(mut self, started: DateTime<Local>) -> Self {
        self.started = started;
        self
    }

    /// Render without writing any output.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Process every task in order. Per-task failures are collected, not returned.
    pub fn run(&self, tasks: &[TemplateTask], model: &ParameterNode) -> RunReport {
        let mut report = RunReport::default();

        for task in tasks {
            self.reporter.task_started(task);
            match self.process(task, model) {
                Ok(bytes) => {
                    self.reporter.task_rendered(task, bytes);
                    report.rendered.push(task.target.clone());
                }
                Err(e) => {
                    self.reporter.task_failed(task, &e);
                    report.failed.push(TaskFailure {
                        source: task.source.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        report
    }

    /// Read and render one task without writing it.
    pub fn render_task(&self, task: &TemplateTask, model: &ParameterNode) -> Result<String> {
        let bytes = std::fs::read(&task.source)?;
        let text = task.charset.decode(bytes, &task.source)?;

        let scope = self.task_scope(task, model);
        tracing::trace!(attributes = ?scope.flatten(), "template attributes");
        self.renderer.render(&text, &scope)
    }

    /// Copy of `model` with the task-scoped bindings added.
    pub fn task_scope(&self, task: &TemplateTask, model: &ParameterNode) -> ParameterNode {
        let mut scope = model.clone();
        scope.put("from_name", file_name(&task.source));
        scope.put("to_name", file_name(&task.target));
        scope.put("now_date", self.started.format("%Y-%m-%d").to_string());
        scope.put("now_datetime", self.started.format("%Y-%m-%dT%H:%M:%S").to_string());
        scope.put("now", self.started);
        scope
    }

    fn process(&self, task: &TemplateTask, model: &ParameterNode) -> Result<usize> {
        let content = self.render_task(task, model)?;
        let encoded = task.charset.encode(&content, &task.target)?;
        if !self.dry_run {
            std::fs::write(&task.target, &encoded)?;
        }
        Ok(encoded.len())
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
