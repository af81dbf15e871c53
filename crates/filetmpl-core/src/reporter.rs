//! Progress and failure reporting for discovery and rendering.
//!
//! The matcher and runner never log through ambient state of their own; they are
//! handed a [`Reporter`]. [`TracingReporter`] forwards to `tracing`, whose
//! subscriber is installed by the binary.

use std::path::Path;

use crate::error::TmplError;
use crate::matcher::TemplateTask;

/// Why a scanned file was not turned into a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A path segment starts with `.`.
    Hidden,
    /// The file name is not valid UTF-8, so the naming rule cannot apply.
    NonUtf8Name,
    /// Prefix and suffix overlap inside the bare name.
    Overlap,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hidden => "hidden path",
            Self::NonUtf8Name => "file name is not UTF-8",
            Self::Overlap => "prefix and suffix overlap",
        }
    }
}

/// Receives events from [`FileMatcher`](crate::matcher::FileMatcher) and
/// [`TemplateRunner`](crate::runner::TemplateRunner).
pub trait Reporter {
    fn file_skipped(&self, path: &Path, reason: SkipReason);

    fn task_started(&self, task: &TemplateTask);

    fn task_rendered(&self, task: &TemplateTask, bytes: usize);

    fn task_failed(&self, task: &TemplateTask, error: &TmplError);
}

/// Default reporter: structured `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn file_skipped(&self, path: &Path, reason: SkipReason) {
        tracing::debug!(path = %path.display(), reason = reason.as_str(), "skipped");
    }

    fn task_started(&self, task: &TemplateTask) {
        tracing::info!(
            from = %task.source.display(),
            to = %task.target.display(),
            "rendering template"
        );
    }

    fn task_rendered(&self, task: &TemplateTask, bytes: usize) {
        tracing::debug!(to = %task.target.display(), bytes, "wrote output");
    }

    fn task_failed(&self, task: &TemplateTask, error: &TmplError) {
        tracing::warn!(path = %task.source.display(), "failed: {error}");
        tracing::debug!(path = %task.source.display(), error = ?error, "failure detail");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::path::PathBuf;

    use super::*;

    /// Records every event for assertions.
    #[derive(Default)]
    pub struct RecordingReporter {
        pub skipped: RefCell<Vec<(PathBuf, SkipReason)>>,
        pub started: RefCell<Vec<PathBuf>>,
        pub rendered: RefCell<Vec<PathBuf>>,
        pub failed: RefCell<Vec<(PathBuf, String)>>,
    }

    impl Reporter for RecordingReporter {
        fn file_skipped(&self, path: &Path, reason: SkipReason) {
            self.skipped.borrow_mut().push((path.to_path_buf(), reason));
        }

        fn task_started(&self, task: &TemplateTask) {
            self.started.borrow_mut().push(task.source.clone());
        }

        fn task_rendered(&self, task: &TemplateTask, _bytes: usize) {
            self.rendered.borrow_mut().push(task.target.clone());
        }

        fn task_failed(&self, task: &TemplateTask, error: &TmplError) {
            self.failed
                .borrow_mut()
                .push((task.source.clone(), error.to_string()));
        }
    }
}
