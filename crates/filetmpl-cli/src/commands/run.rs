use std::path::Path;

use anyhow::Result;

use filetmpl_core::matcher::FileMatcher;
use filetmpl_core::reporter::TracingReporter;
use filetmpl_core::runner::TemplateRunner;
use filetmpl_core::templates::TemplateRenderer;

use super::{display_relative, load_config, OptionArgs};
use crate::output;

/// Discover and render every template under the configured root.
///
/// Fatal errors (bad descriptor, missing root, invalid pattern) abort before
/// any file is touched. Per-template failures are reported and, unless
/// `fail_on_error` is set, do not affect the exit status.
pub fn run(
    config_path: &Path,
    overrides: &OptionArgs,
    dry_run: bool,
    fail_on_error: bool,
) -> Result<()> {
    output::print_header("run");

    let config = load_config(config_path, overrides)?;
    let rule = config.match_rule()?;
    let root = rule.files.directory.clone();

    output::print_key_value("Project", config.project.display_name());
    output::print_key_value("Root", &root.display().to_string());
    output::print_key_value(
        "Naming",
        &output::naming_pattern(&rule.file_prefix, &rule.file_suffix),
    );
    output::print_key_value("Charset", config.options.charset.as_str());

    output::print_step(1, 3, "Building parameters");
    let model = config.project.parameters();

    output::print_step(2, 3, "Discovering templates");
    let reporter = TracingReporter;
    let tasks = FileMatcher::new(&rule, config.options.charset, &reporter).discover()?;
    tracing::debug!(count = tasks.len(), root = %root.display(), "discovered templates");

    let verb = if dry_run { "Rendering (dry run)" } else { "Rendering" };
    output::print_step(3, 3, &format!("{verb} {}", output::templates(tasks.len())));
    let renderer =
        TemplateRenderer::with_delimiters(config.options.start_char, config.options.end_char);
    let report = TemplateRunner::new(&renderer, &reporter)
        .dry_run(dry_run)
        .run(&tasks, &model);

    for target in &report.rendered {
        output::print_success(&display_relative(&root, target));
    }
    for failure in &report.failed {
        output::print_failed(&display_relative(&root, &failure.source), &failure.message);
    }

    if report.failed.is_empty() {
        output::print_success(&format!("{} rendered", output::templates(report.rendered.len())));
    } else {
        output::print_warning(&format!(
            "{} rendered, {} failed",
            report.rendered.len(),
            report.failed.len()
        ));
        if fail_on_error {
            anyhow::bail!("{} failed", output::templates(report.failed.len()));
        }
    }

    Ok(())
}
