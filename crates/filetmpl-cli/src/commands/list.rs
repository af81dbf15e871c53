use std::path::Path;

use anyhow::Result;

use filetmpl_core::matcher::FileMatcher;
use filetmpl_core::reporter::TracingReporter;

use super::{display_relative, load_config, OptionArgs};
use crate::output;

/// Print every discovered template and its output path without rendering.
pub fn run(config_path: &Path, overrides: &OptionArgs) -> Result<()> {
    output::print_header("list");

    let config = load_config(config_path, overrides)?;
    let rule = config.match_rule()?;
    let root = &rule.files.directory;
    output::print_key_value("Root", &root.display().to_string());

    let tasks = FileMatcher::new(&rule, config.options.charset, &TracingReporter).discover()?;
    if tasks.is_empty() {
        output::print_warning("no templates found");
        return Ok(());
    }

    for task in &tasks {
        output::print_mapping(
            &display_relative(root, &task.source),
            &display_relative(root, &task.target),
        );
    }
    output::print_success(&output::templates(tasks.len()));
    Ok(())
}
