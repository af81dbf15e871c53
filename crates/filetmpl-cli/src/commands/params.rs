use std::path::Path;

use anyhow::Result;

use super::{load_config, OptionArgs};
use crate::output;

/// Print the flattened parameter model shared by all templates.
///
/// Per-file bindings (`from_name`, `to_name`, `now_*`) are added at render
/// time and are not shown.
pub fn run(config_path: &Path, overrides: &OptionArgs) -> Result<()> {
    output::print_header("params");

    let config = load_config(config_path, overrides)?;
    let model = config.project.parameters();

    for (key, value) in model.flatten() {
        output::print_key_value(&key, &value);
    }
    println!();
    output::print_key_value("Per-file", "from_name, to_name, now_date, now_datetime, now");
    Ok(())
}
