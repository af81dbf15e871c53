use std::path::Path;

use anyhow::{Context, Result};

use filetmpl_core::config::{TmplConfig, CONFIG_FILE};

use crate::output;

/// Write a starter descriptor into `dir`.
///
/// The artifact id defaults to the directory name. Fails if a descriptor
/// already exists so an edited one is never clobbered.
pub fn run(dir: Option<&Path>, artifact_id: Option<&str>) -> Result<()> {
    let project_dir = match dir {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    output::print_header("init");
    output::print_key_value("Directory", &project_dir.display().to_string());

    output::print_step(1, 2, "Preparing project directory");
    std::fs::create_dir_all(&project_dir)
        .with_context(|| format!("cannot create {}", project_dir.display()))?;

    let artifact_id = match artifact_id {
        Some(id) => id.to_string(),
        None => std::path::absolute(&project_dir)?
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_string()),
    };

    output::print_step(2, 2, &format!("Writing {CONFIG_FILE}"));
    let config_path = project_dir.join(CONFIG_FILE);
    TmplConfig::default_for_project(&artifact_id).create(&config_path)?;

    output::print_success(&format!("Created {}", config_path.display()));
    println!();
    println!("  Next steps:");
    println!("    add templates such as app-tmpl.yaml using ±project_version±");
    println!("    filetmpl list");
    println!("    filetmpl run");
    println!();

    Ok(())
}
