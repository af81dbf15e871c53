//! CLI command implementations for filetmpl.
//!
//! Each module corresponds to a subcommand (`filetmpl <command>`).

pub mod init;
pub mod list;
pub mod params;
pub mod run;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use filetmpl_core::charset::Charset;
use filetmpl_core::config::TmplConfig;
use filetmpl_core::fileset::FileSet;

use crate::output;

/// Overrides for the `options` section of the descriptor.
#[derive(Args, Debug, Default, Clone)]
pub struct OptionArgs {
    /// Bare-name prefix marking a template
    #[arg(long)]
    pub prefix: Option<String>,

    /// Bare-name suffix marking a template
    #[arg(long)]
    pub suffix: Option<String>,

    /// Directory to scan (default: the descriptor's directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Comma-separated include patterns
    #[arg(long)]
    pub include: Option<String>,

    /// Comma-separated exclude patterns, added to the configured ones
    #[arg(long)]
    pub exclude: Option<String>,

    /// Also scan sub-module directories
    #[arg(long)]
    pub aggregate: bool,

    /// Delimiter opening a substitution site
    #[arg(long)]
    pub start_char: Option<char>,

    /// Delimiter closing a substitution site
    #[arg(long)]
    pub end_char: Option<char>,

    /// Text encoding for reading and writing (UTF-8, US-ASCII, ISO-8859-1)
    #[arg(long)]
    pub charset: Option<Charset>,

    /// Set a project property (repeatable): -D db.host=localhost
    #[arg(short = 'D', long = "define", value_name = "KEY=VALUE", value_parser = parse_define)]
    pub defines: Vec<(String, String)>,
}

impl OptionArgs {
    /// Apply these overrides on top of a loaded descriptor.
    pub fn apply(&self, config: &mut TmplConfig) -> Result<()> {
        let options = &mut config.options;
        if let Some(prefix) = &self.prefix {
            options.file_prefix = prefix.clone();
        }
        if let Some(suffix) = &self.suffix {
            options.file_suffix = suffix.clone();
        }
        if self.aggregate {
            options.aggregate = true;
        }
        if let Some(c) = self.start_char {
            options.start_char = c;
        }
        if let Some(c) = self.end_char {
            options.end_char = c;
        }
        if let Some(charset) = self.charset {
            options.charset = charset;
        }

        if self.root.is_some() || self.include.is_some() || self.exclude.is_some() {
            let mut files = config.file_set();
            if let Some(root) = &self.root {
                files.directory = std::path::absolute(root)
                    .with_context(|| format!("cannot resolve root {}", root.display()))?;
            }
            if let Some(include) = &self.include {
                files.includes = FileSet::parse_patterns(include);
            }
            if let Some(exclude) = &self.exclude {
                files.excludes.extend(FileSet::parse_patterns(exclude));
            }
            config.options.files = Some(files);
        }

        for (key, value) in &self.defines {
            config.project.properties.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}

/// Load the descriptor, or fall back to defaults rooted at the current
/// directory when it does not exist, then apply `overrides`.
pub fn load_config(config_path: &Path, overrides: &OptionArgs) -> Result<TmplConfig> {
    let mut config = if config_path.exists() {
        tracing::debug!(path = %config_path.display(), "loading descriptor");
        TmplConfig::load(config_path)?
    } else {
        output::print_warning(&format!(
            "{} not found, using defaults",
            config_path.display()
        ));
        let mut config = TmplConfig::default();
        config.project.basedir =
            std::env::current_dir().context("cannot determine current directory")?;
        config
    };
    overrides.apply(&mut config)?;
    Ok(config)
}

fn parse_define(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

/// Display `path` relative to `root` when possible.
pub fn display_relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_define() {
        assert_eq!(
            parse_define("db.host=localhost").unwrap(),
            ("db.host".to_string(), "localhost".to_string())
        );
        assert_eq!(
            parse_define("url=a=b").unwrap(),
            ("url".to_string(), "a=b".to_string())
        );
        assert!(parse_define("novalue").is_err());
        assert!(parse_define("=x").is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = TmplConfig::default();
        config.project.basedir = PathBuf::from("/work/demo");

        let args = OptionArgs {
            prefix: Some("t_".into()),
            start_char: Some('$'),
            exclude: Some("target/**, build/**".into()),
            aggregate: true,
            defines: vec![("app.port".into(), "8080".into())],
            ..OptionArgs::default()
        };
        args.apply(&mut config).unwrap();

        assert_eq!(config.options.file_prefix, "t_");
        assert_eq!(config.options.file_suffix, "-tmpl");
        assert_eq!(config.options.start_char, '$');
        assert_eq!(config.options.end_char, '±');
        assert!(config.options.aggregate);

        let files = config.options.files.unwrap();
        assert_eq!(files.directory, PathBuf::from("/work/demo"));
        assert_eq!(files.includes, vec!["**/**"]);
        assert_eq!(files.excludes, vec!["target/**", "build/**"]);
        assert_eq!(config.project.properties["app.port"], "8080");
    }

    #[test]
    fn test_load_config_missing_falls_back() {
        let config = load_config(
            Path::new("/tmp/nonexistent_filetmpl/filetmpl.config.json"),
            &OptionArgs::default(),
        )
        .unwrap();
        assert_eq!(config.options.file_suffix, "-tmpl");
        assert!(config.project.basedir.is_absolute());
    }

    #[test]
    fn test_display_relative() {
        assert_eq!(
            display_relative(Path::new("/work"), Path::new("/work/conf/a.yaml")),
            "conf/a.yaml"
        );
    }
}
