//! Project descriptor (`filetmpl.config.json`) loading and saving.
//!
//! The descriptor has two sections, both optional:
//!
//! ```json
//! {
//!   "project": { "groupId": "org.example", "artifactId": "demo", "version": "1.0.0",
//!                "modules": ["api"], "properties": { "db.host": "localhost" } },
//!   "options": { "fileSuffix": "-tmpl", "aggregate": false, "charset": "UTF-8" }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::charset::Charset;
use crate::error::{Result, TmplError};
use crate::fileset::FileSet;
use crate::matcher::{MatchRule, DEFAULT_SUFFIX};
use crate::project::ProjectMetadata;
use crate::templates::DEFAULT_DELIMITER;

/// Default descriptor file name.
pub const CONFIG_FILE: &str = "filetmpl.config.json";

/// Settings that control discovery and rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateOptions {
    pub file_prefix: String,
    pub file_suffix: String,
    /// Scan root and patterns. Defaults to the whole base directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<FileSet>,
    pub aggregate: bool,
    pub start_char: char,
    pub end_char: char,
    pub charset: Charset,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            file_prefix: String::new(),
            file_suffix: DEFAULT_SUFFIX.to_string(),
            files: None,
            aggregate: false,
            start_char: DEFAULT_DELIMITER,
            end_char: DEFAULT_DELIMITER,
            charset: Charset::default(),
        }
    }
}

/// The whole descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TmplConfig {
    pub project: ProjectMetadata,
    pub options: TemplateOptions,
}

impl TmplConfig {
    /// A starter descriptor for a new project.
    pub fn default_for_project(artifact_id: &str) -> Self {
        Self {
            project: ProjectMetadata {
                artifact_id: artifact_id.to_string(),
                version: "0.1.0".to_string(),
                ..ProjectMetadata::default()
            },
            options: TemplateOptions::default(),
        }
    }

    /// Load a descriptor. The base directory becomes the descriptor's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| TmplError::ConfigNotFound {
                path: path.to_path_buf(),
                source,
            })?;
        let mut config: Self =
            serde_json::from_str(&contents).map_err(|source| TmplError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.project.basedir = base_dir_of(path);
        Ok(config)
    }

    /// Write the descriptor as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).map_err(|source| TmplError::ConfigSerialize {
                path: path.to_path_buf(),
                source,
            })?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Write a new descriptor, refusing to overwrite an existing one.
    pub fn create(&self, path: &Path) -> Result<()> {
        if path.exists() {
            return Err(TmplError::ConfigExists(path.to_path_buf()));
        }
        self.save(path)
    }

    /// The file set to scan, with a relative root resolved against the base directory.
    pub fn file_set(&self) -> FileSet {
        match &self.options.files {
            Some(files) => {
                let mut files = files.clone();
                if files.directory.is_relative() {
                    files.directory = self.project.basedir.join(&files.directory);
                }
                files
            }
            None => FileSet::new(self.project.basedir.clone()),
        }
    }

    /// Build the match rule from options and project modules.
    pub fn match_rule(&self) -> Result<MatchRule> {
        let files = self.file_set();
        if files.directory.as_os_str().is_empty() {
            return Err(TmplError::InvalidConfig("files.directory is empty".into()));
        }
        Ok(MatchRule {
            file_prefix: self.options.file_prefix.clone(),
            file_suffix: self.options.file_suffix.clone(),
            files,
            aggregate: self.options.aggregate,
            modules: self.project.modules.clone(),
        })
    }
}

fn base_dir_of(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::path::absolute(&parent).unwrap_or(parent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = TemplateOptions::default();
        assert_eq!(options.file_prefix, "");
        assert_eq!(options.file_suffix, "-tmpl");
        assert_eq!(options.start_char, '±');
        assert_eq!(options.end_char, '±');
        assert_eq!(options.charset, Charset::Utf8);
        assert!(!options.aggregate);
    }

    #[test]
    fn test_load_sets_basedir_and_resolves_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            r#"{
                "project": { "artifactId": "demo", "modules": ["api"] },
                "options": {
                    "filePrefix": "t_",
                    "startChar": "$",
                    "charset": "latin1",
                    "files": { "directory": "conf", "excludes": ["old/**"] }
                }
            }"#,
        )
        .unwrap();

        let config = TmplConfig::load(&path).unwrap();
        assert_eq!(config.project.basedir, dir.path());
        assert_eq!(config.options.start_char, '$');
        assert_eq!(config.options.end_char, '±');
        assert_eq!(config.options.charset, Charset::Latin1);

        let rule = config.match_rule().unwrap();
        assert_eq!(rule.file_prefix, "t_");
        assert_eq!(rule.file_suffix, "-tmpl");
        assert_eq!(rule.files.directory, dir.path().join("conf"));
        assert_eq!(rule.files.includes, vec!["**/**"]);
        assert_eq!(rule.modules, vec!["api"]);
    }

    #[test]
    fn test_default_file_set_is_basedir() {
        let mut config = TmplConfig::default();
        config.project.basedir = PathBuf::from("/work/demo");
        assert_eq!(config.file_set(), FileSet::new("/work/demo"));
    }

    #[test]
    fn test_load_missing() {
        let result = TmplConfig::load(Path::new("/tmp/nonexistent_filetmpl/filetmpl.config.json"));
        assert!(matches!(result, Err(TmplError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            TmplConfig::load(&path),
            Err(TmplError::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_unknown_charset_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "options": { "charset": "EBCDIC" } }"#).unwrap();
        assert!(TmplConfig::load(&path).is_err());
    }

    #[test]
    fn test_create_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let config = TmplConfig::default_for_project("demo");
        config.create(&path).unwrap();
        assert!(matches!(
            config.create(&path),
            Err(TmplError::ConfigExists(_))
        ));

        let loaded = TmplConfig::load(&path).unwrap();
        assert_eq!(loaded.project.artifact_id, "demo");
        assert_eq!(loaded.options, config.options);
    }

    #[test]
    fn test_serialize_error_message() {
        let source = serde_json::from_str::<u8>("\"x\"").unwrap_err();
        let err = TmplError::ConfigSerialize {
            path: PathBuf::from("/work/demo/filetmpl.config.json"),
            source,
        };
        assert_eq!(
            err.to_string(),
            "failed to serialize config for /work/demo/filetmpl.config.json"
        );
    }
}
