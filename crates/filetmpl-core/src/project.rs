//! Project metadata and the parameter bindings derived from it.
//!
//! Properties are ingested first through [`ParameterNode::put`], so dotted
//! property keys become nested nodes. The named bindings are applied afterwards
//! and win on collision:
//!
//! | binding            | source                         |
//! |--------------------|--------------------------------|
//! | `project_version`  | `project.version`              |
//! | `project_groupId`  | `project.groupId`              |
//! | `project_artifact` | `project.artifactId`           |
//! | `project_name`     | `project.name` or `artifactId` |
//! | `basedir`          | descriptor directory (path)    |
//! | `parent_*`         | `project.parent`, if declared  |

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::params::ParameterNode;

/// Identifiers of the parent project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParentMetadata {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

/// Build metadata for the project whose tree is being templated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectMetadata {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentMetadata>,
    /// Sub-module directories, relative to the base directory.
    pub modules: Vec<String>,
    /// Flat build properties; dotted keys nest.
    pub properties: BTreeMap<String, String>,
    /// Directory holding the descriptor. Set on load.
    #[serde(skip)]
    pub basedir: PathBuf,
}

impl ProjectMetadata {
    /// Display name, falling back to the artifact id.
    pub fn display_name(&self) -> &str {
        match &self.name {
            Some(name) if !name.is_empty() => name.as_str(),
            _ => self.artifact_id.as_str(),
        }
    }

    /// Build the shared parameter model for a run.
    pub fn parameters(&self) -> ParameterNode {
        let mut params = ParameterNode::new();
        params.extend_flat(self.properties.iter().map(|(k, v)| (k, v.as_str())));

        params.put("project_version", self.version.as_str());
        params.put("project_groupId", self.group_id.as_str());
        params.put("project_artifact", self.artifact_id.as_str());
        params.put("project_name", self.display_name());
        params.put("basedir", self.basedir.as_path());

        if let Some(parent) = &self.parent {
            params.put("parent_version", parent.version.as_str());
            params.put("parent_groupId", parent.group_id.as_str());
            params.put("parent_artifact", parent.artifact_id.as_str());
        }

        params
    }
}
