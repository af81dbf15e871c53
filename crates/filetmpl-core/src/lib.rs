//! Core library for filetmpl, a build-time file templating step.
//!
//! Scans a source tree for files whose names carry a template marker
//! (`app-tmpl.yaml`), renders each one against a parameter model built from
//! project metadata, and writes the result next to it (`app.yaml`).
//!
//! The pipeline is:
//! 1. [`config::TmplConfig`] loads the project descriptor.
//! 2. [`project::ProjectMetadata::parameters`] builds the shared [`params::ParameterNode`].
//! 3. [`matcher::FileMatcher`] discovers [`matcher::TemplateTask`]s via [`fileset::FileSet`].
//! 4. [`runner::TemplateRunner`] renders each task through a [`templates::Render`]
//!    implementation, isolating per-file failures.
//!
//! Progress is reported through an injected [`reporter::Reporter`].

pub mod charset;
pub mod config;
pub mod error;
pub mod fileset;
pub mod matcher;
pub mod params;
pub mod project;
pub mod reporter;
pub mod runner;
pub mod templates;
