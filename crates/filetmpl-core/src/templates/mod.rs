//! Render collaborator for template files.
//!
//! Template text marks substitution sites with a start and an end delimiter
//! character (both `±` by default, chosen to avoid collisions with ordinary
//! source code). Each site holds a [Handlebars](https://handlebarsjs.com/)
//! expression evaluated against the parameter model:
//!
//! ```text
//! version = "±project_version±"
//! db_url  = "postgres://±db.host±:±db.port±/app"
//! ```
//!
//! Text outside the sites is copied through untouched, so `{{` in the template
//! body is not interpreted.

pub mod renderer;
pub mod sites;

pub use renderer::{Render, TemplateRenderer, DEFAULT_DELIMITER};
