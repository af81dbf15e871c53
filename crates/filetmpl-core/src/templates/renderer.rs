//! Handlebars-backed renderer for delimiter-marked templates.
//!
//! Wraps the [`handlebars::Handlebars`] engine in **non-strict** mode with HTML
//! escaping turned off. A reference to a parameter that does not exist renders as
//! an empty string. Generated files are configuration and source code, not HTML,
//! so values are written verbatim.

use handlebars::Handlebars;

use crate::error::{Result, TmplError};
use crate::params::ParameterNode;
use crate::templates::sites::{self, Segment};

/// Default start and end delimiter.
pub const DEFAULT_DELIMITER: char = '±';

/// Turns raw template text plus the parameter model into output text.
pub trait Render {
    fn render(&self, template: &str, params: &ParameterNode) -> Result<String>;
}

/// Renders each substitution site as a Handlebars expression.
pub struct TemplateRenderer {
    hbs: Handlebars<'static>,
    start_char: char,
    end_char: char,
}

impl TemplateRenderer {
    /// Create a renderer using `±` for both delimiters.
    pub fn new() -> Self {
        Self::with_delimiters(DEFAULT_DELIMITER, DEFAULT_DELIMITER)
    }

    pub fn with_delimiters(start_char: char, end_char: char) -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(false);
        hbs.register_escape_fn(handlebars::no_escape);
        Self {
            hbs,
            start_char,
            end_char,
        }
    }

    pub fn delimiters(&self) -> (char, char) {
        (self.start_char, self.end_char)
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Render for TemplateRenderer {
    fn render(&self, template: &str, params: &ParameterNode) -> Result<String> {
        let segments = sites::split(template, self.start_char, self.end_char)?;
        let data =
            serde_json::to_value(params).map_err(|e| TmplError::TemplateRender(e.to_string()))?;

        let mut out = String::with_capacity(template.len());
        for segment in segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Site(expression) => {
                    let rendered = self
                        .hbs
                        .render_template(&format!("{{{{{expression}}}}}"), &data)
                        .map_err(|e| {
                            TmplError::TemplateRender(format!("'{expression}': {e}"))
                        })?;
                    out.push_str(&rendered);
                }
            }
        }
        Ok(out)
    }
}
