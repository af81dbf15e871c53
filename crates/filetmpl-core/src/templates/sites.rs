//! Splitting template text into literal runs and substitution sites.

use crate::error::{Result, TmplError};

/// A piece of template text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Copied to the output as is.
    Literal(&'a str),
    /// The trimmed text between a start and an end delimiter.
    Site(&'a str),
}

/// Split `template` on `start`/`end` delimiters.
///
/// Two adjacent delimiters (`±±`) produce a literal `start` character. A start
/// delimiter with no matching end, or a site holding only whitespace, is an error.
pub fn split(template: &str, start: char, end: char) -> Result<Vec<Segment<'_>>> {
    let mut segments = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find(start) {
        if open > 0 {
            segments.push(Segment::Literal(&rest[..open]));
        }
        let delimiter = &rest[open..open + start.len_utf8()];
        let body = &rest[open + start.len_utf8()..];

        let Some(close) = body.find(end) else {
            let offset = template.len() - rest.len() + open;
            return Err(TmplError::TemplateRender(format!(
                "unterminated '{start}' at line {}",
                line_of(template, offset)
            )));
        };

        let expression = &body[..close];
        if expression.is_empty() {
            segments.push(Segment::Literal(delimiter));
        } else if expression.trim().is_empty() {
            let offset = template.len() - rest.len() + open;
            return Err(TmplError::TemplateRender(format!(
                "empty expression at line {}",
                line_of(template, offset)
            )));
        } else {
            segments.push(Segment::Site(expression.trim()));
        }

        rest = &body[close + end.len_utf8()..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Literal(rest));
    }
    Ok(segments)
}

fn line_of(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count() + 1
}
