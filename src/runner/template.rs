//! Template rendering
//!
//! Templates embed references of the form `{{ .KEY }}` (or `{{ KEY }}`) that are
//! replaced by values looked up in a YAML mapping. Dotted references such as
//! `{{ .database.host }}` walk into nested mappings.

use crate::error::{RenderError, RenderResult};
use lazy_static::lazy_static;
use regex::Regex;
use serde_yaml::{Mapping, Value};

lazy_static! {
    // One or more key segments separated by dots, with an optional leading dot.
    static ref REFERENCE_RE: Regex =
        Regex::new(r"^\.?[A-Za-z0-9_-]+(\.[A-Za-z0-9_-]+)*$").unwrap();
}

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Render `template` by substituting every reference with its value in `context`
///
/// Fails on the first reference that is undefined, non-scalar or malformed.
/// Text outside of `{{ }}` is copied unchanged.
pub fn render(template: &str, context: &Mapping) -> RenderResult<String> {
    let (out, errors) = render_lenient(template, context);
    match errors.into_iter().next() {
        Some(e) => Err(e),
        None => Ok(out),
    }
}

/// Render `template`, collecting failures instead of stopping at the first one
///
/// A reference that cannot be resolved renders as the empty string. An
/// unclosed `{{` ends rendering; the text before it is kept.
pub fn render_lenient(template: &str, context: &Mapping) -> (String, Vec<RenderError>) {
    let mut out = String::with_capacity(template.len());
    let mut errors = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);

        let after_open = &rest[start + OPEN.len()..];
        let Some(end) = after_open.find(CLOSE) else {
            errors.push(RenderError::InvalidSyntax(format!(
                "unclosed '{}' near '{}'",
                OPEN,
                snippet(&rest[start..])
            )));
            return (out, errors);
        };

        let reference = after_open[..end].trim();
        match resolve(reference, context) {
            Ok(value) => out.push_str(&value),
            Err(e) => errors.push(e),
        }

        rest = &after_open[end + CLOSE.len()..];
    }

    out.push_str(rest);
    (out, errors)
}

/// Look up a single reference and format it for substitution
fn resolve(reference: &str, context: &Mapping) -> RenderResult<String> {
    if !REFERENCE_RE.is_match(reference) {
        return Err(RenderError::InvalidSyntax(format!(
            "'{}' is not a variable reference",
            reference
        )));
    }

    let mut current: Option<&Value> = None;
    for segment in reference.trim_start_matches('.').split('.') {
        let map = match current {
            None => context,
            Some(Value::Mapping(map)) => map,
            Some(_) => return Err(RenderError::UndefinedVariable(reference.to_string())),
        };
        current = Some(
            map.get(segment)
                .ok_or_else(|| RenderError::UndefinedVariable(reference.to_string()))?,
        );
    }

    match current {
        Some(value) => {
            scalar_to_string(value).ok_or_else(|| RenderError::NonScalar(reference.to_string()))
        }
        None => Err(RenderError::UndefinedVariable(reference.to_string())),
    }
}

/// Format a scalar YAML value the way it should appear in rendered text
///
/// Returns `None` for sequences and mappings.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn snippet(s: &str) -> String {
    s.chars().take(20).collect()
}
