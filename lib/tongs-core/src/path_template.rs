//! Path templates and path parameter expansion.
//!
//! A template such as `/pets/{petId}/photos{;size*}` mixes literal text with
//! variable expressions. Each expression is `{name}` (simple), `{.name}`
//! (label) or `{;name}` (matrix), optionally followed by `*` to explode
//! arrays and objects.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::style::{self, Style};
use crate::{Encoding, Error, Result};

/// Modifier of a path variable expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathStyle {
    /// `{name}`
    Simple,
    /// `{.name}`
    Label,
    /// `{;name}`
    Matrix,
}

impl From<PathStyle> for Style {
    fn from(style: PathStyle) -> Self {
        match style {
            PathStyle::Simple => Self::Simple,
            PathStyle::Label => Self::Label,
            PathStyle::Matrix => Self::Matrix,
        }
    }
}

/// One variable expression of a [`PathTemplate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathVariable<'a> {
    /// Name looked up in the path parameters.
    pub name: &'a str,
    /// Modifier parsed from the leading `.` or `;`.
    pub style: PathStyle,
    /// Whether the expression ends with `*`.
    pub explode: bool,
}

impl<'a> PathVariable<'a> {
    /// Parse the text between the braces.
    #[must_use]
    pub fn parse(expression: &'a str) -> Self {
        let (expression, explode) = match expression.strip_suffix('*') {
            Some(rest) => (rest, true),
            None => (expression, false),
        };
        let (name, style) = if let Some(name) = expression.strip_prefix('.') {
            (name, PathStyle::Label)
        } else if let Some(name) = expression.strip_prefix(';') {
            (name, PathStyle::Matrix)
        } else {
            (expression, PathStyle::Simple)
        };
        Self {
            name,
            style,
            explode,
        }
    }

    /// Serialize `value` for this variable.
    #[must_use]
    pub fn expand(&self, value: &Value, encoding: Encoding) -> String {
        let style = Style::from(self.style);
        match value {
            Value::Array(items) => {
                style::serialize_array(self.name, items, style, self.explode, encoding)
            }
            Value::Object(members) => {
                style::serialize_object(self.name, members, style, self.explode, encoding)
            }
            scalar => {
                let text = style::scalar_text(scalar);
                let encoded = encoding.encode(&text);
                match self.style {
                    PathStyle::Simple => encoded.into_owned(),
                    PathStyle::Label => format!(".{encoded}"),
                    PathStyle::Matrix => format!(";{}={encoded}", self.name),
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Variable(PathVariable<'a>),
}

/// The original path template before parameter substitution.
///
/// The pipeline hands it to every interceptor so they can see `/users/{id}`
/// rather than the resolved `/users/123`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathTemplate(Arc<str>);

impl PathTemplate {
    /// Create a new path template.
    #[must_use]
    pub fn new(template: impl Into<Arc<str>>) -> Self {
        Self(template.into())
    }

    /// Get the template string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Variable expressions, in template order.
    pub fn variables(&self) -> impl Iterator<Item = PathVariable<'_>> {
        self.segments().into_iter().filter_map(|segment| match segment {
            Segment::Variable(variable) => Some(variable),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute every variable with its serialized value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingPathParameter`] when a variable has no value
    /// or is `null`.
    pub fn expand(&self, params: &Map<String, Value>, encoding: Encoding) -> Result<String> {
        let mut path = String::with_capacity(self.0.len());
        for segment in self.segments() {
            match segment {
                Segment::Literal(text) => path.push_str(text),
                Segment::Variable(variable) => {
                    let value = params
                        .get(variable.name)
                        .filter(|value| !value.is_null())
                        .ok_or_else(|| Error::missing_path_parameter(variable.name))?;
                    path.push_str(&variable.expand(value, encoding));
                }
            }
        }
        Ok(path)
    }

    /// A `{` only opens an expression if a `}` follows with no `{` in between.
    fn segments(&self) -> Vec<Segment<'_>> {
        let mut segments = Vec::new();
        let mut rest: &str = &self.0;
        while let Some((before, after)) = rest.split_once('{') {
            if !before.is_empty() {
                segments.push(Segment::Literal(before));
            }
            match after.split_once('}') {
                Some((expression, tail)) if !expression.is_empty() && !expression.contains('{') => {
                    segments.push(Segment::Variable(PathVariable::parse(expression)));
                    rest = tail;
                }
                _ => {
                    segments.push(Segment::Literal("{"));
                    rest = after;
                }
            }
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest));
        }
        segments
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PathTemplate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PathTemplate {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

impl From<String> for PathTemplate {
    fn from(template: String) -> Self {
        Self::new(template)
    }
}
