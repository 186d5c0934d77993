//! Parameter styles shared by path and query serialization.
//!
//! These follow the OpenAPI `style`/`explode` matrix (itself derived from
//! RFC 6570). Each function returns the complete fragment for one parameter,
//! prefix included, so callers only have to splice or `&`-join results.
//!
//! `null` members of arrays and objects are skipped. Members that are
//! themselves arrays or objects are written as compact JSON.

use std::borrow::Cow;

use derive_more::Display;
use serde_json::{Map, Value};

use crate::Encoding;

/// A serialization style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Style {
    /// `{name}` path style: `1,2,3`.
    #[display("simple")]
    Simple,
    /// `{.name}` path style: `.1.2.3`.
    #[display("label")]
    Label,
    /// `{;name}` path style: `;name=1,2,3`.
    #[display("matrix")]
    Matrix,
    /// Query form style: `name=1,2,3` or `name=1&name=2`.
    #[display("form")]
    Form,
    /// Query style joining array items with an encoded space.
    #[display("spaceDelimited")]
    SpaceDelimited,
    /// Query style joining array items with `|`.
    #[display("pipeDelimited")]
    PipeDelimited,
    /// Query style writing `name[key]=value` for every object property.
    #[display("deepObject")]
    DeepObject,
}

impl Style {
    /// Separator between exploded members.
    const fn explode_separator(self) -> &'static str {
        match self {
            Self::Simple => ",",
            Self::Label => ".",
            Self::Matrix => ";",
            Self::Form | Self::SpaceDelimited | Self::PipeDelimited | Self::DeepObject => "&",
        }
    }

    /// Separator between array items when not exploded.
    const fn array_separator(self) -> &'static str {
        match self {
            Self::SpaceDelimited => "%20",
            Self::PipeDelimited => "|",
            _ => ",",
        }
    }

    /// Label and matrix output repeats its separator in front.
    const fn is_prefixed(self) -> bool {
        matches!(self, Self::Label | Self::Matrix)
    }
}

/// Text of a leaf value before encoding.
pub(crate) fn scalar_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed(""),
        Value::Bool(b) => Cow::Owned(b.to_string()),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::Array(_) | Value::Object(_) => Cow::Owned(value.to_string()),
    }
}

/// `name=value`, or `None` for `null`.
#[must_use]
pub fn serialize_primitive(name: &str, value: &Value, encoding: Encoding) -> Option<String> {
    if value.is_null() {
        return None;
    }
    Some(format!("{name}={}", encoding.encode(&scalar_text(value))))
}

/// Serialize an array parameter.
///
/// Returns an empty string when the array has no non-null items.
#[must_use]
pub fn serialize_array(
    name: &str,
    items: &[Value],
    style: Style,
    explode: bool,
    encoding: Encoding,
) -> String {
    let present: Vec<&Value> = items.iter().filter(|item| !item.is_null()).collect();
    if present.is_empty() {
        return String::new();
    }

    if !explode {
        let joined = present
            .iter()
            .map(|item| encoding.encode(&scalar_text(item)).into_owned())
            .collect::<Vec<_>>()
            .join(style.array_separator());
        return match style {
            Style::Simple => joined,
            Style::Label => format!(".{joined}"),
            Style::Matrix => format!(";{name}={joined}"),
            _ => format!("{name}={joined}"),
        };
    }

    let separator = style.explode_separator();
    let parts: Vec<String> = present
        .iter()
        .filter_map(|item| match style {
            Style::Simple | Style::Label => Some(encoding.encode(&scalar_text(item)).into_owned()),
            _ => serialize_primitive(name, item, encoding),
        })
        .collect();
    prefixed(style, separator, &parts.join(separator))
}

/// Serialize an object parameter.
///
/// `deepObject` ignores `explode`: both values write `name[key]=value`.
/// Returns an empty string when the object has no non-null members.
#[must_use]
pub fn serialize_object(
    name: &str,
    members: &Map<String, Value>,
    style: Style,
    explode: bool,
    encoding: Encoding,
) -> String {
    let present: Vec<(&String, &Value)> =
        members.iter().filter(|(_, value)| !value.is_null()).collect();
    if present.is_empty() {
        return String::new();
    }

    if style != Style::DeepObject && !explode {
        let joined = present
            .iter()
            .flat_map(|(key, value)| {
                [
                    (*key).clone(),
                    encoding.encode(&scalar_text(value)).into_owned(),
                ]
            })
            .collect::<Vec<_>>()
            .join(",");
        return match style {
            Style::Simple => joined,
            Style::Label => format!(".{joined}"),
            Style::Matrix => format!(";{name}={joined}"),
            _ => format!("{name}={joined}"),
        };
    }

    let separator = style.explode_separator();
    let parts: Vec<String> = present
        .iter()
        .filter_map(|(key, value)| {
            if style == Style::DeepObject {
                serialize_primitive(&format!("{name}[{key}]"), value, encoding)
            } else {
                serialize_primitive(key, value, encoding)
            }
        })
        .collect();
    prefixed(style, separator, &parts.join(separator))
}

fn prefixed(style: Style, separator: &str, joined: &str) -> String {
    if style.is_prefixed() {
        format!("{separator}{joined}")
    } else {
        joined.to_string()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn array(style: Style, explode: bool) -> String {
        serialize_array("id", &[json!(3), json!(4), json!(5)], style, explode, Encoding::Component)
    }

    fn object(style: Style, explode: bool) -> String {
        let value = json!({"role": "admin", "firstName": "Alex"});
        let Value::Object(members) = value else {
            unreachable!("literal is an object")
        };
        serialize_object("id", &members, style, explode, Encoding::Component)
    }

    #[test]
    fn array_not_exploded() {
        assert_eq!(array(Style::Simple, false), "3,4,5");
        assert_eq!(array(Style::Label, false), ".3,4,5");
        assert_eq!(array(Style::Matrix, false), ";id=3,4,5");
        assert_eq!(array(Style::Form, false), "id=3,4,5");
        assert_eq!(array(Style::SpaceDelimited, false), "id=3%204%205");
        assert_eq!(array(Style::PipeDelimited, false), "id=3|4|5");
    }

    #[test]
    fn array_exploded() {
        assert_eq!(array(Style::Simple, true), "3,4,5");
        assert_eq!(array(Style::Label, true), ".3.4.5");
        assert_eq!(array(Style::Matrix, true), ";id=3;id=4;id=5");
        assert_eq!(array(Style::Form, true), "id=3&id=4&id=5");
        assert_eq!(array(Style::SpaceDelimited, true), "id=3&id=4&id=5");
        assert_eq!(array(Style::PipeDelimited, true), "id=3&id=4&id=5");
    }

    #[test]
    fn path_styles_snapshot() {
        let table = [Style::Simple, Style::Label, Style::Matrix]
            .into_iter()
            .flat_map(|style| [false, true].map(|explode| (style, explode)))
            .map(|(style, explode)| format!("{style} explode={explode}: {}", array(style, explode)))
            .collect::<Vec<_>>()
            .join("\n");
        insta::assert_snapshot!(table, @r"
        simple explode=false: 3,4,5
        simple explode=true: 3,4,5
        label explode=false: .3,4,5
        label explode=true: .3.4.5
        matrix explode=false: ;id=3,4,5
        matrix explode=true: ;id=3;id=4;id=5
        ");
    }

    #[test]
    fn object_not_exploded() {
        assert_eq!(object(Style::Simple, false), "role,admin,firstName,Alex");
        assert_eq!(object(Style::Label, false), ".role,admin,firstName,Alex");
        assert_eq!(object(Style::Matrix, false), ";id=role,admin,firstName,Alex");
        assert_eq!(object(Style::Form, false), "id=role,admin,firstName,Alex");
        assert_eq!(
            object(Style::DeepObject, false),
            "id[role]=admin&id[firstName]=Alex"
        );
    }

    #[test]
    fn object_exploded() {
        assert_eq!(object(Style::Simple, true), "role=admin,firstName=Alex");
        assert_eq!(object(Style::Label, true), ".role=admin.firstName=Alex");
        assert_eq!(object(Style::Matrix, true), ";role=admin;firstName=Alex");
        assert_eq!(object(Style::Form, true), "role=admin&firstName=Alex");
        assert_eq!(
            object(Style::DeepObject, true),
            "id[role]=admin&id[firstName]=Alex"
        );
    }

    #[test]
    fn nulls_are_skipped() {
        let items = [json!(1), Value::Null, json!(2)];
        assert_eq!(
            serialize_array("a", &items, Style::Form, true, Encoding::Component),
            "a=1&a=2"
        );
        assert_eq!(
            serialize_array("a", &[Value::Null], Style::Form, false, Encoding::Component),
            ""
        );
        assert_eq!(serialize_primitive("a", &Value::Null, Encoding::Component), None);
    }

    #[test]
    fn nested_members_become_json() {
        let items = [json!({"x": 1})];
        assert_eq!(
            serialize_array("a", &items, Style::Form, true, Encoding::Component),
            "a=%7B%22x%22%3A1%7D"
        );
    }

    #[test]
    fn values_are_encoded_but_names_are_not() {
        assert_eq!(
            serialize_primitive("filter[name]", &json!("a b/c"), Encoding::Component).as_deref(),
            Some("filter[name]=a%20b%2Fc")
        );
        assert_eq!(
            serialize_primitive("path", &json!("a/b"), Encoding::AllowReserved).as_deref(),
            Some("path=a/b")
        );
    }
}
