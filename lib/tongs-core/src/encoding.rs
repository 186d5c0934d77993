//! Percent-encoding policies for parameter values.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, CONTROLS, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` (`encodeURIComponent`).
const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Characters that can never appear literally in a URI.
const NEVER_IN_URI_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// How parameter values are percent-encoded before they land in a URL.
///
/// Parameter names and the separators produced by a style (`,`, `.`, `;`,
/// `=`, `|`, `&`, `[`, `]`) are never encoded; only values are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// Escape every reserved character, the same set `encodeURIComponent` escapes.
    #[default]
    Component,
    /// Keep reserved characters such as `/`, `?`, `:` and `@` readable.
    ///
    /// Only characters that are invalid anywhere in a URI are escaped.
    AllowReserved,
}

impl Encoding {
    /// Pick the policy matching an `allowReserved` flag.
    #[must_use]
    pub const fn from_allow_reserved(allow_reserved: bool) -> Self {
        if allow_reserved {
            Self::AllowReserved
        } else {
            Self::Component
        }
    }

    /// Percent-encode a single value.
    #[must_use]
    pub fn encode(self, value: &str) -> Cow<'_, str> {
        utf8_percent_encode(value, self.encode_set()).into()
    }

    const fn encode_set(self) -> &'static AsciiSet {
        match self {
            Self::Component => COMPONENT_ENCODE_SET,
            Self::AllowReserved => NEVER_IN_URI_ENCODE_SET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_escapes_reserved() {
        assert_eq!(Encoding::Component.encode("a/b?c=d&e"), "a%2Fb%3Fc%3Dd%26e");
        assert_eq!(Encoding::Component.encode("hello world"), "hello%20world");
        assert_eq!(Encoding::Component.encode("it's-(ok)_~!*."), "it's-(ok)_~!*.");
    }

    #[test]
    fn allow_reserved_keeps_reserved() {
        assert_eq!(Encoding::AllowReserved.encode("a/b?c=d&e"), "a/b?c=d&e");
        assert_eq!(Encoding::AllowReserved.encode("hello world"), "hello%20world");
    }

    #[test]
    fn non_ascii_is_always_escaped() {
        assert_eq!(Encoding::Component.encode("é"), "%C3%A9");
        assert_eq!(Encoding::AllowReserved.encode("é"), "%C3%A9");
    }

    #[test]
    fn flag_mapping() {
        assert_eq!(Encoding::from_allow_reserved(false), Encoding::Component);
        assert_eq!(Encoding::from_allow_reserved(true), Encoding::AllowReserved);
    }
}
