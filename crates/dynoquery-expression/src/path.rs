//! Document path parsing and validation.
//!
//! A document path references a (possibly nested) attribute: dotted
//! segments, each optionally carrying one or more `[i]` list-index
//! suffixes, e.g. `info.rating`, `matrix[0][1]`, `items[2].name`. A path
//! may be bound to a known wire type, which downstream construction uses
//! for type checks and serialization hints.

use std::fmt;

use dynoquery_model::AttrType;

use crate::error::ExpressionError;

/// A parsed document path: one or more segments, each `name` or
/// `name[i]...`, plus an optional bound attribute type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<String>,
    attr_type: Option<AttrType>,
}

impl Path {
    /// Parses a dotted path string.
    ///
    /// Each `.`-separated segment must match `name index*` where `name` is
    /// a nonempty run of characters other than `[` and `]`, and each
    /// `index` is `[` digits `]`. Attribute names containing literal dots
    /// cannot be expressed here; use [`Path::from_segments`] for those.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::PathSyntax`] citing the raw path when the
    /// grammar does not match.
    pub fn parse(raw: &str) -> Result<Self, ExpressionError> {
        if raw.is_empty() {
            return Err(ExpressionError::path_syntax(raw, "path is empty"));
        }
        let segments: Vec<String> = raw.split('.').map(str::to_owned).collect();
        for segment in &segments {
            validate_segment(segment, raw)?;
        }
        Ok(Self {
            segments,
            attr_type: None,
        })
    }

    /// Builds a path from pre-split segments, each taken verbatim.
    ///
    /// This is the entry point for attribute names containing literal
    /// dots: the caller segments the path, and no further splitting
    /// happens here.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::PathSyntax`] if the segment list is
    /// empty or any segment is an empty string.
    pub fn from_segments<I, T>(segments: I) -> Result<Self, ExpressionError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(ExpressionError::path_syntax("", "path has no segments"));
        }
        if segments.iter().any(String::is_empty) {
            return Err(ExpressionError::path_syntax(
                &segments.join("."),
                "path segment is empty",
            ));
        }
        Ok(Self {
            segments,
            attr_type: None,
        })
    }

    pub(crate) fn single_segment(name: &str) -> Self {
        Self {
            segments: vec![name.to_owned()],
            attr_type: None,
        }
    }

    /// Binds a known wire type to this path.
    #[must_use]
    pub fn typed(mut self, attr_type: AttrType) -> Self {
        self.attr_type = Some(attr_type);
        self
    }

    /// The bound wire type, if any.
    #[must_use]
    pub fn attr_type(&self) -> Option<AttrType> {
        self.attr_type
    }

    /// The path segments in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Dereferences a map key, appending a new segment.
    ///
    /// The key is taken verbatim (it may contain dots). Allowed on map-
    /// typed and untyped paths; the result is untyped.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::TypeMismatch`] when the path is bound to
    /// a non-map type.
    pub fn element(mut self, key: &str) -> Result<Self, ExpressionError> {
        match self.attr_type {
            None | Some(AttrType::M) => {}
            Some(t) => {
                return Err(ExpressionError::type_mismatch(
                    "map dereference",
                    format!("cannot key into {t}-typed path '{self}'"),
                ));
            }
        }
        if key.is_empty() {
            return Err(ExpressionError::path_syntax(key, "map key is empty"));
        }
        self.segments.push(key.to_owned());
        self.attr_type = None;
        Ok(self)
    }

    /// Dereferences a list index, appending `[i]` to the last segment.
    ///
    /// Allowed on list-typed and untyped paths; the result is untyped.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::TypeMismatch`] when the path is bound to
    /// a non-list type.
    pub fn index(mut self, i: usize) -> Result<Self, ExpressionError> {
        match self.attr_type {
            None | Some(AttrType::L) => {}
            Some(t) => {
                return Err(ExpressionError::type_mismatch(
                    "list dereference",
                    format!("cannot index into {t}-typed path '{self}'"),
                ));
            }
        }
        let Some(last) = self.segments.last_mut() else {
            return Err(ExpressionError::path_syntax("", "path has no segments"));
        };
        last.push('[');
        last.push_str(&i.to_string());
        last.push(']');
        self.attr_type = None;
        Ok(self)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Checks one `.`-separated segment against `name index*`.
fn validate_segment(segment: &str, raw: &str) -> Result<(), ExpressionError> {
    let name_end = segment.find('[').unwrap_or(segment.len());
    let name = &segment[..name_end];
    if name.is_empty() {
        return Err(ExpressionError::path_syntax(
            raw,
            "segment has no attribute name",
        ));
    }
    if name.contains(']') {
        return Err(ExpressionError::path_syntax(raw, "']' without matching '['"));
    }

    let mut rest = &segment[name_end..];
    while !rest.is_empty() {
        let Some(after_open) = rest.strip_prefix('[') else {
            let unexpected = rest.chars().next().unwrap_or_default();
            return Err(ExpressionError::path_syntax(
                raw,
                format!("unexpected '{unexpected}' after index"),
            ));
        };
        let Some(close) = after_open.find(']') else {
            return Err(ExpressionError::path_syntax(raw, "'[' without matching ']'"));
        };
        let digits = &after_open[..close];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ExpressionError::path_syntax(
                raw,
                format!("index '[{digits}]' is not a non-negative integer"),
            ));
        }
        rest = &after_open[close + 1..];
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_parse_dotted_path_with_index() {
        let path = Path::parse("a.b[0].c").unwrap();
        assert_eq!(path.segments(), ["a", "b[0]", "c"]);
    }

    #[test]
    fn test_should_parse_repeated_indices() {
        let path = Path::parse("matrix[0][1]").unwrap();
        assert_eq!(path.segments(), ["matrix[0][1]"]);
    }

    #[test]
    fn test_should_reject_malformed_paths() {
        for raw in ["", "[0]", "foo[bar]", "list[-1]", "list[0.4]", "a..b", "foo]", "foo[1"] {
            let result = Path::parse(raw);
            assert!(
                matches!(result, Err(ExpressionError::PathSyntax { .. })),
                "expected PathSyntax for {raw:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn test_should_cite_raw_path_in_error() {
        let Err(ExpressionError::PathSyntax { path, .. }) = Path::parse("foo[bar]") else {
            panic!("expected PathSyntax");
        };
        assert_eq!(path, "foo[bar]");
    }

    #[test]
    fn test_should_keep_presegmented_names_verbatim() {
        let path = Path::from_segments(["dotted.name", "inner"]).unwrap();
        assert_eq!(path.segments(), ["dotted.name", "inner"]);
    }

    #[test]
    fn test_should_reject_empty_segment_list() {
        assert!(Path::from_segments(Vec::<String>::new()).is_err());
    }

    #[test]
    fn test_should_append_map_key_as_new_segment() {
        let path = Path::parse("doc").unwrap().element("field").unwrap();
        assert_eq!(path.segments(), ["doc", "field"]);
    }

    #[test]
    fn test_should_append_index_to_last_segment() {
        let path = Path::parse("rows").unwrap().index(3).unwrap();
        assert_eq!(path.segments(), ["rows[3]"]);
    }

    #[test]
    fn test_should_reject_index_on_map_typed_path() {
        let path = Path::parse("doc").unwrap().typed(AttrType::M);
        assert!(matches!(
            path.index(0),
            Err(ExpressionError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_should_reject_key_on_list_typed_path() {
        let path = Path::parse("rows").unwrap().typed(AttrType::L);
        assert!(matches!(
            path.element("x"),
            Err(ExpressionError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_should_allow_either_dereference_on_untyped_path() {
        let path = Path::parse("any").unwrap();
        assert!(path.clone().index(0).is_ok());
        assert!(path.element("k").is_ok());
    }

    #[test]
    fn test_should_display_joined_segments() {
        let path = Path::parse("a.b[0].c").unwrap();
        assert_eq!(path.to_string(), "a.b[0].c");
    }
}
