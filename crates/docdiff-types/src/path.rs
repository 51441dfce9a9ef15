//! Path addressing inside a [`Value`](crate::Value) tree.
//!
//! A [`Path`] renders as `a.b[2].c` for humans and as the RFC 6901 pointer
//! `/a/b/2/c` for patch operations. An empty field name displays as `[""]`
//! so it cannot be mistaken for the root.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::TypeError;

/// One step of a [`Path`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// An object field name.
    Field(String),
    /// An array position.
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        Self::Field(name.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// An ordered sequence of segments identifying a location in a document.
///
/// The empty path addresses the document root and displays as `""`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// The root path.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a segment in place.
    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.segments.push(segment.into());
    }

    /// Remove and return the last segment.
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    /// A new path extended by one segment.
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut path = self.clone();
        path.push(segment);
        path
    }

    /// The last segment, if any.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Render as an RFC 6901 JSON Pointer. The root path yields `""`.
    pub fn to_json_pointer(&self) -> String {
        let mut pointer = String::new();
        for segment in &self.segments {
            pointer.push('/');
            match segment {
                PathSegment::Field(name) => pointer.push_str(&escape_pointer_token(name)),
                PathSegment::Index(i) => pointer.push_str(&i.to_string()),
            }
        }
        pointer
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if name.is_empty() => f.write_str("[\"\"]")?,
                PathSegment::Field(name) if i == 0 => f.write_str(name)?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}

/// Escape a reference token: `~` becomes `~0`, `/` becomes `~1`.
pub fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

/// Decode a JSON Pointer into its unescaped reference tokens.
///
/// `""` addresses the whole document and yields no tokens. Any other pointer
/// must start with `/`; `~` may only be followed by `0` or `1`.
///
/// ```
/// use docdiff_types::parse_json_pointer;
///
/// assert_eq!(parse_json_pointer("/a~1b/0").unwrap(), vec!["a/b", "0"]);
/// assert!(parse_json_pointer("a").is_err());
/// ```
pub fn parse_json_pointer(pointer: &str) -> Result<Vec<String>, TypeError> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    let Some(rest) = pointer.strip_prefix('/') else {
        return Err(TypeError::InvalidPointer {
            pointer: pointer.to_string(),
            reason: "must be empty or start with '/'".into(),
        });
    };

    rest.split('/')
        .map(|raw| unescape_token(raw).ok_or_else(|| TypeError::InvalidPointer {
            pointer: pointer.to_string(),
            reason: format!("invalid escape in token {raw:?}"),
        }))
        .collect()
}

fn unescape_token(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '~' {
            match chars.next() {
                Some('0') => out.push('~'),
                Some('1') => out.push('/'),
                _ => return None,
            }
        } else {
            out.push(c);
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: Vec<PathSegment>) -> Path {
        Path::from(segments)
    }

    #[test]
    fn display_uses_dots_and_brackets() {
        let p = path(vec![
            "workflow".into(),
            "tasks".into(),
            0usize.into(),
            "config".into(),
            "timeout".into(),
        ]);
        assert_eq!(p.to_string(), "workflow.tasks[0].config.timeout");
    }

    #[test]
    fn leading_index_has_no_dot() {
        let p = path(vec![2usize.into(), "name".into(), 1usize.into(), 0usize.into()]);
        assert_eq!(p.to_string(), "[2].name[1][0]");
    }

    #[test]
    fn root_renders_empty() {
        assert_eq!(Path::root().to_string(), "");
        assert_eq!(Path::root().to_json_pointer(), "");
        assert!(Path::root().is_root());
    }

    #[test]
    fn empty_field_names_stay_visible() {
        assert_eq!(Path::root().child("").to_string(), "[\"\"]");
        assert_eq!(Path::root().child("a").child("").child(0usize).to_string(), "a[\"\"][0]");
        assert_eq!(Path::root().child("").to_json_pointer(), "/");
    }

    #[test]
    fn pointer_escapes_tilde_and_slash() {
        let p = path(vec!["a/b".into(), "m~n".into(), 3usize.into()]);
        assert_eq!(p.to_json_pointer(), "/a~1b/m~0n/3");
    }

    #[test]
    fn pointer_escape_order_matters() {
        // "~1" literally must survive as "~01", not "/".
        assert_eq!(escape_pointer_token("~1"), "~01");
        assert_eq!(parse_json_pointer("/~01").unwrap(), vec!["~1"]);
    }

    #[test]
    fn parse_pointer_tokens() {
        assert!(parse_json_pointer("").unwrap().is_empty());
        assert_eq!(parse_json_pointer("/").unwrap(), vec![""]);
        assert_eq!(parse_json_pointer("/a/0/b").unwrap(), vec!["a", "0", "b"]);
    }

    #[test]
    fn parse_pointer_rejects_bad_input() {
        assert!(matches!(
            parse_json_pointer("no-slash"),
            Err(TypeError::InvalidPointer { .. })
        ));
        assert!(parse_json_pointer("/bad~2escape").is_err());
        assert!(parse_json_pointer("/trailing~").is_err());
    }

    #[test]
    fn child_and_pop() {
        let mut p = Path::root().child("a").child(1usize);
        assert_eq!(p.len(), 2);
        assert_eq!(p.last(), Some(&PathSegment::Index(1)));
        assert_eq!(p.pop(), Some(PathSegment::Index(1)));
        assert_eq!(p.to_string(), "a");
    }

    #[test]
    fn serializes_as_display_string() {
        let p = Path::root().child("spec").child(4usize);
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"spec[4]\"");
    }
}
