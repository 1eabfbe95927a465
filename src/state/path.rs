//! Paths into the state tree.
//!
//! A `Path` is the canonical form shared by the two spellings the editor
//! uses: a dotted string (`"model.layout.0"`) and an explicit segment
//! sequence. Digit-only segments parse as indices, so both spellings
//! normalize identically and compare equal.

use std::fmt;
use std::str::FromStr;

/// One step into the tree: a mapping key or a sequence index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => write!(f, "{}", k),
            Segment::Index(i) => write!(f, "{}", i),
        }
    }
}

impl From<&str> for Segment {
    fn from(s: &str) -> Self {
        match s.parse::<usize>() {
            Ok(i) => Segment::Index(i),
            Err(_) => Segment::Key(s.to_string()),
        }
    }
}

impl From<usize> for Segment {
    fn from(i: usize) -> Self {
        Segment::Index(i)
    }
}

/// A location in the state tree, in canonical segment form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// The empty path, addressing the root.
    pub fn root() -> Self {
        Path::default()
    }

    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Self {
        Path {
            segments: segments.into_iter().collect(),
        }
    }

    /// Parse the dotted spelling. The empty string is the root path.
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return Path::root();
        }
        Path {
            segments: text.split('.').map(Segment::from).collect(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// A new path with one more segment appended.
    pub fn join(&self, segment: impl Into<Segment>) -> Path {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Path { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", seg)?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Path::parse(s))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::parse(s)
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Path::parse(&s)
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Path { segments }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dotted() {
        let p = Path::parse("model.layout.0");
        assert_eq!(
            p.segments(),
            &[
                Segment::Key("model".to_string()),
                Segment::Key("layout".to_string()),
                Segment::Index(0),
            ]
        );
    }

    #[test]
    fn test_spellings_normalize_equal() {
        let dotted = Path::parse("model.boxes.b1.items.2");
        let explicit = Path::from_segments([
            Segment::from("model"),
            Segment::from("boxes"),
            Segment::from("b1"),
            Segment::from("items"),
            Segment::Index(2),
        ]);
        assert_eq!(dotted, explicit);
    }

    #[test]
    fn test_display_round_trip() {
        let text = "trans.edit.path";
        assert_eq!(Path::parse(text).to_string(), text);
        assert_eq!(Path::parse("layout.3").to_string(), "layout.3");
    }

    #[test]
    fn test_empty_is_root() {
        let p = Path::parse("");
        assert!(p.is_empty());
        assert_eq!(p, Path::root());
        assert_eq!(p.to_string(), "");
    }

    #[test]
    fn test_join() {
        let p = Path::parse("model.boxes").join("b1").join(0usize);
        assert_eq!(p.to_string(), "model.boxes.b1.0");
        assert_eq!(p.len(), 4);
    }
}
