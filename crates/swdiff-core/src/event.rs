//! Classified output events produced by the matcher.

use serde::{Deserialize, Serialize};

/// A single classified line of comparison output.
///
/// Events carry the line text by value: the matcher evicts a line from its
/// window when the event is produced, so the event is the line's only
/// remaining home.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum DiffEvent {
    /// A line present only in the left stream.
    Removed(String),
    /// A line present only in the right stream.
    Added(String),
    /// A line present in both streams, emitted once for the aligned pair.
    Unchanged(String),
}

impl DiffEvent {
    /// The line text, regardless of classification.
    pub fn text(&self) -> &str {
        match self {
            DiffEvent::Removed(text) | DiffEvent::Added(text) | DiffEvent::Unchanged(text) => text,
        }
    }

    /// Conventional two-character rendering prefix: `- `, `+ `, or spaces.
    pub fn prefix(&self) -> &'static str {
        match self {
            DiffEvent::Removed(_) => "- ",
            DiffEvent::Added(_) => "+ ",
            DiffEvent::Unchanged(_) => "  ",
        }
    }

    /// Returns `true` for removals and additions.
    pub fn is_change(&self) -> bool {
        !matches!(self, DiffEvent::Unchanged(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes() {
        assert_eq!(DiffEvent::Removed("x".into()).prefix(), "- ");
        assert_eq!(DiffEvent::Added("x".into()).prefix(), "+ ");
        assert_eq!(DiffEvent::Unchanged("x".into()).prefix(), "  ");
    }

    #[test]
    fn text_access() {
        assert_eq!(DiffEvent::Added("hello".into()).text(), "hello");
    }

    #[test]
    fn change_classification() {
        assert!(DiffEvent::Removed("x".into()).is_change());
        assert!(DiffEvent::Added("x".into()).is_change());
        assert!(!DiffEvent::Unchanged("x".into()).is_change());
    }

    #[test]
    fn serde_shape() {
        let json = serde_json::to_value(DiffEvent::Added("hi".into())).unwrap();
        assert_eq!(json["kind"], "added");
        assert_eq!(json["text"], "hi");
    }
}
