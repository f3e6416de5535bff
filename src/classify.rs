//! Node-shape heuristics for sub-order boundaries and note markers.
//!
//! The wiki marks alternate viewing paths inconsistently: sometimes with a
//! real h4/h5, sometimes with a paragraph that is nothing but a bold label.
//! The predicate here is deliberately best-effort; unusual formatting can
//! both over- and under-detect boundaries.

use std::sync::LazyLock;

use regex_lite::Regex;

/// Whole-line emphasis longer than this is prose, not a heading.
const SUB_HEADING_MAX_LEN: usize = 100;

/// Exact "Note" / "Note:" label, the shape used on note blocks.
static NOTE_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^note:?$").unwrap());

/// Wider net for the classifier: any line that *opens* with the note label
/// ("Note: start with season 2") must not become a sub-order heading.
static NOTE_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^note\b:?").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// h4/h5/h6 under an entry headed by h3.
    SecondaryHeading,
    Paragraph,
    Other,
}

impl TagKind {
    pub fn of(tag_name: &str) -> Self {
        match tag_name {
            "h4" | "h5" | "h6" => TagKind::SecondaryHeading,
            "p" => TagKind::Paragraph,
            _ => TagKind::Other,
        }
    }
}

/// Does a node function as a sub-order heading?
///
/// Takes a normalized view of the node so the heuristic can be tested apart
/// from tree traversal: its tag kind, its full visible text, and the text of
/// its single emphasized child if it has exactly one.
pub fn is_sub_heading(kind: TagKind, text: &str, emphasized: Option<&str>) -> bool {
    match kind {
        TagKind::SecondaryHeading => !text.is_empty(),
        TagKind::Paragraph => {
            let Some(emphasized) = emphasized else {
                return false;
            };
            !text.is_empty()
                && text == emphasized
                && text.chars().count() < SUB_HEADING_MAX_LEN
                && !NOTE_PREFIX.is_match(text)
        }
        TagKind::Other => false,
    }
}

/// Exact note-marker match, used by the note extractor on bold elements.
pub fn is_note_marker(text: &str) -> bool {
    NOTE_MARKER.is_match(text.trim())
}

/// Tags that carry emphasis for both the classifier and the note extractor.
pub const EMPHASIS_TAGS: &[&str] = &["b", "strong", "em", "i"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secondary_headings_always_qualify() {
        assert!(is_sub_heading(TagKind::of("h4"), "Release Order", None));
        assert!(is_sub_heading(TagKind::of("h5"), "Chronological", None));
        assert!(!is_sub_heading(TagKind::of("h4"), "", None));
    }

    #[test]
    fn fully_bold_paragraph_qualifies() {
        assert!(is_sub_heading(
            TagKind::of("p"),
            "Broadcast Order:",
            Some("Broadcast Order:")
        ));
    }

    #[test]
    fn partially_bold_paragraph_does_not() {
        assert!(!is_sub_heading(
            TagKind::of("p"),
            "Watch the Broadcast Order first",
            Some("Broadcast Order")
        ));
    }

    #[test]
    fn plain_paragraph_does_not() {
        assert!(!is_sub_heading(TagKind::of("p"), "Just a sentence.", None));
    }

    #[test]
    fn long_emphasis_is_prose() {
        let long = "This entire sentence happens to be bold because the editor liked bold text \
                    a little too much to count as a heading";
        assert!(long.len() >= 100);
        assert!(!is_sub_heading(TagKind::of("p"), long, Some(long)));
    }

    #[test]
    fn note_labels_are_not_headings() {
        assert!(!is_sub_heading(TagKind::of("p"), "Note:", Some("Note:")));
        assert!(!is_sub_heading(
            TagKind::of("p"),
            "Note: start with the movie",
            Some("Note: start with the movie")
        ));
        // "Noteworthy Order" is fine, \b keeps the prefix check honest
        assert!(is_sub_heading(
            TagKind::of("p"),
            "Noteworthy Order",
            Some("Noteworthy Order")
        ));
    }

    #[test]
    fn other_tags_never_qualify() {
        assert!(!is_sub_heading(TagKind::of("ul"), "Release Order", None));
        assert!(!is_sub_heading(TagKind::of("h3"), "Release Order", None));
    }

    #[test]
    fn note_marker_shapes() {
        assert!(is_note_marker("Note"));
        assert!(is_note_marker("Note:"));
        assert!(is_note_marker("NOTE:"));
        assert!(is_note_marker(" note "));
        assert!(!is_note_marker("Notes:"));
        assert!(!is_note_marker("Note: watch this first"));
    }
}
