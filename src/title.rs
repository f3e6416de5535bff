//! Heading titles may list alternates separated by `/`, with a literal `//`
//! reserved as an escape for a real slash in a name.

/// Stand-in for an escaped `//` while splitting. U+0000 cannot appear in
/// parsed HTML text, so it never collides with real content.
const ESCAPE_TOKEN: &str = "\u{0}";

/// Split a raw heading into a primary title and its alternates.
///
/// `Foo/Bar` → `("Foo", ["Bar"])`, while `Foo//Bar` keeps the double slash
/// as content: `("Foo//Bar", [])`.
pub fn normalize_title(raw: &str) -> (String, Vec<String>) {
    let masked = raw.replace("//", ESCAPE_TOKEN);
    let mut segments = masked
        .split('/')
        .map(|seg| seg.replace(ESCAPE_TOKEN, "//").trim().to_owned())
        .filter(|seg| !seg.is_empty());
    let title = segments.next().unwrap_or_default();
    (title, segments.collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_split() {
        let (title, alts) = normalize_title("Foo/Bar");
        assert_eq!(title, "Foo");
        assert_eq!(alts, ["Bar"]);
    }

    #[test]
    fn escaped_slash_is_content() {
        let (title, alts) = normalize_title("Foo//Bar");
        assert_eq!(title, "Foo//Bar");
        assert!(alts.is_empty());
    }

    #[test]
    fn mixed_escape_and_delimiter() {
        let (title, alts) = normalize_title("Kara no Kyoukai//Garden of Sinners / the Garden of sinners");
        assert_eq!(title, "Kara no Kyoukai//Garden of Sinners");
        assert_eq!(alts, ["the Garden of sinners"]);
    }

    #[test]
    fn segments_are_trimmed() {
        let (title, alts) = normalize_title("  Gintama / Silver Soul  ");
        assert_eq!(title, "Gintama");
        assert_eq!(alts, ["Silver Soul"]);
    }

    #[test]
    fn empty_segments_are_dropped() {
        let (title, alts) = normalize_title("Foo / / Bar /");
        assert_eq!(title, "Foo");
        assert_eq!(alts, ["Bar"]);
    }

    #[test]
    fn empty_input() {
        let (title, alts) = normalize_title("  ");
        assert!(title.is_empty());
        assert!(alts.is_empty());
    }

    #[test]
    fn many_alternates_keep_order() {
        let (title, alts) = normalize_title("A/B/C/D");
        assert_eq!(title, "A");
        assert_eq!(alts, ["B", "C", "D"]);
    }
}
