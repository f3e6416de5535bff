//! Decodes the wiki endpoint's JSON envelope into parseable markup.
//!
//! The endpoint wraps the page as `{"data": {"content_html": "..."}}` with
//! the markup HTML-escaped a second time inside the JSON string.

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

#[derive(Deserialize)]
struct Envelope {
    data: EnvelopeData,
}

#[derive(Deserialize)]
struct EnvelopeData {
    #[serde(default)]
    content_html: String,
}

/// Extract and unescape the page markup from the raw envelope body.
pub fn content_from_envelope(raw: &str) -> Result<String> {
    let envelope: Envelope =
        serde_json::from_str(raw).context("wiki response is not the expected JSON envelope")?;
    ensure!(
        !envelope.data.content_html.is_empty(),
        "wiki envelope has no `content_html`"
    );
    Ok(unescape_entities(&envelope.data.content_html))
}

/// Undo the named/numeric entities the wiki double-escapes. Only the handful
/// the endpoint actually emits; this is not a general entity decoder.
pub fn unescape_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        let mut matched = false;
        for (entity, ch) in [
            ("&lt;", '<'),
            ("&gt;", '>'),
            ("&quot;", '"'),
            ("&#39;", '\''),
            ("&#039;", '\''),
            ("&amp;", '&'),
        ] {
            if let Some(tail) = rest.strip_prefix(entity) {
                out.push(ch);
                rest = tail;
                matched = true;
                break;
            }
        }
        if !matched {
            out.push('&');
            rest = &rest[1..];
        }
    }
    out.push_str(rest);
    out
}
