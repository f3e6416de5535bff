//! Splits the wiki page into per-franchise entry slices and, within an
//! entry, into per-sub-order slices.
//!
//! A slice is a run of top-level sibling elements borrowed from the parsed
//! tree; nothing is copied or re-parsed.

use anyhow::{bail, Result};
use log::debug;
use scraper::{ElementRef, Html, Selector};

use crate::classify::{self, TagKind};
use crate::util::{slice_text, visible_text};

/// One franchise block: its heading plus every sibling up to the next
/// heading at the same level.
#[derive(Debug, Clone)]
pub struct EntrySlice<'a> {
    pub heading: ElementRef<'a>,
    pub nodes: Vec<ElementRef<'a>>,
}

/// One candidate sub-order span inside an entry. `name` is `None` only for
/// the synthetic whole-entry span of an entry without internal headings.
#[derive(Debug, Clone)]
pub struct SubSlice<'a> {
    pub name: Option<String>,
    pub description: Option<String>,
    pub nodes: Vec<ElementRef<'a>>,
}

fn heading_level(tag_name: &str) -> Option<u8> {
    match tag_name {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Locate the section heading carrying `anchor_id` and split its following
/// siblings into entry slices. The first heading deeper than the anchor
/// fixes the entry level; a heading at the anchor's level or shallower ends
/// the section.
pub fn segment<'a>(html: &'a Html, anchor_id: &str) -> Result<Vec<EntrySlice<'a>>> {
    let with_id = Selector::parse("[id]").unwrap();
    let Some(anchor) = html
        .select(&with_id)
        .find(|el| el.value().id() == Some(anchor_id))
    else {
        bail!("section `{anchor_id}` not found in document");
    };
    let anchor_level = heading_level(anchor.value().name()).unwrap_or(1);

    let mut entries: Vec<EntrySlice> = Vec::new();
    let mut current: Option<EntrySlice> = None;
    let mut entry_level = None;
    for sibling in anchor.next_siblings() {
        let Some(el) = ElementRef::wrap(sibling) else {
            continue;
        };
        if let Some(level) = heading_level(el.value().name()) {
            if level <= anchor_level {
                break;
            }
            let lvl = *entry_level.get_or_insert(level);
            if level <= lvl {
                if let Some(slice) = current.take() {
                    entries.push(slice);
                }
                current = Some(EntrySlice {
                    heading: el,
                    nodes: Vec::new(),
                });
                continue;
            }
            // deeper headings stay inside the entry as sub-order candidates
        }
        match current.as_mut() {
            Some(slice) => slice.nodes.push(el),
            // section preamble before the first entry heading
            None => continue,
        }
    }
    if let Some(slice) = current.take() {
        entries.push(slice);
    }
    debug!("segmented {} entries under `{anchor_id}`", entries.len());
    Ok(entries)
}

/// An entry's internal structure: spans per sub-order candidate plus the
/// prologue in front of the first candidate (empty without candidates).
#[derive(Debug, Clone)]
pub struct EntryLayout<'a> {
    pub prologue: Vec<ElementRef<'a>>,
    pub spans: Vec<SubSlice<'a>>,
}

/// Split an entry's nodes on sub-heading candidates. No candidates means the
/// whole slice is one unnamed span (the caller renders it as "Main Story").
/// Content before the first candidate is a prologue and belongs to no span.
pub fn split_sub_orders<'a>(nodes: &[ElementRef<'a>]) -> EntryLayout<'a> {
    let bounds: Vec<usize> = nodes
        .iter()
        .enumerate()
        .filter(|(_, el)| is_sub_heading_node(**el))
        .map(|(i, _)| i)
        .collect();

    if bounds.is_empty() {
        return EntryLayout {
            prologue: Vec::new(),
            spans: vec![SubSlice {
                name: None,
                description: None,
                nodes: nodes.to_vec(),
            }],
        };
    }

    let mut out = Vec::with_capacity(bounds.len());
    for (i, &start) in bounds.iter().enumerate() {
        let end = bounds.get(i + 1).copied().unwrap_or(nodes.len());
        let name = sub_order_name(nodes[start]);
        let body = &nodes[start + 1..end];
        let description = Some(slice_text(body)).filter(|t| !t.is_empty());
        out.push(SubSlice {
            name: Some(name),
            description,
            nodes: nodes[start..end].to_vec(),
        });
    }
    EntryLayout {
        prologue: nodes[..bounds[0]].to_vec(),
        spans: out,
    }
}

/// Normalized triple view of a node for the classifier.
pub fn is_sub_heading_node(el: ElementRef) -> bool {
    let kind = TagKind::of(el.value().name());
    let text = visible_text(el);
    let emphasized = single_emphasis_text(el);
    classify::is_sub_heading(kind, &text, emphasized.as_deref())
}

/// Text of the node's single emphasized child, if it has exactly one.
fn single_emphasis_text(el: ElementRef) -> Option<String> {
    let mut marks = el
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|c| classify::EMPHASIS_TAGS.contains(&c.value().name()));
    let first = marks.next()?;
    if marks.next().is_some() {
        return None;
    }
    Some(visible_text(first))
}

fn sub_order_name(el: ElementRef) -> String {
    let text = visible_text(el);
    let text = text.strip_suffix(':').unwrap_or(&text);
    text.trim().to_owned()
}
