//! Pulls catalog references, steps and notes out of a slice of sibling
//! elements.

use std::sync::LazyLock;

use ahash::{HashSet, HashSetExt};
use log::debug;
use regex_lite::Regex;
use scraper::{ElementRef, Selector};

use crate::classify;
use crate::model::{MediaMap, Step};
use crate::util::visible_text;

/// Canonical catalog item link: fixed path prefix, then the numeric id.
static ITEM_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"myanimelist\.net/anime/(\d+)").unwrap());

/// Elements that count as "one line" when deriving a step title from the
/// link's surroundings.
const LINE_LEVEL_TAGS: &[&str] = &["p", "li", "td", "th", "dt", "dd", "h3", "h4", "h5", "h6"];

/// Block elements a note label can live in.
const BLOCK_TAGS: &[&str] = &["p", "li", "td", "dd", "blockquote", "div"];

/// Ordered, deduplicated catalog ids referenced by `nodes`. Dedup scope is
/// exactly the slice passed in; callers decide whether that is one sub-order
/// or the whole document.
pub fn collect_references(nodes: &[ElementRef]) -> Vec<u32> {
    reference_links(nodes).into_iter().map(|(id, _)| id).collect()
}

/// Build steps for every collected id that the catalog map can satisfy.
/// Coverage gaps are expected; a missing id just drops the step.
pub fn build_steps(nodes: &[ElementRef], media: &MediaMap) -> Vec<Step> {
    let mut steps = Vec::new();
    for (id, link) in reference_links(nodes) {
        let Some(record) = media.get(&id) else {
            debug!("no catalog record for id {id}, skipping step");
            continue;
        };
        let title = match line_ancestor(link) {
            Some(line) => visible_text(line),
            None => visible_text(link),
        };
        let is_optional = title.to_lowercase().contains("(optional)");
        steps.push(Step {
            title,
            is_optional,
            reference_id: id,
            media: record.flattened(),
        });
    }
    steps
}

/// Text of every note block in the slice: a bold "Note"/"Note:" label names
/// its nearest enclosing block, blocks join with newlines in page order.
pub fn extract_notes(nodes: &[ElementRef]) -> Option<String> {
    let marks = Selector::parse(&classify::EMPHASIS_TAGS.join(", ")).unwrap();
    let mut parts: Vec<String> = Vec::new();
    for node in nodes {
        for mark in node.select(&marks) {
            if !classify::is_note_marker(&visible_text(mark)) {
                continue;
            }
            let block = mark
                .ancestors()
                .filter_map(ElementRef::wrap)
                .find(|el| BLOCK_TAGS.contains(&el.value().name()));
            let text = visible_text(block.unwrap_or(*node));
            if !text.is_empty() && parts.last() != Some(&text) {
                parts.push(text);
            }
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}

/// Catalog links in first-seen order, one per id.
fn reference_links<'a>(nodes: &[ElementRef<'a>]) -> Vec<(u32, ElementRef<'a>)> {
    let anchors = Selector::parse("a[href]").unwrap();
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for node in nodes {
        let own = (node.value().name() == "a").then_some(*node);
        for link in own.into_iter().chain(node.select(&anchors)) {
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            let Some(cap) = ITEM_URL.captures(href) else {
                continue;
            };
            let Ok(id) = cap[1].parse::<u32>() else {
                continue;
            };
            if seen.insert(id) {
                out.push((id, link));
            }
        }
    }
    out
}

fn line_ancestor<'a>(link: ElementRef<'a>) -> Option<ElementRef<'a>> {
    link.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| LINE_LEVEL_TAGS.contains(&el.value().name()))
}
