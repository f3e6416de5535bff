//! Assembles the final document model out of the segmenter, step builder,
//! note extractor and title normalizer.

use anyhow::Result;
use log::debug;
use scraper::Html;

use crate::model::{Document, Entry, MediaMap, SubOrder, MAIN_STORY};
use crate::util::{slice_text, visible_text};
use crate::{extract, segment, title};

/// Every catalog id referenced anywhere in the document, first-seen order,
/// deduplicated document-wide. Exists so the caller can do one batched
/// catalog fetch before [`parse`] runs.
pub fn collect_all_document_references(html: &Html) -> Vec<u32> {
    extract::collect_references(&[html.root_element()])
}

/// Main entry point: structure the section under `section_anchor` against
/// the caller-resolved catalog map.
///
/// The only fatal condition is a missing section anchor. Catalog coverage
/// gaps degrade silently: steps, then sub-orders, then whole entries drop
/// out rather than failing the parse.
pub fn parse(html: &Html, section_anchor: &str, media: &MediaMap) -> Result<Document> {
    let mut entries = Vec::new();
    for slice in segment::segment(html, section_anchor)? {
        let raw = visible_text(slice.heading);
        if raw.is_empty() {
            debug!("skipping entry with an empty heading");
            continue;
        }
        let (entry_title, alternative_titles) = title::normalize_title(&raw);
        if entry_title.is_empty() {
            continue;
        }

        let layout = segment::split_sub_orders(&slice.nodes);
        let prologue = Some(slice_text(&layout.prologue)).filter(|t| !t.is_empty());
        let mut sub_orders = Vec::new();
        for sub in layout.spans {
            let steps = extract::build_steps(&sub.nodes, media);
            if steps.is_empty() {
                debug!(
                    "`{entry_title}` / `{}`: no resolvable steps, dropping sub-order",
                    sub.name.as_deref().unwrap_or(MAIN_STORY)
                );
                continue;
            }
            sub_orders.push(SubOrder {
                name: sub.name.unwrap_or_else(|| MAIN_STORY.to_owned()),
                description: sub.description,
                steps,
            });
        }
        if sub_orders.is_empty() {
            debug!("`{entry_title}`: every sub-order emptied, dropping entry");
            continue;
        }

        entries.push(Entry {
            title: entry_title,
            alternative_titles,
            notes: extract::extract_notes(&slice.nodes),
            prologue,
            sub_orders,
        });
    }
    Ok(Document { entries })
}
