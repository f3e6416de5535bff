//! Resolves reference ids against the Jikan catalog API ahead of parsing.

use ahash::{HashMap, HashMapExt};
use anyhow::{Context, Result};
use log::{info, warn};
use serde::Deserialize;
use url::Url;

use crate::model::{MediaMap, MediaRecord};

const CATALOG_BASE: &str = "https://api.jikan.moe/v4/anime/";

#[derive(Deserialize)]
struct CatalogEnvelope {
    data: MediaRecord,
}

/// Fetch a record for every id, chunked so the rate limiter gets a clean
/// window per batch. Per-id failures are coverage gaps, not errors; the
/// parse downstream is built to skip them.
pub fn resolve(cx: &fetch::FetchContext, ids: &[u32], chunk_size: usize) -> MediaMap {
    let mut map = HashMap::with_capacity(ids.len());
    for chunk in ids.chunks(chunk_size.clamp(1, 50)) {
        for &id in chunk {
            match fetch_record(cx, id) {
                Ok(record) => {
                    map.insert(id, record);
                }
                Err(e) => warn!("catalog lookup for id {id} failed: {e:#}"),
            }
        }
        info!(target: "progress", "resolved {} of {} references", map.len(), ids.len());
    }
    map
}

fn fetch_record(cx: &fetch::FetchContext, id: u32) -> Result<MediaRecord> {
    let url = Url::parse(&format!("{CATALOG_BASE}{id}")).context("building catalog url")?;
    let (_ty, body) = cx.fetch(&url)?;
    let envelope: CatalogEnvelope =
        serde_json::from_str(&body).with_context(|| format!("decoding catalog record {id}"))?;
    Ok(envelope.data)
}
