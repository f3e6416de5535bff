//! Small synchronous fetch layer: ureq agent, per-domain rate limiting and
//! a sqlite-backed body cache so repeated runs stay off the network.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use url::Url;

mod cache;
use cache::ObjectCache;
pub use cache::MediaType;

mod ratelimit;
use ratelimit::wait_your_turn;

/// catalog and wiki hosts both throttle around 1 req/sec
const REQUEST_PERIOD: Duration = Duration::from_millis(1100);

#[derive(Clone)]
pub struct FetchContext {
    cache: Arc<Mutex<ObjectCache>>,
    agent: ureq::Agent,
    offline: bool,
}

impl FetchContext {
    pub fn new(conn: rusqlite::Connection, agent: ureq::Agent) -> rusqlite::Result<Self> {
        Self::new_cfg(conn, agent, false)
    }

    pub fn new_cfg(
        conn: rusqlite::Connection,
        agent: ureq::Agent,
        offline: bool,
    ) -> rusqlite::Result<Self> {
        Ok(FetchContext {
            cache: Arc::new(Mutex::new(ObjectCache::new(conn)?)),
            agent,
            offline,
        })
    }

    /// gets url from store, but will not touch network
    pub fn fetch_local(&self, url: &str) -> Result<(MediaType, String)> {
        if let Some(hit) = self
            .cache
            .lock()
            .unwrap()
            .get_string(url)
            .context("db access failed")?
        {
            return Ok(hit);
        }
        bail!("{url} not found in cache")
    }

    pub fn fetch(&self, url: &Url) -> Result<(MediaType, String)> {
        if let Some(hit) = self
            .cache
            .lock()
            .unwrap()
            .get_string(url.as_str())
            .context("db access failed")?
        {
            return Ok(hit);
        }
        if url.scheme() == "file" {
            return self.fetch_file(url);
        }
        if self.offline {
            bail!("{url} not in cache and offline mode is on")
        }
        let domain = url.domain().context("url has no domain")?;
        wait_your_turn(domain, REQUEST_PERIOD);

        let resp = self
            .agent
            .request_url("GET", url)
            .call()
            .with_context(|| format!("GET {url}"))?;
        let ty = resp
            .content_type()
            .split(';')
            .next()
            .map_or(MediaType::Html, MediaType::from_mime);
        let body = resp
            .into_string()
            .with_context(|| format!("reading body of {url}"))?;
        self.cache.lock().unwrap().set(url.as_str(), &body, ty)?;
        Ok((ty, body))
    }

    fn fetch_file(&self, url: &Url) -> Result<(MediaType, String)> {
        let path = url
            .to_file_path()
            .ok()
            .with_context(|| format!("bad file url {url}"))?;
        let ty = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(MediaType::from_extension)
            .unwrap_or(MediaType::Html);
        let body = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        Ok((ty, body))
    }
}
