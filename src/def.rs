use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::warn;
use serde::Deserialize;
use url::Url;

fn default_user_agent() -> String {
    // reddit rejects the default library user agent
    "Mozilla/5.0 (watchorder scraper)".to_owned()
}

fn default_chunk_size() -> usize {
    50
}

fn default_output() -> PathBuf {
    PathBuf::from("watch_order.json")
}

/// One scrape job, loaded from a TOML file.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
#[serde(rename_all = "kebab-case")]
pub struct JobDef {
    #[serde(skip)]
    pub file: Option<PathBuf>,

    /// Wiki endpoint returning the `{data: {content_html}}` envelope.
    pub wiki_url: Url,
    /// Element id of the heading that opens the watch-order section.
    pub section_anchor: String,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Ids resolved per rate-limit window; capped at 50.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default)]
    pub cache_db: Option<PathBuf>,
}

impl JobDef {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading job file `{}`", path.display()))?;
        let mut def: JobDef = toml::from_str(&raw)
            .with_context(|| format!("invalid job file `{}`", path.display()))?;
        def.file = Some(path.to_owned());
        Ok(def)
    }

    pub fn validate(&self) {
        fn log_if_todo(s: &str, field: &str) -> bool {
            if s.eq_ignore_ascii_case("todo") {
                warn!("job field `{field}` is marked as TODO");
                return true;
            }
            false
        }
        let mut w = false;
        w |= log_if_todo(&self.section_anchor, "section-anchor");
        w |= log_if_todo(&self.user_agent, "user-agent");
        if self.chunk_size == 0 || self.chunk_size > 50 {
            warn!(
                "chunk-size {} out of range, clamping to 1..=50",
                self.chunk_size
            );
            w = true;
        }
        if w {
            match &self.file {
                Some(file) => warn!("job file `{}` has warnings", file.display()),
                None => warn!("job definition has warnings"),
            }
        }
    }

    pub fn effective_chunk_size(&self) -> usize {
        self.chunk_size.clamp(1, 50)
    }
}
