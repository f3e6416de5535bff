use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use scraper::Html;

use watchorder::def::JobDef;
use watchorder::{catalog, logger, wiki};

#[derive(Parser)]
#[command(about = "Extract a structured watch-order dataset from the wiki")]
struct Args {
    /// TOML job definition
    job: PathBuf,

    /// Serve everything from the fetch cache, never touch the network
    #[arg(long)]
    offline: bool,

    /// Override the job's output path
    #[arg(long)]
    out: Option<PathBuf>,

    /// Override the job's section anchor id
    #[arg(long)]
    anchor: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logger::init(level).expect("logger set twice");

    let mut def = JobDef::load(&args.job)?;
    def.validate();
    if let Some(anchor) = args.anchor {
        def.section_anchor = anchor;
    }
    let output = args.out.unwrap_or_else(|| def.output.clone());

    let cache_db = def
        .cache_db
        .clone()
        .unwrap_or_else(|| PathBuf::from("watchorder-cache.db"));
    let conn = rusqlite::Connection::open(&cache_db)
        .with_context(|| format!("opening cache db `{}`", cache_db.display()))?;
    let agent = ureq::AgentBuilder::new().user_agent(&def.user_agent).build();
    let cx = fetch::FetchContext::new_cfg(conn, agent, args.offline)?;

    info!(target: "progress", "fetching wiki page");
    let (_ty, body) = cx.fetch(&def.wiki_url)?;
    let markup = wiki::content_from_envelope(&body)?;
    let html = Html::parse_document(&markup);

    let ids = watchorder::collect_all_document_references(&html);
    info!("document references {} unique catalog ids", ids.len());
    let media = catalog::resolve(&cx, &ids, def.effective_chunk_size());

    let doc = watchorder::parse(&html, &def.section_anchor, &media)?;
    info!(
        "structured {} entries ({} ids unresolved)",
        doc.entries.len(),
        ids.len().saturating_sub(media.len())
    );

    let json = serde_json::to_string_pretty(&doc)?;
    std::fs::write(&output, json)
        .with_context(|| format!("writing `{}`", output.display()))?;
    info!("wrote {}", output.display());
    Ok(())
}
