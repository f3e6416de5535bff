//! Extracts a structured watch-order dataset from the r/anime wiki page.
//!
//! The parsing core is pure: it takes an already-parsed [`scraper::Html`]
//! tree plus a caller-resolved id→record map and returns an immutable
//! [`Document`]. All network and file I/O lives in the binary and the
//! `fetch` crate.

pub mod catalog;
pub mod classify;
pub mod def;
pub mod extract;
pub mod logger;
pub mod model;
pub mod parse;
pub mod segment;
pub mod title;
pub mod util;
pub mod wiki;

pub use model::{Document, Entry, Media, MediaMap, MediaRecord, Step, SubOrder};
pub use parse::{collect_all_document_references, parse};
