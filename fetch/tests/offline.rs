use std::path::PathBuf;

use fetch::{FetchContext, MediaType};
use url::Url;

fn offline_cx() -> FetchContext {
    FetchContext::new_cfg(
        rusqlite::Connection::open_in_memory().unwrap(),
        ureq::agent(),
        true,
    )
    .unwrap()
}

#[test]
fn offline_allows_file() {
    let cx = offline_cx();
    let mut path = PathBuf::from(env!("CARGO_TARGET_TMPDIR"));
    path.push("testfile0.html");
    assert!(path.is_absolute());
    let contents = "<!DOCTYPE html> <html> <head> </head> <body> </body> </html>";
    std::fs::write(&path, contents).unwrap();
    let url = Url::from_file_path(&path).unwrap();
    assert_eq!(url.scheme(), "file");
    let (ty, res) = cx.fetch(&url).unwrap();
    assert_eq!(ty, MediaType::Html);
    assert_eq!(res, contents);
}

#[test]
fn offline_refuses_network() {
    let cx = offline_cx();
    let url = Url::parse("https://example.com/never-cached").unwrap();
    assert!(cx.fetch(&url).is_err());
}

#[test]
fn fetch_local_serves_cache_hits() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    let cx = FetchContext::new_cfg(conn, ureq::agent(), true).unwrap();
    assert!(cx.fetch_local("https://example.com/x").is_err());
}
