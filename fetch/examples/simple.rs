use fetch::FetchContext;
use url::Url;

fn main() {
    let db = rusqlite::Connection::open("example_simple.db").unwrap();
    let agent = ureq::AgentBuilder::new()
        .user_agent("Mozilla/5.0 (ratelimited fetch example)")
        .build();
    let cx = FetchContext::new(db, agent).unwrap();

    let urls = [
        "https://example.com",
        "https://docs.rs",
        "https://crates.io",
        "https://example.com",
    ];
    for url in urls {
        let url = Url::parse(url).unwrap();
        let (ty, body) = cx.fetch(&url).unwrap();
        println!("{url}: {} ({} bytes)", ty.mime(), body.len());
    }
}
