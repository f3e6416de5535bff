use ego_tree::NodeRef;
use scraper::{ElementRef, Node};

/// Visible text of an element with runs of whitespace collapsed to single
/// spaces. Adjacent inline elements do not grow a space that the markup
/// didn't have.
pub fn visible_text(el: ElementRef) -> String {
    let mut raw = String::new();
    for child in el.children() {
        push_text(child, &mut raw);
    }
    collapse_ws(&raw)
}

/// Concatenated visible text of a run of sibling elements, space separated.
pub fn slice_text(nodes: &[ElementRef]) -> String {
    let mut out = String::new();
    for node in nodes {
        let t = visible_text(*node);
        if t.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&t);
    }
    out
}

fn push_text(node: NodeRef<Node>, out: &mut String) {
    match node.value() {
        Node::Text(txt) => out.push_str(txt),
        Node::Element(_) => {
            for child in node.children() {
                push_text(child, out);
            }
        }
        _ => (),
    }
}

fn collapse_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            pending = !out.is_empty();
        } else {
            if pending {
                out.push(' ');
                pending = false;
            }
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
#[allow(unused_imports)]
pub use test_log::*;

#[cfg(test)]
#[allow(dead_code)]
mod test_log {
    use log::LevelFilter;
    use log::{Metadata, Record};
    use std::cell::Cell;
    use std::sync::Once;

    struct TestLogger;

    thread_local! {
        static THREAD_LEVEL: Cell<LevelFilter> = const { Cell::new(LevelFilter::Off) };
    }

    impl log::Log for TestLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= THREAD_LEVEL.get()
        }

        fn log(&self, record: &Record) {
            if self.enabled(record.metadata()) {
                eprintln!("[{}] {}", record.level(), record.args());
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: TestLogger = TestLogger;
    static LOGGER_INIT: Once = Once::new();

    #[must_use = "logger is turned off when dropped"]
    pub fn test_log_level(level: LevelFilter) -> TestLoggerGuard {
        LOGGER_INIT.call_once(|| {
            log::set_logger(&LOGGER)
                .map(|()| log::set_max_level(LevelFilter::Trace))
                .unwrap()
        });
        THREAD_LEVEL.set(level);
        TestLoggerGuard(())
    }

    /// initialized log with `LevelFilter::Info`
    #[must_use = "logger is turned off when dropped"]
    pub fn test_log() -> TestLoggerGuard {
        test_log_level(LevelFilter::Info)
    }

    #[clippy::has_significant_drop]
    pub struct TestLoggerGuard(());

    impl Drop for TestLoggerGuard {
        fn drop(&mut self) {
            THREAD_LEVEL.set(LevelFilter::Off)
        }
    }
}
