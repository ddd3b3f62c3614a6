/// Logging capability injected into the core at construction.
///
/// The simulation only ever emits human-readable event strings through
/// this trait; it never performs I/O itself.  Closures implement it
/// directly, so a caller can pass `|text: &str| ...` without a wrapper
/// type.

pub trait Logger {
    fn log(&mut self, text: &str);
}

impl<F: FnMut(&str)> Logger for F {
    fn log(&mut self, text: &str) {
        self(text)
    }
}

/// Discards everything.  Handy for tests that don't inspect the feed.
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&mut self, _text: &str) {}
}
