//! The character stream abstraction the codec reads from and writes to.

/// A writable sink accepting appended text.
pub trait TextSink {
    fn append_text(&mut self, text: &str);
}

impl TextSink for String {
    fn append_text(&mut self, text: &str) {
        self.push_str(text);
    }
}

impl TextSink for Vec<u8> {
    fn append_text(&mut self, text: &str) {
        self.extend_from_slice(text.as_bytes());
    }
}

/// A readable source yielding its full text content, or `None` when absent.
pub trait TextSource {
    fn text(&self) -> Option<&str>;
}

impl TextSource for str {
    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl TextSource for String {
    fn text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl TextSource for Option<&str> {
    fn text(&self) -> Option<&str> {
        *self
    }
}

impl TextSource for Option<String> {
    fn text(&self) -> Option<&str> {
        self.as_deref()
    }
}
