//! Length-bounded excerpts of HTML documents.
//!
//! [`truncate`] shortens HTML to a budget of visible characters while keeping
//! the result well nested: tags left open by the cut are closed again, and
//! `<pre>`, `<code>` and `<img>` are never split.

mod truncate;

pub use truncate::truncate;

/// An excerpt together with whether anything was cut from the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Excerpt {
    html: String,
    truncated: bool,
}

impl Excerpt {
    #[must_use]
    pub fn new(source: &str, budget: usize) -> Self {
        let html = truncate(source, budget);
        let truncated = html != source;
        Self { html, truncated }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.html
    }

    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.html
    }
}
