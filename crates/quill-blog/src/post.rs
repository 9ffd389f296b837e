use std::collections::BTreeMap;

const HEADER_FENCE: &str = "---";

/// A blog post: frontmatter fields plus an HTML body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Post {
    slug: String,
    fields: BTreeMap<String, String>,
    content: String,
}

impl Post {
    /// Parse a post file.
    ///
    /// A file whose first line starts with `---` has a header: `key: value`
    /// lines up to the next line starting with `---`. Header lines without a
    /// `:` are ignored. If the header is never closed, everything after the
    /// opening fence is body.
    #[must_use]
    pub fn parse(slug: impl Into<String>, text: &str) -> Self {
        let lines = split_lines(text);
        let mut fields = BTreeMap::new();

        let body = match lines.split_first() {
            Some((first, rest)) if first.starts_with(HEADER_FENCE) => {
                match rest.iter().position(|line| line.starts_with(HEADER_FENCE)) {
                    Some(close) => {
                        for line in &rest[..close] {
                            if let Some((key, value)) = parse_field(line) {
                                fields.insert(key.to_string(), value.to_string());
                            }
                        }
                        &rest[close + 1..]
                    }
                    None => rest,
                }
            }
            _ => &lines[..],
        };

        Self {
            slug: slug.into(),
            fields,
            content: body.join("\n"),
        }
    }

    /// File name of the post without its extension.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// A frontmatter field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.get("title").unwrap_or_default()
    }

    #[must_use]
    pub fn date(&self) -> Option<&str> {
        self.get("date")
    }

    #[must_use]
    pub fn updated(&self) -> Option<&str> {
        self.get("updated")
    }

    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.get("author")
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether the post is public. Anything else is a draft.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.get("state") == Some("post")
    }

    /// Path of the post's own page.
    #[must_use]
    pub fn url(&self) -> String {
        format!("/blog/{}", self.slug)
    }
}

fn parse_field(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim_matches(' ').trim_matches('"');
    Some((key, value.trim_matches(' ')))
}

/// Split on `\r\n`, `\r` or `\n`. A trailing line break does not produce an
/// empty final line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut index = 0;

    while index < bytes.len() {
        match bytes[index] {
            b'\n' => {
                lines.push(&text[start..index]);
                index += 1;
                start = index;
            }
            b'\r' => {
                lines.push(&text[start..index]);
                index += 1;
                if bytes.get(index) == Some(&b'\n') {
                    index += 1;
                }
                start = index;
            }
            _ => index += 1,
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}
