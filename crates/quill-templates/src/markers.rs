use memchr::memmem;

const PARTIAL_START: &str = "{{>";
const RAW_START: &str = "{{{";
const RAW_END: &str = "}}}";
const ESCAPED_START: &str = "{{";
const ESCAPED_END: &str = "}}";

/// The three marker shapes, one per render pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerKind {
    /// `{{> name }}`
    Partial,
    /// `{{{ name }}}`
    Raw,
    /// `{{ name }}`
    Escaped,
}

impl MarkerKind {
    fn start(self) -> &'static str {
        match self {
            MarkerKind::Partial => PARTIAL_START,
            MarkerKind::Raw => RAW_START,
            MarkerKind::Escaped => ESCAPED_START,
        }
    }

    fn end(self) -> &'static str {
        match self {
            MarkerKind::Partial | MarkerKind::Escaped => ESCAPED_END,
            MarkerKind::Raw => RAW_END,
        }
    }
}

/// A marker matched in the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Marker<'a> {
    pub name: &'a str,
    pub start: usize,
    pub end: usize,
}

#[inline]
fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'/' | b'.')
}

/// Try to match a marker of `kind` beginning exactly at `start`.
#[must_use]
pub fn match_at(source: &str, start: usize, kind: MarkerKind) -> Option<Marker<'_>> {
    let bytes = source.as_bytes();
    let open = kind.start();
    if !source[start..].starts_with(open) {
        return None;
    }

    let mut current = start + open.len();
    while current < bytes.len() && bytes[current].is_ascii_whitespace() {
        current += 1;
    }

    let name_start = current;
    while current < bytes.len() && is_name_byte(bytes[current]) {
        current += 1;
    }
    if current == name_start {
        return None;
    }
    let name = &source[name_start..current];

    while current < bytes.len() && bytes[current].is_ascii_whitespace() {
        current += 1;
    }

    let close = kind.end();
    if source[current..].starts_with(close) {
        Some(Marker {
            name,
            start,
            end: current + close.len(),
        })
    } else {
        None
    }
}

/// Find every non-overlapping marker of `kind`, scanning left to right.
///
/// Where a start delimiter does not begin a well-formed marker, scanning
/// resumes one byte later, so a marker may begin inside a longer run of
/// braces.
#[must_use]
pub fn find_all(source: &str, kind: MarkerKind) -> Vec<Marker<'_>> {
    let finder = memmem::Finder::new(kind.start());
    let mut markers = Vec::new();
    let mut position = 0;

    while let Some(found) = finder.find(&source.as_bytes()[position..]) {
        let start = position + found;
        if let Some(marker) = match_at(source, start, kind) {
            position = marker.end;
            markers.push(marker);
        } else {
            // delimiters are ASCII, so this stays on a char boundary
            position = start + 1;
        }
    }

    markers
}

/// Replace each marker of `kind` with the value `replace` returns for its
/// name. Markers for which `replace` returns `None` are kept verbatim.
pub fn replace_all<F>(source: &str, kind: MarkerKind, mut replace: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let mut output = String::with_capacity(source.len());
    let mut copied = 0;

    for marker in find_all(source, kind) {
        if let Some(value) = replace(marker.name) {
            output.push_str(&source[copied..marker.start]);
            output.push_str(&value);
            copied = marker.end;
        }
    }

    output.push_str(&source[copied..]);
    output
}
