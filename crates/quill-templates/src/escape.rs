use std::borrow::Cow;

/// Map a character to its HTML entity, if it has one.
///
/// The table is fixed: `& < > " ' / \` =`.
#[inline]
fn entity(c: char) -> Option<&'static str> {
    match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        '/' => Some("&#x2F;"),
        '`' => Some("&#x60;"),
        '=' => Some("&#x3D;"),
        _ => None,
    }
}

/// Escape `text` for inclusion in HTML.
///
/// A single left-to-right pass; inserted entities are never rescanned, so
/// nothing is escaped twice. Text without any special character is returned
/// borrowed.
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
    let Some(first) = text.find(|c| entity(c).is_some()) else {
        return Cow::Borrowed(text);
    };

    let mut escaped = String::with_capacity(text.len() + 16);
    escaped.push_str(&text[..first]);
    for c in text[first..].chars() {
        match entity(c) {
            Some(replacement) => escaped.push_str(replacement),
            None => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_full_table() {
        assert_eq!(
            escape(r#"&<>"'/`="#),
            "&amp;&lt;&gt;&quot;&#39;&#x2F;&#x60;&#x3D;"
        );
    }

    #[test]
    fn test_escape_safe_text_is_borrowed() {
        let text = "plain text, with punctuation: ok!";
        let escaped = escape(text);
        assert!(matches!(escaped, Cow::Borrowed(_)));
        assert_eq!(escaped, text);
    }

    #[test]
    fn test_escape_does_not_double_escape() {
        assert_eq!(escape("&amp;"), "&amp;amp;");
        assert_eq!(escape(&escape("<b>")), "&amp;lt;b&amp;gt;");
    }

    #[test]
    fn test_escape_mixed_with_unicode() {
        assert_eq!(
            escape("café <a href=\"/x\">"),
            "café &lt;a href&#x3D;&quot;&#x2F;x&quot;&gt;"
        );
    }

    #[test]
    fn test_escape_empty() {
        assert_eq!(escape(""), "");
    }
}
