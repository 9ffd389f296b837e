use std::collections::BTreeMap;

use memchr::memchr;
use memchr::memchr3;
use memchr::memchr_iter;

const ELLIPSIS: &str = "&hellip;";

/// How far a word may run past the budget before it is cut mid-word.
const OVERSHOOT: usize = 15;

/// Tags whose content cannot be shortened. Truncation stops in front of them.
const ATOMIC_TAGS: &[&str] = &["pre", "code", "img"];

#[derive(Debug, PartialEq, Eq)]
enum Tag<'a> {
    Open { name: &'a str, len: usize },
    Close { name: &'a str, len: usize },
}

#[inline]
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Parse `<name ...>` or `</name ...>` starting at `start`.
fn parse_tag(source: &str, start: usize) -> Option<Tag<'_>> {
    let bytes = source.as_bytes();
    let mut current = start + 1;

    let closing = bytes.get(current) == Some(&b'/');
    if closing {
        current += 1;
    }

    let name_start = current;
    while current < bytes.len() && is_word_byte(bytes[current]) {
        current += 1;
    }
    if current == name_start {
        return None;
    }
    let name = &source[name_start..current];

    let end = current + memchr(b'>', &bytes[current..])? + 1;
    let len = end - start;

    Some(if closing {
        Tag::Close { name, len }
    } else {
        Tag::Open { name, len }
    })
}

/// Offset of the `</name>` that closes an element whose opening tag ends at
/// `from`, skipping over nested elements of the same name.
fn matching_close(source: &str, from: usize, name: &str) -> Option<usize> {
    let mut depth = 0usize;
    for offset in memchr_iter(b'<', &source.as_bytes()[from..]) {
        let start = from + offset;
        match parse_tag(source, start) {
            Some(Tag::Open { name: open, .. }) if open == name => depth += 1,
            Some(Tag::Close { name: close, len }) if close == name => {
                if depth == 0 {
                    return (len == name.len() + 3).then_some(start);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}

/// Whether anything after `from` would count towards the budget.
fn has_visible(source: &str, from: usize) -> bool {
    let bytes = source.as_bytes();
    let mut index = from;
    while index < bytes.len() {
        if bytes[index] != b'<' {
            return true;
        }
        match parse_tag(source, index) {
            Some(Tag::Open { name, .. }) if ATOMIC_TAGS.contains(&name) => return true,
            Some(Tag::Open { len, .. } | Tag::Close { len, .. }) => index += len,
            None => return true,
        }
    }
    false
}

/// Length of an entity body (`amp;`, `#39;`) at the start of `rest`, or 0.
fn entity_len(rest: &[u8]) -> usize {
    let digits_start = usize::from(rest.first() == Some(&b'#'));
    let alnum = rest[digits_start..]
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric())
        .count();
    if alnum > 0 && rest.get(digits_start + alnum) == Some(&b';') {
        digits_start + alnum + 1
    } else {
        0
    }
}

/// Shorten `html` to roughly `budget` visible characters.
///
/// Tag markup is free, an entity counts as one character, and so does each
/// space. Words are kept whole unless that would run more than 15 characters
/// past the budget. Tags opened in the kept prefix and closed after it get
/// their closing tags appended, innermost first, after an `&hellip;` if text
/// was cut. Scanning stops in front of `<pre>`, `<code>` and `<img>`.
///
/// When nothing visible is cut the input is returned as-is, so callers can compare
/// the result with the input to see whether truncation happened.
#[must_use]
pub fn truncate(html: &str, budget: usize) -> String {
    let bytes = html.as_bytes();
    // offset of a closing tag in `html` -> the closing tag
    let mut closing: BTreeMap<usize, String> = BTreeMap::new();
    let mut ellipsis = false;
    let mut count = 0;
    let mut index = 0;

    while count < budget && index < bytes.len() {
        match bytes[index] {
            b'<' => {
                if let Some(tag) = closing.remove(&index) {
                    index += tag.len();
                    continue;
                }
                match parse_tag(html, index) {
                    Some(Tag::Open { name, len }) => {
                        if ATOMIC_TAGS.contains(&name) {
                            break;
                        }
                        index += len;
                        if let Some(offset) = matching_close(html, index, name) {
                            closing.insert(offset, format!("</{name}>"));
                        }
                    }
                    Some(Tag::Close { len, .. }) => index += len,
                    None => {
                        index += 1;
                        count += 1;
                    }
                }
            }
            b'&' => {
                index += 1 + entity_len(&bytes[index + 1..]);
                count += 1;
            }
            _ => {
                if bytes[index] == b' ' {
                    index += 1;
                    count += 1;
                }

                let rest = &html[index..];
                let end = memchr3(b' ', b'<', b'&', rest.as_bytes()).unwrap_or(rest.len());
                let word = &rest[..end];

                let mut skip = word.chars().count();
                let mut advance = end;
                if count + skip > budget {
                    ellipsis = true;
                }
                if count + skip > budget + OVERSHOOT {
                    skip = budget - count;
                    advance = word.char_indices().nth(skip).map_or(end, |(i, _)| i);
                }

                index += advance;
                count += skip;
            }
        }
    }

    if !has_visible(html, index) {
        return html.to_string();
    }

    let mut output = String::with_capacity(index + ELLIPSIS.len() + 16 * closing.len());
    output.push_str(&html[..index]);
    if ellipsis {
        output.push_str(ELLIPSIS);
    }
    for tag in closing.values() {
        output.push_str(tag);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag() {
        assert_eq!(
            parse_tag("<a href='/x'>", 0),
            Some(Tag::Open { name: "a", len: 13 })
        );
        assert_eq!(
            parse_tag("</div>", 0),
            Some(Tag::Close { name: "div", len: 6 })
        );
        assert_eq!(parse_tag("<!-- x -->", 0), None);
        assert_eq!(parse_tag("< b>", 0), None);
        assert_eq!(parse_tag("<b", 0), None);
    }

    #[test]
    fn test_entity_len() {
        assert_eq!(entity_len(b"amp; rest"), 4);
        assert_eq!(entity_len(b"#39;"), 4);
        assert_eq!(entity_len(b"#x2F;"), 5);
        assert_eq!(entity_len(b" and"), 0);
        assert_eq!(entity_len(b"amp"), 0);
        assert_eq!(entity_len(b""), 0);
    }

    #[test]
    fn test_short_text_is_unchanged() {
        let html = "<p>Hello <b>world</b> &amp; friends</p>";
        assert_eq!(truncate(html, 1000), html);
        // 5 + 1 + 5 + 1 + 1 + 1 + 7 visible characters
        assert_eq!(truncate(html, 21), html);
    }

    #[test]
    fn test_plain_text_cut_at_word() {
        assert_eq!(
            truncate("The quick brown fox jumps", 12),
            "The quick brown&hellip;"
        );
    }

    #[test]
    fn test_long_word_is_cut() {
        let word = "a".repeat(40);
        assert_eq!(truncate(&word, 10), format!("{}&hellip;", "a".repeat(10)));
    }

    #[test]
    fn test_word_overshoot_within_limit() {
        let text = format!("ab {} tail", "c".repeat(18));
        // 3 + 18 = 21 runs 16 past a budget of 5; 3 + 17 would not
        assert_eq!(truncate(&text, 5), "ab cc&hellip;");
        let text = format!("ab {} tail", "c".repeat(17));
        assert_eq!(truncate(&text, 5), format!("ab {}&hellip;", "c".repeat(17)));
    }

    #[test]
    fn test_open_tags_are_closed_innermost_first() {
        assert_eq!(
            truncate("<p>Hello <b>big world</b> again</p>", 8),
            "<p>Hello <b>big&hellip;</b></p>"
        );
    }

    #[test]
    fn test_closed_tags_are_not_repeated() {
        assert_eq!(
            truncate("<p><em>One</em> two three four</p>", 8),
            "<p><em>One</em> two three&hellip;</p>"
        );
    }

    #[test]
    fn test_matching_close_skips_nested() {
        let html = "<div><div>a</div>b</div>";
        assert_eq!(matching_close(html, 5, "div"), Some(18));
        assert_eq!(matching_close(html, 10, "div"), Some(11));
        assert_eq!(matching_close("<b>x</b >", 3, "b"), None);
        assert_eq!(matching_close("<b>x", 3, "b"), None);
    }

    #[test]
    fn test_nested_same_name_tags_are_closed() {
        assert_eq!(
            truncate("<span><span>a</span> bbbb cccc dddd eeee</span>", 6),
            "<span><span>a</span> bbbb</span>"
        );
        assert_eq!(
            truncate("<div><div>one two</div> three four five</div>", 3),
            "<div><div>one</div></div>"
        );
    }

    #[test]
    fn test_nested_lists_are_closed() {
        assert_eq!(
            truncate(
                "<ul><li>one<ul><li>x</li></ul> two three four five six</li></ul>",
                8
            ),
            "<ul><li>one<ul><li>x</li></ul> two</li></ul>"
        );
    }

    #[test]
    fn test_trailing_markup_is_kept_at_budget() {
        assert_eq!(truncate("abc<br>", 3), "abc<br>");
        assert_eq!(truncate("<p>abc</p><hr>", 3), "<p>abc</p><hr>");
        assert_eq!(truncate("abc</b>", 3), "abc</b>");
        assert_eq!(truncate("abc<br>d", 3), "abc");
        assert_eq!(truncate("abc<img src='a.png'>", 3), "abc");
    }

    #[test]
    fn test_hard_wall_tags() {
        assert_eq!(truncate("abc<pre>DO NOT INCLUDE</pre>def", 1000), "abc");
        assert_eq!(
            truncate("<p>see <code>x</code></p>", 1000),
            "<p>see </p>"
        );
        assert_eq!(truncate("<img src='a.png'>caption", 1000), "");
    }

    #[test]
    fn test_hard_wall_is_case_sensitive() {
        let html = "<PRE>kept</PRE>";
        assert_eq!(truncate(html, 1000), html);
    }

    #[test]
    fn test_entity_counts_as_one() {
        assert_eq!(
            truncate("&lt;&gt;&amp;&quot; more text", 4),
            "&lt;&gt;&amp;&quot;"
        );
    }

    #[test]
    fn test_unmatched_closing_tag_is_free() {
        assert_eq!(truncate("one</b> two three", 6), "one</b> two&hellip;");
    }

    #[test]
    fn test_unclosed_open_tag_is_not_forced_closed() {
        assert_eq!(
            truncate("<div>alpha beta gamma", 8),
            "<div>alpha beta&hellip;"
        );
    }

    #[test]
    fn test_stray_angle_bracket_is_text() {
        assert_eq!(truncate("a < b is true", 3), "a <");
        assert_eq!(truncate("a < b is true", 4), "a < b&hellip;");
    }

    #[test]
    fn test_unicode_is_cut_on_char_boundary() {
        let word = "é".repeat(30);
        assert_eq!(truncate(&word, 4), "éééé&hellip;");
    }

    #[test]
    fn test_zero_budget() {
        assert_eq!(truncate("<p>text</p>", 0), "");
        assert_eq!(truncate("", 0), "");
    }

    #[test]
    fn test_listing_excerpt() {
        let html = "<p>First paragraph with <a href='/x'>a link</a>.</p>\n<p>Second paragraph that goes on</p>";
        insta::assert_snapshot!(truncate(html, 30), @r"
        <p>First paragraph with <a href='/x'>a link</a>.</p>
        <p>Second&hellip;</p>
        ");
    }
}
