use std::fmt::Write as _;

use quill_excerpt::Excerpt;
use quill_templates::render;
use quill_templates::Context;

use crate::date;
use crate::post::Post;

/// Posts per page of the listing.
pub const PAGE_SIZE: usize = 10;

/// Visible characters in a listing excerpt.
pub const EXCERPT_LENGTH: usize = 250;

/// Render one page of the post listing.
///
/// `posts` must be newest first. Drafts are skipped unless
/// `visible_to_drafts` is set. Of the remaining posts, those numbered
/// `start..start + PAGE_SIZE` are rendered. If more remain, `continuation` is
/// rendered with `{{ url }}` set to the address of the next page and
/// appended.
#[must_use]
pub fn list_posts(
    posts: &[Post],
    visible_to_drafts: bool,
    start: usize,
    continuation: &str,
) -> String {
    let mut output = String::new();
    let mut eligible = posts
        .iter()
        .filter(|post| visible_to_drafts || post.is_published());

    for post in eligible.by_ref().skip(start).take(PAGE_SIZE) {
        write_item(&mut output, post);
    }

    if eligible.next().is_some() {
        let next = start + PAGE_SIZE;
        let mut context = Context::new();
        context.insert("url", format!("/blog?id={next}"));
        output.push_str(&render(continuation, &context, None));
    }

    output
}

fn write_item(output: &mut String, post: &Post) {
    let url = post.url();
    let date = post.date().map(date::display).unwrap_or_default();
    let content = collapse_whitespace(post.content());
    let excerpt = Excerpt::new(&content, EXCERPT_LENGTH);

    let _ = write!(
        output,
        "<div class='item'><div class='date'>{date}</div>\n\
         <h1><a href='{url}'>{title}</a></h1>\n\
         {excerpt}\n",
        title = post.title(),
        excerpt = excerpt.as_str(),
    );
    if excerpt.is_truncated() {
        let _ = writeln!(
            output,
            "<div class='more'><a href='{url}'>Read more&hellip;</a></div>"
        );
    }
    output.push_str("</div>\n");
}

/// Replace each pair of adjacent whitespace characters with one space.
fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_ascii_whitespace() && chars.peek().is_some_and(char::is_ascii_whitespace) {
            chars.next();
            collapsed.push(' ');
        } else {
            collapsed.push(c);
        }
    }
    collapsed
}
