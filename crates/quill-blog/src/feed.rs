use chrono::DateTime;
use chrono::Utc;
use quill_templates::escape;

use crate::date;
use crate::post::Post;

/// Feed-level metadata.
#[derive(Clone, Copy, Debug)]
pub struct FeedInfo<'a> {
    /// Site name, used for the feed title and default author.
    pub name: &'a str,
    /// Scheme and host, e.g. `https://example.com`.
    pub host: &'a str,
    pub updated: DateTime<Utc>,
}

/// Render an Atom feed of `posts`, which must be newest first.
#[must_use]
pub fn atom_feed(info: &FeedInfo<'_>, posts: &[Post], visible_to_drafts: bool) -> String {
    let FeedInfo { name, host, updated } = *info;
    let name = escape(name);

    let mut lines = vec![
        "<?xml version='1.0' encoding='UTF-8'?>".to_string(),
        "<feed xmlns='http://www.w3.org/2005/Atom'>".to_string(),
        format!("<title>{name}</title>"),
        format!("<id>{host}/</id>"),
        format!("<icon>{host}/favicon.ico</icon>"),
        format!("<updated>{}</updated>", date::rfc3339(&updated)),
        format!("<author><name>{name}</name></author>"),
        format!("<link rel='alternate' type='text/html' href='{host}/' />"),
        format!("<link rel='self' type='application/atom+xml' href='{host}/blog/atom.xml' />"),
    ];

    for post in posts
        .iter()
        .filter(|post| visible_to_drafts || post.is_published())
    {
        let url = format!("{host}{}", post.url());
        let title = escape(post.title());
        let published = date::rfc3339_or_epoch(post.date().unwrap_or_default());
        let updated = post
            .updated()
            .map_or_else(|| published.clone(), date::rfc3339_or_epoch);

        lines.push("<entry>".to_string());
        lines.push(format!("<id>{url}</id>"));
        if let Some(author) = post.author().filter(|author| *author != info.name) {
            lines.push(format!("<author><name>{}</name></author>", escape(author)));
        }
        lines.push(format!("<published>{published}</published>"));
        lines.push(format!("<updated>{updated}</updated>"));
        lines.push(format!("<title type='text'>{title}</title>"));
        lines.push(format!("<content type='html'>{}</content>", escape(post.content())));
        lines.push(format!(
            "<link rel='alternate' type='text/html' href='{url}' title='{title}' />"
        ));
        lines.push("</entry>".to_string());
    }

    lines.push("</feed>".to_string());
    lines.join("\n")
}
