//! Rendering a site from its root directory.

use std::sync::Arc;

use camino::Utf8Path;
use camino::Utf8PathBuf;
use chrono::DateTime;
use chrono::Utc;
use quill_blog::atom_feed;
use quill_blog::date;
use quill_blog::fs::FileSystem;
use quill_blog::list_posts;
use quill_blog::BlogError;
use quill_blog::FeedInfo;
use quill_blog::PostStore;
use quill_conf::Link;
use quill_conf::Page;
use quill_conf::Settings;
use quill_templates::render;
use quill_templates::Context;
use quill_templates::PartialResolver;

use crate::error::SiteError;
use crate::paths;
use crate::visitor::Visitor;

const BLOG_DIR: &str = "blog";
const POST_TEMPLATE: &str = "post.html";
const STREAM_TEMPLATE: &str = "stream.html";

/// A site: a root directory of templates, posts and static files, plus its
/// settings.
///
/// Nothing is cached. Every render reads what it needs from the file system
/// again, so edits show up on the next request.
#[derive(Clone)]
pub struct Site {
    root: Utf8PathBuf,
    settings: Arc<Settings>,
    fs: Arc<dyn FileSystem>,
}

impl Site {
    pub fn new(root: impl Into<Utf8PathBuf>, settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            root: root.into(),
            settings: Arc::new(settings),
            fs,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Location of a site file. `relative` is cleaned first, so the result
    /// is always below the root.
    fn path(&self, relative: &str) -> Utf8PathBuf {
        let cleaned = paths::clean(relative);
        self.root.join(cleaned.trim_start_matches('/'))
    }

    #[must_use]
    pub fn is_file(&self, relative: &str) -> bool {
        self.fs.is_file(&self.path(relative))
    }

    #[must_use]
    pub fn is_directory(&self, relative: &str) -> bool {
        self.fs.is_directory(&self.path(relative))
    }

    pub fn read(&self, relative: &str) -> Result<Vec<u8>, SiteError> {
        let path = self.path(relative);
        self.fs
            .read(&path)
            .map_err(|err| BlogError::io(path, err).into())
    }

    fn read_to_string(&self, relative: &str) -> Result<String, SiteError> {
        let path = self.path(relative);
        self.fs
            .read_to_string(&path)
            .map_err(|err| BlogError::io(path, err).into())
    }

    #[must_use]
    pub fn posts(&self) -> PostStore {
        PostStore::new(Arc::clone(&self.fs), self.path(BLOG_DIR))
    }

    /// One page of the post listing, continued through `stream.html`.
    pub fn blog(&self, visible_to_drafts: bool, start: usize) -> Result<String, SiteError> {
        let posts = self.posts().posts()?;
        let continuation = match self.read_to_string(STREAM_TEMPLATE) {
            Ok(template) => template,
            Err(err) if err.is_not_found() => {
                tracing::warn!(template = STREAM_TEMPLATE, "missing template; listing is not continued");
                String::new()
            }
            Err(err) => return Err(err),
        };
        Ok(list_posts(&posts, visible_to_drafts, start, &continuation))
    }

    /// The Atom feed as seen by `visitor`.
    pub fn feed(&self, visitor: &Visitor, updated: DateTime<Utc>) -> Result<String, SiteError> {
        let posts = self.posts().posts()?;
        let host = visitor.origin();
        let info = FeedInfo {
            name: &self.settings.name,
            host: &host,
            updated,
        };
        Ok(atom_feed(&info, &posts, visitor.is_local()))
    }

    /// A post rendered through `post.html`, or `None` if there is no post
    /// called `slug`.
    ///
    /// The template sees the site settings, then the post's own fields, with
    /// `date` formatted for display, `author` defaulting to the site name and
    /// the body as `content`.
    pub fn post(&self, slug: &str) -> Result<Option<String>, SiteError> {
        let post = match self.posts().load(slug) {
            Ok(post) => post,
            Err(err) if err.is_not_found() => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let template = self.read_to_string(POST_TEMPLATE)?;

        let mut context = self.context();
        for (name, value) in post.fields() {
            context.insert(name, value);
        }
        if let Some(date) = post.date() {
            context.insert("date", date::display(date));
        }
        context.insert("author", post.author().unwrap_or(&self.settings.name));
        context.insert("content", post.content());

        Ok(Some(self.render(&template, &context)))
    }

    /// Render the page template at `relative`.
    ///
    /// Besides the settings, pages can use `feed`, `links`, `tabs` and
    /// `blog`, which are only computed if the template refers to them.
    pub fn page(&self, relative: &str, visitor: &Visitor) -> Result<String, SiteError> {
        let template = self.read_to_string(relative)?;
        let context = self.page_context(visitor);
        Ok(self.render(&template, &context))
    }

    fn render(&self, template: &str, context: &Context) -> String {
        let partials = FilePartials { site: self };
        render(template, context, Some(&partials as &dyn PartialResolver))
    }

    fn context(&self) -> Context {
        let settings = &self.settings;
        let mut context = Context::new();
        for (name, value) in &settings.values {
            context.insert(name.as_str(), value.as_str());
        }
        context.insert("name", settings.name.as_str());
        context.insert("description", settings.description.as_str());
        if let Some(feed) = settings.feed.as_deref().filter(|feed| !feed.is_empty()) {
            context.insert("feed", feed);
        }
        context
    }

    fn page_context(&self, visitor: &Visitor) -> Context {
        let mut context = self.context();

        if !context.contains("feed") {
            let origin = visitor.origin();
            context.insert_with("feed", move || format!("{origin}/blog/atom.xml"));
        }

        let settings = Arc::clone(&self.settings);
        context.insert_with("links", move || links(&settings.links));

        let settings = Arc::clone(&self.settings);
        context.insert_with("tabs", move || tabs(&settings.pages));

        let site = self.clone();
        let visible_to_drafts = visitor.is_local();
        context.insert_with("blog", move || {
            site.blog(visible_to_drafts, 0).unwrap_or_else(|err| {
                tracing::error!(error = %err, "failed to render post listing");
                String::new()
            })
        });

        context
    }
}

/// Partials are files below the site root, named relative to it.
struct FilePartials<'a> {
    site: &'a Site,
}

impl PartialResolver for FilePartials<'_> {
    fn resolve(&self, name: &str) -> Option<String> {
        match self.site.read_to_string(name) {
            Ok(text) => Some(text),
            Err(err) => {
                tracing::warn!(partial = name, error = %err, "partial not included");
                None
            }
        }
    }
}

fn links(links: &[Link]) -> String {
    links
        .iter()
        .map(|link| {
            format!(
                "<a class='icon' target='_blank' href='{}' title='{}'><span class='symbol'>{}</span></a>",
                link.url, link.name, link.symbol
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn tabs(pages: &[Page]) -> String {
    pages
        .iter()
        .map(|page| format!("<li class='tab'><a href='{}'>{}</a></li>", page.url, page.name))
        .collect::<Vec<_>>()
        .join("\n")
}
