use std::io;
use std::sync::Arc;

use camino::Utf8PathBuf;

use crate::error::BlogError;
use crate::fs::FileSystem;
use crate::post::Post;

const POST_EXTENSION: &str = "html";

/// Posts stored as `<slug>.html` files in one directory.
///
/// Slugs are expected to sort chronologically (`2024-03-09-title`), so the
/// reverse file-name order is newest first. Nothing is cached; every call
/// reads the directory again.
#[derive(Clone)]
pub struct PostStore {
    fs: Arc<dyn FileSystem>,
    dir: Utf8PathBuf,
}

impl PostStore {
    pub fn new(fs: Arc<dyn FileSystem>, dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            fs,
            dir: dir.into(),
        }
    }

    /// Post slugs, newest first. A missing directory has no posts.
    pub fn slugs(&self) -> Result<Vec<String>, BlogError> {
        let entries = match self.fs.read_directory(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(dir = %self.dir, "no post directory");
                return Ok(Vec::new());
            }
            Err(err) => return Err(BlogError::io(self.dir.clone(), err)),
        };

        let mut slugs: Vec<String> = entries
            .iter()
            .filter(|path| path.extension() == Some(POST_EXTENSION))
            .filter(|path| self.fs.is_file(path))
            .filter_map(|path| path.file_stem())
            .map(str::to_string)
            .collect();
        slugs.sort_unstable_by(|a, b| b.cmp(a));
        Ok(slugs)
    }

    fn path(&self, slug: &str) -> Utf8PathBuf {
        self.dir.join(format!("{slug}.{POST_EXTENSION}"))
    }

    /// Load one post by slug.
    pub fn load(&self, slug: &str) -> Result<Post, BlogError> {
        let path = self.path(slug);
        if !self.fs.is_file(&path) {
            return Err(BlogError::NotFound(path));
        }
        let text = self
            .fs
            .read_to_string(&path)
            .map_err(|err| BlogError::io(path.clone(), err))?;
        Ok(Post::parse(slug, &text))
    }

    /// Every post, newest first. Posts that fail to load are skipped.
    pub fn posts(&self) -> Result<Vec<Post>, BlogError> {
        let posts = self
            .slugs()?
            .iter()
            .filter_map(|slug| match self.load(slug) {
                Ok(post) => Some(post),
                Err(err) => {
                    tracing::warn!(slug = %slug, error = %err, "skipping unreadable post");
                    None
                }
            })
            .collect();
        Ok(posts)
    }
}
