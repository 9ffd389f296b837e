//! Blog posts for a quill site.
//!
//! Posts are HTML files with a small `key: value` header, kept in one
//! directory and named so that file-name order is publication order. This
//! crate loads them ([`PostStore`]), renders the paged listing
//! ([`list_posts`]) and builds the Atom feed ([`atom_feed`]).

pub mod date;
mod error;
mod feed;
pub mod fs;
mod listing;
mod post;
mod store;

pub use error::BlogError;
pub use feed::atom_feed;
pub use feed::FeedInfo;
pub use listing::list_posts;
pub use listing::EXCERPT_LENGTH;
pub use listing::PAGE_SIZE;
pub use post::Post;
pub use store::PostStore;
