//! Marker substitution for site templates.
//!
//! Templates understand three markers:
//!
//! - `{{> name }}` includes a partial through a [`PartialResolver`]
//! - `{{{ name }}}` substitutes a [`Context`] value unescaped
//! - `{{ name }}` substitutes a [`Context`] value, HTML-escaped
//!
//! There are no sections, loops, or conditionals. Anything that cannot be
//! resolved is left in the output as written.
//!
//! ## Example
//!
//! ```
//! use quill_templates::{render, Context};
//!
//! let mut context = Context::new();
//! context.insert("v", "<b>");
//!
//! assert_eq!(render("{{{v}}} {{v}}", &context, None), "<b> &lt;b&gt;");
//! ```

mod context;
mod escape;
pub mod markers;
mod render;

pub use context::Context;
pub use context::Value;
pub use escape::escape;
pub use render::render;
pub use render::PartialResolver;
