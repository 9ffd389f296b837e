use crate::context::Context;
use crate::escape::escape;
use crate::markers::replace_all;
use crate::markers::MarkerKind;

/// Supplies the text of `{{> name }}` partials.
pub trait PartialResolver {
    /// Return the raw template text for `name`, or `None` when there is
    /// nothing to include.
    fn resolve(&self, name: &str) -> Option<String>;
}

impl<F> PartialResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Expand `template` against `context`.
///
/// Three passes run over the whole text, in order:
///
/// 1. `{{> name }}` is replaced by the partial's text. Included text is not
///    searched for further partials.
/// 2. `{{{ name }}}` is replaced by the context value as-is.
/// 3. `{{ name }}` is replaced by the HTML-escaped context value.
///
/// Markers introduced by a partial are seen by passes 2 and 3. A marker
/// whose name cannot be resolved is left in the output unchanged.
#[must_use]
pub fn render(
    template: &str,
    context: &Context,
    partials: Option<&dyn PartialResolver>,
) -> String {
    let text = match partials {
        Some(resolver) => replace_all(template, MarkerKind::Partial, |name| {
            let partial = resolver.resolve(name).filter(|text| !text.is_empty());
            if partial.is_none() {
                tracing::trace!(name, "unresolved partial");
            }
            partial
        }),
        None => template.to_string(),
    };

    let text = replace_all(&text, MarkerKind::Raw, |name| lookup(context, name));

    replace_all(&text, MarkerKind::Escaped, |name| {
        lookup(context, name).map(|value| escape(&value).into_owned())
    })
}

fn lookup(context: &Context, name: &str) -> Option<String> {
    let value = context.get(name).map(crate::Value::resolve);
    if value.is_none() {
        tracing::trace!(name, "unresolved marker");
    }
    value
}
