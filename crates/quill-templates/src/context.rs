use std::fmt;

use rustc_hash::FxHashMap;

type Producer = Box<dyn Fn() -> String + Send + Sync>;

/// A value bound to a name in a [`Context`].
///
/// Producers are evaluated lazily, once for each marker occurrence that
/// refers to them. They are not assumed to be idempotent.
pub enum Value {
    Literal(String),
    Producer(Producer),
}

impl Value {
    pub fn producer<F>(f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self::Producer(Box::new(f))
    }

    /// Resolve the value, invoking the producer if there is one.
    #[must_use]
    pub fn resolve(&self) -> String {
        match self {
            Value::Literal(s) => s.clone(),
            Value::Producer(f) => f(),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            Value::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Literal(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Literal(value.to_string())
    }
}

/// Names available to a single render.
#[derive(Debug, Default)]
pub struct Context {
    values: FxHashMap<String, Value>,
}

impl Context {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn insert_with<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.values.insert(name.into(), Value::producer(f));
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> Extend<(K, V)> for Context
where
    K: Into<String>,
    V: Into<Value>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Context
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut context = Context::new();
        context.extend(iter);
        context
    }
}
