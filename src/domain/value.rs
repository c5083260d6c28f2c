//! Opaque argument values captured from callbacks.
//!
//! A recorded invocation is a list of [`Value`]s. Values compare
//! structurally, except [`Value::Proxy`]: proxy references compare by
//! identity, so an assertion can check that a callback was delivered by (or
//! mentions) one specific proxy object rather than an equal-looking one.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Serialize, Serializer};

use super::id::ProxyId;

/// The kind of platform object a proxy stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProxyKind {
    /// A remote connection.
    Connection,
    /// The video provider of a remote connection.
    VideoProvider,
}

impl fmt::Display for ProxyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection => write!(f, "connection"),
            Self::VideoProvider => write!(f, "video_provider"),
        }
    }
}

#[derive(Debug)]
struct ProxyIdentity {
    id: ProxyId,
    kind: ProxyKind,
    label: String,
}

/// Shared handle to a proxy's identity.
///
/// Cloning is cheap and preserves identity; two independently created
/// handles are never equal, even with the same kind and label.
#[derive(Clone)]
pub struct ProxyRef(Arc<ProxyIdentity>);

impl ProxyRef {
    /// Create a new proxy identity.
    pub fn new(kind: ProxyKind, label: impl Into<String>) -> Self {
        Self(Arc::new(ProxyIdentity {
            id: ProxyId::next(),
            kind,
            label: label.into(),
        }))
    }

    #[must_use]
    pub fn id(&self) -> ProxyId {
        self.0.id
    }

    #[must_use]
    pub fn kind(&self) -> ProxyKind {
        self.0.kind
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.0.label
    }
}

impl PartialEq for ProxyRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ProxyRef {}

impl Hash for ProxyRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Debug for ProxyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for ProxyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}({})", self.0.kind, self.0.id.get(), self.0.label)
    }
}

impl Serialize for ProxyRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One opaque callback argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Char(char),
    Text(String),
    Proxy(ProxyRef),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Build a map value from `(key, value)` pairs.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_proxy(&self) -> Option<&ProxyRef> {
        match self {
            Self::Proxy(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// True if this is a list containing `needle`.
    #[must_use]
    pub fn contains(&self, needle: &Value) -> bool {
        self.as_list()
            .map(|items| items.iter().any(|item| item == needle))
            .unwrap_or(false)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Char(c) => write!(f, "'{c}'"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Proxy(p) => write!(f, "{p}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<ProxyRef> for Value {
    fn from(p: ProxyRef) -> Self {
        Self::Proxy(p)
    }
}

impl From<&ProxyRef> for Value {
    fn from(p: &ProxyRef) -> Self {
        Self::Proxy(p.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<Value>> From<BTreeMap<String, V>> for Value {
    fn from(entries: BTreeMap<String, V>) -> Self {
        Self::Map(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

/// Build a `Vec<Value>` argument list from heterogeneous expressions.
///
/// ```
/// use callback_harness::args;
/// use callback_harness::domain::Value;
///
/// let list = args![42, true, "label"];
/// assert_eq!(list, vec![Value::Int(42), Value::Bool(true), Value::from("label")]);
/// ```
#[macro_export]
macro_rules! args {
    () => { ::std::vec::Vec::<$crate::domain::Value>::new() };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::domain::Value::from($arg)),+]
    };
}
