//! Typed key/value pairs bound to loggers or attached to a single record.

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// A field value. Outputs keep the variant: JSON writes numbers and booleans
/// unquoted, logfmt writes them as bare text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Uint(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Self::Str(s.clone())
    }
}

impl From<Cow<'_, str>> for Value {
    fn from(s: Cow<'_, str>) -> Self {
        Self::Str(s.into_owned())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Self::Float(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

macro_rules! value_from_int {
    ($variant:ident: $($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Self::$variant(n.into())
                }
            }
        )+
    };
}

value_from_int!(Int: i8, i16, i32, i64);
value_from_int!(Uint: u8, u16, u32, u64);

impl From<isize> for Value {
    fn from(n: isize) -> Self {
        i64::try_from(n).map_or_else(|_| Self::Str(n.to_string()), Self::Int)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        u64::try_from(n).map_or_else(|_| Self::Str(n.to_string()), Self::Uint)
    }
}

/// One key/value pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: Value,
}

impl Field {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> From<(K, V)> for Field {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

/// Ordered list of fields. Order is kept exactly as given, duplicates included;
/// resolving duplicate keys is left to the output format.
///
/// Logging methods take `impl Into<Fields>`, so callers can pass `()` for no
/// fields, an array of `(key, value)` tuples, or the [`crate::fields!`] macro.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<Field>);

impl Fields {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.push(Field::new(key, value));
    }

    /// Chaining form of [`Fields::push`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(key, value);
        self
    }

    /// Last value bound to `key`, matching how JSON output resolves duplicates.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().rev().find(|f| f.key == key).map(|f| &f.value)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Field] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Field> {
        self.0
    }
}

impl From<()> for Fields {
    fn from((): ()) -> Self {
        Self::new()
    }
}

impl From<Vec<Field>> for Fields {
    fn from(fields: Vec<Field>) -> Self {
        Self(fields)
    }
}

impl From<&[Field]> for Fields {
    fn from(fields: &[Field]) -> Self {
        Self(fields.to_vec())
    }
}

impl From<Field> for Fields {
    fn from(field: Field) -> Self {
        Self(vec![field])
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Fields {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().map(Field::from).collect()
    }
}

impl FromIterator<Field> for Fields {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Field> for Fields {
    fn extend<I: IntoIterator<Item = Field>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Fields {
    type Item = Field;
    type IntoIter = std::vec::IntoIter<Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Builds [`Fields`] from `key => value` pairs with mixed value types.
///
/// ```
/// use fieldlog::fields;
///
/// let fields = fields! { "user" => "ada", "attempt" => 3, "admin" => false };
/// assert_eq!(fields.len(), 3);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Fields::from(::std::vec![$($crate::Field::new($key, $value)),+])
    };
}
