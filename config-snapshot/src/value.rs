//! A loosely typed configuration graph.

use std::{borrow::Cow, cell::RefCell, fmt, rc::Rc};

use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone};
use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::describe::{Describe, Scalar, Shape};

/// A configuration value assembled at runtime.
///
/// Maps keep insertion order. [`Value::Shared`] lets one node appear in
/// several places, including inside itself:
///
/// ```rust
/// use config_snapshot::Value;
///
/// let node = Value::shared(Value::map());
/// if let Value::Shared(cell) = &node {
///     cell.borrow_mut().insert("Self", node.clone());
/// }
/// let text = config_snapshot::render(&node);
/// assert!(text.contains("Self = '[CyclicRef]'"));
/// # if let Value::Shared(cell) = &node { *cell.borrow_mut() = Value::Null; }
/// ```
#[derive(Clone, Default)]
pub enum Value {
    /// No value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A single-precision float, rendered with its own shortest digits.
    Float32(f32),
    /// A fixed-point decimal.
    Decimal(Decimal),
    /// An instant with a UTC offset.
    DateTime(DateTime<FixedOffset>),
    /// A signed time interval.
    Interval(TimeDelta),
    /// The name of an enumerated constant.
    Symbol(String),
    /// Text.
    String(String),
    /// Keyed entries in insertion order.
    Map(IndexMap<String, Value>),
    /// Ordered items.
    List(Vec<Value>),
    /// A node that may be referenced from several places.
    Shared(Rc<RefCell<Value>>),
}

impl Value {
    /// An empty map.
    pub fn map() -> Self {
        Self::Map(IndexMap::new())
    }

    /// An empty list.
    pub fn list() -> Self {
        Self::List(Vec::new())
    }

    /// Wraps `value` in a shared, mutable node.
    pub fn shared(value: Value) -> Self {
        Self::Shared(Rc::new(RefCell::new(value)))
    }

    /// Inserts an entry, returning the previous value under `key`.
    ///
    /// A value that is not a map is replaced by an empty map first.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<Value>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        if !matches!(self, Self::Map(_)) {
            *self = Self::map();
        }
        match self {
            Self::Map(entries) => entries.insert(key.into(), value.into()),
            _ => None,
        }
    }

    /// Appends an item. A value that is not a list is replaced by an empty
    /// list first.
    pub fn push<V>(&mut self, value: V)
    where
        V: Into<Value>,
    {
        if !matches!(self, Self::List(_)) {
            *self = Self::list();
        }
        if let Self::List(items) = self {
            items.push(value.into());
        }
    }

    /// Looks up a map entry.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Map(entries) => entries.get(key),
            _ => None,
        }
    }

    /// Whether this is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl Describe for Value {
    fn shape(&self) -> Shape<'_> {
        match self {
            Value::Null => Shape::Null,
            Value::Bool(value) => Shape::Scalar(Scalar::Bool(*value)),
            Value::Int(value) => Shape::Scalar(Scalar::Int(i128::from(*value))),
            Value::Float(value) => Shape::Scalar(Scalar::Float(*value)),
            Value::Float32(value) => Shape::Scalar(Scalar::Float32(*value)),
            Value::Decimal(value) => Shape::Scalar(Scalar::Decimal(*value)),
            Value::DateTime(value) => Shape::Scalar(Scalar::DateTime(*value)),
            Value::Interval(value) => Shape::Scalar(Scalar::Interval(*value)),
            Value::Symbol(name) => Shape::Scalar(Scalar::Symbol(name)),
            Value::String(text) => Shape::Scalar(Scalar::Str(Cow::Borrowed(text))),
            Value::Map(entries) => entries.shape(),
            Value::List(items) => items.shape(),
            Value::Shared(cell) => Describe::shape(&**cell),
        }
    }
}

// Shared nodes print their address so a cyclic graph can be debugged.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Value::Int(value) => f.debug_tuple("Int").field(value).finish(),
            Value::Float(value) => f.debug_tuple("Float").field(value).finish(),
            Value::Float32(value) => f.debug_tuple("Float32").field(value).finish(),
            Value::Decimal(value) => f.debug_tuple("Decimal").field(value).finish(),
            Value::DateTime(value) => f.debug_tuple("DateTime").field(value).finish(),
            Value::Interval(value) => f.debug_tuple("Interval").field(value).finish(),
            Value::Symbol(name) => f.debug_tuple("Symbol").field(name).finish(),
            Value::String(text) => fmt::Debug::fmt(text, f),
            Value::Map(entries) => f.debug_map().entries(entries.iter()).finish(),
            Value::List(items) => f.debug_list().entries(items).finish(),
            Value::Shared(cell) => write!(f, "Shared({:p})", Rc::as_ptr(cell)),
        }
    }
}

macro_rules! value_from_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Int(i64::from(value))
                }
            }
        )*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float32(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::Decimal(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(value: DateTime<Tz>) -> Self {
        Value::DateTime(value.fixed_offset())
    }
}

impl From<TimeDelta> for Value {
    fn from(value: TimeDelta) -> Self {
        Value::Interval(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Value::Map(entries)
    }
}

impl<K, V> FromIterator<(K, V)> for Value
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone, Utc};

    use super::Value;
    use crate::describe::{Describe, Scalar, Shape};

    #[test]
    fn insert_builds_maps_in_order() {
        let mut value = Value::Null;
        value.insert("B", 1);
        value.insert("A", true);
        let Value::Map(entries) = &value else {
            panic!("expected map");
        };
        let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
        assert_eq!(keys, ["B", "A"]);
        assert!(matches!(value.get("A"), Some(Value::Bool(true))));
    }

    #[test]
    fn insert_replaces_previous_value() {
        let mut value = Value::map();
        assert!(value.insert("Port", 80).is_none());
        assert!(matches!(value.insert("Port", 443), Some(Value::Int(80))));
    }

    #[test]
    fn push_builds_lists() {
        let mut value = Value::list();
        value.push("a");
        value.push(Value::Null);
        assert!(matches!(&value, Value::List(items) if items.len() == 2));
    }

    #[test]
    fn conversions_pick_matching_variants() {
        assert!(Value::from(None::<i32>).is_null());
        assert!(matches!(Value::from(Some(3_u8)), Value::Int(3)));
        assert!(matches!(Value::from(vec!["x", "y"]), Value::List(items) if items.len() == 2));
        assert!(matches!(Value::from(TimeDelta::seconds(5)), Value::Interval(_)));
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(Value::from(instant), Value::DateTime(_)));

        let map: Value = [("Host", "db"), ("Port", "5432")].into_iter().collect();
        assert!(matches!(map.get("Port"), Some(Value::String(port)) if port == "5432"));
    }

    #[test]
    fn single_precision_keeps_its_digits() {
        let mut value = Value::map();
        value.insert("Ratio", 0.1_f32);
        assert!(matches!(value.get("Ratio"), Some(Value::Float32(_))));
        assert!(crate::render(&value).contains("Ratio = '0.1'"));
    }

    #[test]
    fn shapes_follow_variants() {
        assert!(matches!(Value::Null.shape(), Shape::Null));
        assert!(matches!(
            Value::Symbol("Debug".into()).shape(),
            Shape::Scalar(Scalar::Symbol("Debug"))
        ));
        assert!(matches!(Value::map().shape(), Shape::Mapping(_)));
        assert!(matches!(Value::list().shape(), Shape::Sequence(_)));
        assert!(matches!(Value::shared(Value::Null).shape(), Shape::Guarded(_)));
    }

    #[test]
    fn debug_does_not_follow_shared_nodes() {
        let node = Value::shared(Value::map());
        if let Value::Shared(cell) = &node {
            cell.borrow_mut().insert("Self", node.clone());
        }
        let text = format!("{node:?}");
        assert!(text.starts_with("Shared(0x"));
        if let Value::Shared(cell) = &node {
            *cell.borrow_mut() = Value::Null;
        }
    }
}
