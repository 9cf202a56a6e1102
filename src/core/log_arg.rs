//! Log call arguments
//!
//! A log call takes any number of heterogeneous arguments. Most are plain JSON
//! values; errors and arbitrary debug-printable values are carried as-is so
//! reporters can render them, but the latter refuse to serialize.

use super::log_object::InputLogObject;
use serde::ser::{Error as _, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum LogArg {
    Value(Value),
    /// A structured log object (`message`, `additional`, `tag`, ...)
    Object(Box<InputLogObject>),
    /// An error, serialized as its display string
    Error(Arc<dyn std::error::Error + Send + Sync>),
    /// A value that can only be debug-printed
    Opaque(Arc<dyn fmt::Debug + Send + Sync>),
}

impl LogArg {
    pub fn error<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        LogArg::Error(Arc::new(error))
    }

    pub fn opaque<T>(value: T) -> Self
    where
        T: fmt::Debug + Send + Sync + 'static,
    {
        LogArg::Opaque(Arc::new(value))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LogArg::Value(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Loose truthiness: null, false, zero and the empty string are falsy
    pub fn is_truthy(&self) -> bool {
        match self {
            LogArg::Value(value) => value_is_truthy(value),
            _ => true,
        }
    }

    /// Interpret this argument as a structured log object, if it is one.
    ///
    /// A structured object is a mapping carrying a truthy `message` or an `args`
    /// field, and no `stack` field (which marks an error-like object).
    pub fn as_log_object(&self) -> Option<InputLogObject> {
        match self {
            LogArg::Object(object) if object.has_log_shape() => Some((**object).clone()),
            LogArg::Value(Value::Object(map)) if map_has_log_shape(map) => {
                Some(InputLogObject::from_map(map))
            }
            _ => None,
        }
    }

    /// Render as JSON, debug-printing whatever cannot be serialized
    pub fn to_json_lossy(&self) -> Value {
        match self {
            LogArg::Value(value) => value.clone(),
            LogArg::Object(object) => serde_json::to_value(object)
                .unwrap_or_else(|_| Value::String(format!("{:?}", object))),
            LogArg::Error(error) => Value::String(error.to_string()),
            LogArg::Opaque(value) => Value::String(format!("{:?}", value)),
        }
    }
}

pub(crate) fn value_is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub(crate) fn map_has_log_shape(map: &Map<String, Value>) -> bool {
    let has_message = map.get("message").is_some_and(value_is_truthy);
    (has_message || map.contains_key("args")) && !map.contains_key("stack")
}

impl Serialize for LogArg {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LogArg::Value(value) => value.serialize(serializer),
            LogArg::Object(object) => object.serialize(serializer),
            LogArg::Error(error) => serializer.serialize_str(&error.to_string()),
            LogArg::Opaque(_) => Err(S::Error::custom(
                "opaque log argument cannot be serialized",
            )),
        }
    }
}

impl PartialEq for LogArg {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (LogArg::Value(a), LogArg::Value(b)) => a == b,
            (LogArg::Object(a), LogArg::Object(b)) => a == b,
            (LogArg::Error(a), LogArg::Error(b)) => Arc::ptr_eq(a, b),
            (LogArg::Opaque(a), LogArg::Opaque(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for LogArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogArg::Value(Value::String(s)) => write!(f, "{}", s),
            LogArg::Value(value) => write!(f, "{}", value),
            LogArg::Object(_) => write!(f, "{}", self.to_json_lossy()),
            LogArg::Error(error) => write!(f, "{}", error),
            LogArg::Opaque(value) => write!(f, "{:?}", value),
        }
    }
}

impl From<Value> for LogArg {
    fn from(value: Value) -> Self {
        LogArg::Value(value)
    }
}

impl From<&str> for LogArg {
    fn from(s: &str) -> Self {
        LogArg::Value(Value::String(s.to_string()))
    }
}

impl From<String> for LogArg {
    fn from(s: String) -> Self {
        LogArg::Value(Value::String(s))
    }
}

impl From<&String> for LogArg {
    fn from(s: &String) -> Self {
        LogArg::Value(Value::String(s.clone()))
    }
}

impl From<bool> for LogArg {
    fn from(b: bool) -> Self {
        LogArg::Value(Value::Bool(b))
    }
}

impl From<i32> for LogArg {
    fn from(i: i32) -> Self {
        LogArg::Value(i.into())
    }
}

impl From<i64> for LogArg {
    fn from(i: i64) -> Self {
        LogArg::Value(i.into())
    }
}

impl From<u32> for LogArg {
    fn from(i: u32) -> Self {
        LogArg::Value(i.into())
    }
}

impl From<u64> for LogArg {
    fn from(i: u64) -> Self {
        LogArg::Value(i.into())
    }
}

impl From<usize> for LogArg {
    fn from(i: usize) -> Self {
        LogArg::Value(i.into())
    }
}

impl From<f64> for LogArg {
    fn from(f: f64) -> Self {
        LogArg::Value(f.into())
    }
}

impl From<InputLogObject> for LogArg {
    fn from(object: InputLogObject) -> Self {
        LogArg::Object(Box::new(object))
    }
}

/// Conversion of a call's argument list into [`LogArg`]s.
///
/// Implemented for single values, arrays, vectors and tuples of up to six
/// heterogeneous values, so `logger.info(("port", 8080))` works.
pub trait IntoLogArgs {
    fn into_log_args(self) -> Vec<LogArg>;
}

impl IntoLogArgs for () {
    fn into_log_args(self) -> Vec<LogArg> {
        Vec::new()
    }
}

macro_rules! impl_into_log_args_single {
    ($($ty:ty),*) => {
        $(
            impl IntoLogArgs for $ty {
                fn into_log_args(self) -> Vec<LogArg> {
                    vec![LogArg::from(self)]
                }
            }
        )*
    };
}

impl_into_log_args_single!(
    LogArg, Value, InputLogObject, &str, String, &String, bool, i32, i64, u32, u64, usize, f64
);

impl<T: Into<LogArg>> IntoLogArgs for Vec<T> {
    fn into_log_args(self) -> Vec<LogArg> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<LogArg>, const N: usize> IntoLogArgs for [T; N] {
    fn into_log_args(self) -> Vec<LogArg> {
        self.into_iter().map(Into::into).collect()
    }
}

macro_rules! impl_into_log_args_tuple {
    ($($name:ident),+) => {
        impl<$($name: Into<LogArg>),+> IntoLogArgs for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_log_args(self) -> Vec<LogArg> {
                let ($($name,)+) = self;
                vec![$($name.into()),+]
            }
        }
    };
}

impl_into_log_args_tuple!(A);
impl_into_log_args_tuple!(A, B);
impl_into_log_args_tuple!(A, B, C);
impl_into_log_args_tuple!(A, B, C, D);
impl_into_log_args_tuple!(A, B, C, D, E);
impl_into_log_args_tuple!(A, B, C, D, E, F);
