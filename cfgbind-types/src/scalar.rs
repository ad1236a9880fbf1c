//! Scalar kinds and values.
//!
//! A field binding names its scalar kind with one of the keywords
//! `string`, `integer`, `float`, `double` or `boolean`. Raw text read from a
//! configuration tree is cast to that kind with [`ScalarValue::cast`].

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The scalar kinds a field binding may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    String,
    Integer,
    Float,
    Double,
    Boolean,
}

impl ScalarKind {
    /// All kinds, in declaration order.
    pub const ALL: [ScalarKind; 5] = [
        ScalarKind::String,
        ScalarKind::Integer,
        ScalarKind::Float,
        ScalarKind::Double,
        ScalarKind::Boolean,
    ];

    /// The keyword used for this kind in field bindings.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Integer => "integer",
            ScalarKind::Float => "float",
            ScalarKind::Double => "double",
            ScalarKind::Boolean => "boolean",
        }
    }

    /// Looks up a kind by its keyword. Returns `None` for anything else.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.keyword() == keyword)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for ScalarKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_keyword(s).ok_or_else(|| Error::UnknownScalarKind(s.to_string()))
    }
}

/// A typed scalar value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ScalarValue {
    String(String),
    Integer(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
}

impl ScalarValue {
    /// Casts raw configuration text to the given kind.
    ///
    /// Numeric kinds tolerate surrounding whitespace. Booleans accept
    /// `true`/`false`, `yes`/`no` and `1`/`0`, case-insensitively.
    pub fn cast(raw: &str, kind: ScalarKind) -> Result<Self> {
        let invalid = || Error::InvalidScalar {
            kind,
            raw: raw.to_string(),
        };
        let trimmed = raw.trim();
        match kind {
            ScalarKind::String => Ok(ScalarValue::String(raw.to_string())),
            ScalarKind::Integer => trimmed
                .parse::<i64>()
                .map(ScalarValue::Integer)
                .map_err(|_| invalid()),
            ScalarKind::Float => trimmed
                .parse::<f32>()
                .map(ScalarValue::Float)
                .map_err(|_| invalid()),
            ScalarKind::Double => trimmed
                .parse::<f64>()
                .map(ScalarValue::Double)
                .map_err(|_| invalid()),
            ScalarKind::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(ScalarValue::Boolean(true)),
                "false" | "no" | "0" => Ok(ScalarValue::Boolean(false)),
                _ => Err(invalid()),
            },
        }
    }

    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ScalarKind {
        match self {
            ScalarValue::String(_) => ScalarKind::String,
            ScalarValue::Integer(_) => ScalarKind::Integer,
            ScalarValue::Float(_) => ScalarKind::Float,
            ScalarValue::Double(_) => ScalarKind::Double,
            ScalarValue::Boolean(_) => ScalarKind::Boolean,
        }
    }

    /// Returns the string payload, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::String(s) => f.write_str(s),
            ScalarValue::Integer(i) => write!(f, "{i}"),
            ScalarValue::Float(v) => write!(f, "{v}"),
            ScalarValue::Double(v) => write!(f, "{v}"),
            ScalarValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// A Rust type that can back a scalar field.
///
/// Implemented for `String`, `i64`, `f32`, `f64` and `bool`, one per
/// [`ScalarKind`].
pub trait ScalarType: Clone + Send + Sync + 'static {
    /// The kind declared for fields of this type.
    const KIND: ScalarKind;

    /// Extracts a value of this type. Returns `None` on a kind mismatch.
    fn from_scalar(value: ScalarValue) -> Option<Self>;

    /// Wraps this value as a [`ScalarValue`].
    fn into_scalar(self) -> ScalarValue;
}

impl ScalarType for String {
    const KIND: ScalarKind = ScalarKind::String;

    fn from_scalar(value: ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::String(s) => Some(s),
            _ => None,
        }
    }

    fn into_scalar(self) -> ScalarValue {
        ScalarValue::String(self)
    }
}

impl ScalarType for i64 {
    const KIND: ScalarKind = ScalarKind::Integer;

    fn from_scalar(value: ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Integer(i) => Some(i),
            _ => None,
        }
    }

    fn into_scalar(self) -> ScalarValue {
        ScalarValue::Integer(self)
    }
}

impl ScalarType for f32 {
    const KIND: ScalarKind = ScalarKind::Float;

    fn from_scalar(value: ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Float(v) => Some(v),
            _ => None,
        }
    }

    fn into_scalar(self) -> ScalarValue {
        ScalarValue::Float(self)
    }
}

impl ScalarType for f64 {
    const KIND: ScalarKind = ScalarKind::Double;

    fn from_scalar(value: ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Double(v) => Some(v),
            _ => None,
        }
    }

    fn into_scalar(self) -> ScalarValue {
        ScalarValue::Double(self)
    }
}

impl ScalarType for bool {
    const KIND: ScalarKind = ScalarKind::Boolean;

    fn from_scalar(value: ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Boolean(b) => Some(b),
            _ => None,
        }
    }

    fn into_scalar(self) -> ScalarValue {
        ScalarValue::Boolean(self)
    }
}
