//! Field values exposed by statement records and the per-bank field kind registry.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;

/// Logical value category a config field name is interpreted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldKind {
    #[default]
    Unknown,
    Date,
    Number,
    String,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldKind::Unknown => "unknown",
            FieldKind::Date => "date",
            FieldKind::Number => "number",
            FieldKind::String => "string",
        };
        f.write_str(s)
    }
}

/// A dynamically-typed value read from a record by field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Date(NaiveDate),
    Integer(i64),
    Text(&'a str),
    /// The record does not expose the requested field.
    Absent,
}

impl From<NaiveDate> for FieldValue<'_> {
    fn from(d: NaiveDate) -> Self {
        FieldValue::Date(d)
    }
}

impl From<i64> for FieldValue<'_> {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(s: &'a str) -> Self {
        FieldValue::Text(s)
    }
}

/// Read access to a record's fields by logical name.
///
/// Unknown names must return [`FieldValue::Absent`]; filters treat that as "no match".
pub trait FieldValueAccessor {
    fn field_value(&self, field: &str) -> FieldValue<'_>;
}

impl<T: FieldValueAccessor + ?Sized> FieldValueAccessor for &T {
    fn field_value(&self, field: &str) -> FieldValue<'_> {
        (**self).field_value(field)
    }
}

impl<T: FieldValueAccessor + ?Sized> FieldValueAccessor for Box<T> {
    fn field_value(&self, field: &str) -> FieldValue<'_> {
        (**self).field_value(field)
    }
}

/// Mapping from config field name (exact, case-sensitive) to its [`FieldKind`].
///
/// One registry exists per bank schema. It is only consulted while decoding filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTypeRegistry {
    fields: BTreeMap<String, FieldKind>,
}

impl FieldTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.insert(field.into(), kind);
        self
    }

    /// Kind for `field`, or [`FieldKind::Unknown`] when unmapped.
    pub fn lookup(&self, field: &str) -> FieldKind {
        self.fields.get(field).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Mapped fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, FieldKind)> {
        self.fields.iter().map(|(name, kind)| (name.as_str(), *kind))
    }
}

impl<'a> FromIterator<(&'a str, FieldKind)> for FieldTypeRegistry {
    fn from_iter<I: IntoIterator<Item = (&'a str, FieldKind)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, kind)| (name.to_string(), kind))
                .collect(),
        }
    }
}
