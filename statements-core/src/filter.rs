//! Typed filter variants and their matching semantics.
//!
//! Matching never fails loudly: a value of the wrong shape, an absent field or an
//! unparseable date all resolve to "no match".

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::field::{FieldKind, FieldValue, FieldValueAccessor};
use crate::time::parse_little_endian;

/// Conditions available to [`DateFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateCondition {
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
    Equal,
    NotEqual,
}

/// Conditions available to [`NumberFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NumberCondition {
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
    Equal,
    NotEqual,
}

/// Conditions available to [`StringFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StringCondition {
    Equal,
    NotEqual,
    Contain,
    NotContain,
}

impl DateCondition {
    /// `ord` is `left.cmp(&right)`.
    fn holds(self, ord: Ordering) -> bool {
        match self {
            DateCondition::LessThan => ord.is_lt(),
            DateCondition::LessThanEqual => ord.is_le(),
            DateCondition::GreaterThan => ord.is_gt(),
            DateCondition::GreaterThanEqual => ord.is_ge(),
            DateCondition::Equal => ord.is_eq(),
            DateCondition::NotEqual => ord.is_ne(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DateCondition::LessThan => "LESS_THAN",
            DateCondition::LessThanEqual => "LESS_THAN_EQUAL",
            DateCondition::GreaterThan => "GREATER_THAN",
            DateCondition::GreaterThanEqual => "GREATER_THAN_EQUAL",
            DateCondition::Equal => "EQUAL",
            DateCondition::NotEqual => "NOT_EQUAL",
        }
    }
}

impl NumberCondition {
    /// `ord` is `left.cmp(&right)`.
    fn holds(self, ord: Ordering) -> bool {
        match self {
            NumberCondition::LessThan => ord.is_lt(),
            NumberCondition::LessThanEqual => ord.is_le(),
            NumberCondition::GreaterThan => ord.is_gt(),
            NumberCondition::GreaterThanEqual => ord.is_ge(),
            NumberCondition::Equal => ord.is_eq(),
            NumberCondition::NotEqual => ord.is_ne(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NumberCondition::LessThan => "LESS_THAN",
            NumberCondition::LessThanEqual => "LESS_THAN_EQUAL",
            NumberCondition::GreaterThan => "GREATER_THAN",
            NumberCondition::GreaterThanEqual => "GREATER_THAN_EQUAL",
            NumberCondition::Equal => "EQUAL",
            NumberCondition::NotEqual => "NOT_EQUAL",
        }
    }
}

impl StringCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            StringCondition::Equal => "EQUAL",
            StringCondition::NotEqual => "NOT_EQUAL",
            StringCondition::Contain => "CONTAIN",
            StringCondition::NotContain => "NOT_CONTAIN",
        }
    }
}

/// A filter applied to a date field.
///
/// `comparison` is kept as the raw `DD.MM.YYYY` string and parsed on every match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFilter {
    pub field: String,
    pub condition: DateCondition,
    pub comparison: String,
}

impl DateFilter {
    /// Evaluates `value <condition> comparison`.
    ///
    /// Accepts a date or a `DD.MM.YYYY` string.
    pub fn matches(&self, value: FieldValue<'_>) -> bool {
        let value = match value {
            FieldValue::Date(d) => d,
            FieldValue::Text(s) => match parse_little_endian(s) {
                Ok(d) => d,
                Err(_) => return false,
            },
            FieldValue::Integer(_) | FieldValue::Absent => return false,
        };

        let Ok(comparison) = parse_little_endian(&self.comparison) else {
            return false;
        };

        self.condition.holds(value.cmp(&comparison))
    }
}

/// A filter applied to an integer field (minor currency units for amounts).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFilter {
    pub field: String,
    pub condition: NumberCondition,
    pub comparison: i64,
}

impl NumberFilter {
    /// Evaluates `value <condition> comparison`.
    ///
    /// Accepts an integer or a base-10 integer string.
    pub fn matches(&self, value: FieldValue<'_>) -> bool {
        let value = match value {
            FieldValue::Integer(i) => i,
            FieldValue::Text(s) => match s.trim().parse::<i64>() {
                Ok(i) => i,
                Err(_) => return false,
            },
            FieldValue::Date(_) | FieldValue::Absent => return false,
        };

        self.condition.holds(value.cmp(&self.comparison))
    }
}

/// A filter applied to a text field. Comparisons are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringFilter {
    pub field: String,
    pub condition: StringCondition,
    pub comparison: String,
}

impl StringFilter {
    pub fn matches(&self, value: FieldValue<'_>) -> bool {
        let FieldValue::Text(s) = value else {
            return false;
        };

        let comparison = self.comparison.as_str();
        match self.condition {
            StringCondition::Equal => s == comparison,
            StringCondition::NotEqual => s != comparison,
            StringCondition::Contain => s.contains(comparison),
            StringCondition::NotContain => !s.contains(comparison),
        }
    }
}

/// A single decoded condition over one named field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Date(DateFilter),
    Number(NumberFilter),
    String(StringFilter),
}

impl Filter {
    pub fn field_name(&self) -> &str {
        match self {
            Filter::Date(f) => &f.field,
            Filter::Number(f) => &f.field,
            Filter::String(f) => &f.field,
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Filter::Date(_) => FieldKind::Date,
            Filter::Number(_) => FieldKind::Number,
            Filter::String(_) => FieldKind::String,
        }
    }

    /// If the value satisfies this filter's condition.
    pub fn matches(&self, value: FieldValue<'_>) -> bool {
        match self {
            Filter::Date(f) => f.matches(value),
            Filter::Number(f) => f.matches(value),
            Filter::String(f) => f.matches(value),
        }
    }

    /// Looks up this filter's field on `record` and matches it.
    pub fn matches_record<R: FieldValueAccessor + ?Sized>(&self, record: &R) -> bool {
        self.matches(record.field_value(self.field_name()))
    }
}

impl From<DateFilter> for Filter {
    fn from(f: DateFilter) -> Self {
        Filter::Date(f)
    }
}

impl From<NumberFilter> for Filter {
    fn from(f: NumberFilter) -> Self {
        Filter::Number(f)
    }
}

impl From<StringFilter> for Filter {
    fn from(f: StringFilter) -> Self {
        Filter::String(f)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Date(d) => {
                write!(f, "{} {} {:?}", d.field, d.condition.as_str(), d.comparison)
            }
            Filter::Number(n) => {
                write!(f, "{} {} {}", n.field, n.condition.as_str(), n.comparison)
            }
            Filter::String(s) => {
                write!(f, "{} {} {:?}", s.field, s.condition.as_str(), s.comparison)
            }
        }
    }
}
