//! Decoding raw config filters into typed [`Filter`]s.
//!
//! The payload carries no type tag. The variant is picked by looking the `field`
//! name up in the target bank's [`FieldTypeRegistry`], then the whole payload is
//! decoded into that variant's shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::field::{FieldKind, FieldTypeRegistry};
use crate::filter::{DateFilter, Filter, NumberFilter, StringFilter};
use crate::time::parse_little_endian;

/// Errors raised while turning config filters into typed filters.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The payload is not an object with a string `field` key
    #[error("malformed filter: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The field is missing from the bank's registry
    #[error("unknown field or type for field {field:?}")]
    UnknownField { field: String },

    /// The field resolved, but the payload does not fit the variant's shape
    #[error("invalid {kind} filter for field {field:?}: {source}")]
    InvalidFilter {
        field: String,
        kind: FieldKind,
        #[source]
        source: serde_json::Error,
    },
}

impl DecodeError {
    /// The offending field name, when one could be read.
    pub fn field(&self) -> Option<&str> {
        match self {
            DecodeError::Malformed(_) => None,
            DecodeError::UnknownField { field } | DecodeError::InvalidFilter { field, .. } => {
                Some(field)
            }
        }
    }
}

/// A filter as read from config, not yet typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawFilter(Value);

#[derive(Deserialize)]
struct FieldProbe {
    field: String,
}

impl RawFilter {
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    /// Decode into a typed filter, resolving the variant through `registry`.
    pub fn decode(&self, registry: &FieldTypeRegistry) -> Result<Filter, DecodeError> {
        let FieldProbe { field } =
            FieldProbe::deserialize(&self.0).map_err(DecodeError::Malformed)?;

        let kind = registry.lookup(&field);
        let invalid = |source| DecodeError::InvalidFilter {
            field: field.clone(),
            kind,
            source,
        };

        let filter = match kind {
            FieldKind::Date => {
                let f = DateFilter::deserialize(&self.0).map_err(invalid)?;
                if parse_little_endian(&f.comparison).is_err() {
                    warn!(
                        field = %f.field,
                        comparison = %f.comparison,
                        "date filter comparison is not DD.MM.YYYY; it will never match"
                    );
                }
                Filter::Date(f)
            }
            FieldKind::Number => {
                Filter::Number(NumberFilter::deserialize(&self.0).map_err(invalid)?)
            }
            FieldKind::String => {
                Filter::String(StringFilter::deserialize(&self.0).map_err(invalid)?)
            }
            FieldKind::Unknown => return Err(DecodeError::UnknownField { field }),
        };

        debug!(%filter, "decoded filter");
        Ok(filter)
    }
}

impl From<Value> for RawFilter {
    fn from(raw: Value) -> Self {
        Self(raw)
    }
}

/// Decode every raw filter in order, stopping at the first failure.
pub fn decode_filters<'a, I>(
    raws: I,
    registry: &FieldTypeRegistry,
) -> Result<Vec<Filter>, DecodeError>
where
    I: IntoIterator<Item = &'a RawFilter>,
{
    raws.into_iter().map(|raw| raw.decode(registry)).collect()
}
