use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use statements_core::{DecodeError, FieldTypeRegistry, Filter, RawFilter, decode_filters};
use statements_ingest::Bank;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG: &str = "config.json";

/// Contents of `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub flags: FlagConfig,
    #[serde(default)]
    pub filters: Vec<RawFilter>,
}

/// Defaults for CLI flags. Flags given on the command line win.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlagConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl Config {
    /// The configured bank. Missing or unsupported banks are fatal.
    pub fn bank(&self) -> Result<Bank> {
        let Some(name) = self.flags.bank.as_deref() else {
            bail!("no bank configured: set flags.bank in the config file");
        };
        name.parse::<Bank>().with_context(|| format!("unsupported bank {name:?}"))
    }

    /// Decode every configured filter against `bank`'s field registry.
    ///
    /// An unknown field name is reported together with the fields `bank` does know.
    pub fn filters_for(&self, bank: Bank) -> Result<Vec<Filter>> {
        let registry = bank.field_types();
        let filters = decode_filters(&self.filters, registry).map_err(|err| {
            let hint = match err {
                DecodeError::UnknownField { .. } => format!(
                    "invalid filter for bank {bank} (known fields: {})",
                    known_fields(registry)
                ),
                _ => format!("invalid filter for bank {bank}"),
            };
            anyhow::Error::new(err).context(hint)
        })?;
        debug!(count = filters.len(), %bank, "decoded filters");
        Ok(filters)
    }
}

/// Comma separated field names of `registry`, in name order.
pub fn known_fields(registry: &FieldTypeRegistry) -> String {
    registry
        .fields()
        .map(|(name, _)| format!("{name:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn config_path(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG))
}

pub fn load_config(path: &Path) -> Result<Config> {
    let s = fs::read_to_string(path)
        .with_context(|| format!("could not open config file {}", path.display()))?;
    parse_config(&s).with_context(|| format!("could not parse config file {}", path.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(serde_json::from_str(s)?)
}

/// A config that passed validation.
#[derive(Debug)]
pub struct ValidConfig {
    pub bank: Bank,
    pub filters: Vec<Filter>,
}

/// Check that the config parses, names a supported bank and that every filter decodes.
pub fn validate_config(path: &Path) -> Result<ValidConfig> {
    let config = load_config(path)?;
    let bank = config.bank().context("config file invalid")?;
    let filters = config.filters_for(bank).context("config file invalid")?;
    Ok(ValidConfig { bank, filters })
}

#[cfg(test)]
mod tests {
    use super::*;
    use statements_core::FieldKind;

    const VALID: &str = r#"{
        "$schema": "./schema/config.schema.json",
        "flags": {
            "bank": "swedbank",
            "output": "out.csv"
        },
        "filters": [
            {
                "field": "Ieraksta tips",
                "condition": "EQUAL",
                "comparison": "20"
            }
        ]
    }"#;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let p = dir.path().join(name);
        fs::write(&p, content).unwrap();
        p
    }

    #[test]
    fn test_parse_config() {
        let config = parse_config(VALID).unwrap();
        assert_eq!(config.flags.bank.as_deref(), Some("swedbank"));
        assert_eq!(config.flags.output, Some(PathBuf::from("out.csv")));
        assert_eq!(config.flags.input, None);
        assert_eq!(config.filters.len(), 1);
        assert_eq!(config.bank().unwrap(), Bank::Swedbank);
    }

    #[test]
    fn test_filters_default_to_empty() {
        let config = parse_config(r#"{"flags": {"bank": "swedbank"}}"#).unwrap();
        assert!(config.filters.is_empty());
        assert!(config.filters_for(Bank::Swedbank).unwrap().is_empty());
    }

    #[test]
    fn test_flags_are_required() {
        assert!(parse_config(r#"{"filters": []}"#).is_err());
    }

    #[test]
    fn test_missing_bank() {
        let config = parse_config(r#"{"flags": {}}"#).unwrap();
        let err = config.bank().unwrap_err();
        assert!(err.to_string().contains("no bank configured"), "{err}");
    }

    #[test]
    fn test_unsupported_bank() {
        let config = parse_config(r#"{"flags": {"bank": "monzo"}}"#).unwrap();
        let err = config.bank().unwrap_err();
        assert!(format!("{err:#}").contains(r#"must be one of "swedbank""#), "{err:#}");
    }

    #[test]
    fn test_validate_config() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(&dir, "valid.json", VALID);
        let valid = validate_config(&p).unwrap();
        assert_eq!(valid.bank, Bank::Swedbank);
        assert_eq!(valid.filters.len(), 1);
        assert_eq!(valid.filters[0].kind(), FieldKind::String);
    }

    #[test]
    fn test_validate_rejects_bad_files() {
        let dir = tempfile::tempdir().unwrap();

        let err = validate_config(&dir.path().join("nonexistent_file.json")).unwrap_err();
        assert!(err.to_string().contains("could not open"), "{err}");

        let p = write(&dir, "malformed.json", r#"{"flags": {"#);
        let err = validate_config(&p).unwrap_err();
        assert!(err.to_string().contains("parse"), "{err}");

        let p = write(&dir, "no_bank.json", r#"{"flags": {}}"#);
        let err = validate_config(&p).unwrap_err();
        assert!(err.to_string().contains("invalid"), "{err}");

        let p = write(
            &dir,
            "unknown_field.json",
            r#"{"flags": {"bank": "swedbank"}, "filters": [{"field": "Unknown", "condition": "EQUAL", "comparison": "x"}]}"#,
        );
        let err = validate_config(&p).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains(r#"unknown field or type for field "Unknown""#), "{msg}");
    }

    #[test]
    fn test_unknown_field_lists_known_fields() {
        let config = parse_config(
            r#"{"flags": {"bank": "swedbank"}, "filters": [{"field": "Amount", "condition": "EQUAL", "comparison": 1}]}"#,
        )
        .unwrap();
        let err = config.filters_for(Bank::Swedbank).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains(r#"known fields: "Arhīva kods", "Datums", "#), "{msg}");
        assert!(msg.contains(r#""Summa""#), "{msg}");
        assert!(msg.contains(r#"unknown field or type for field "Amount""#), "{msg}");
    }

    #[test]
    fn test_other_decode_errors_have_no_field_hint() {
        let config = parse_config(
            r#"{"flags": {"bank": "swedbank"}, "filters": [{"field": "Summa", "condition": "CONTAIN", "comparison": 1}]}"#,
        )
        .unwrap();
        let err = config.filters_for(Bank::Swedbank).unwrap_err();
        assert!(!format!("{err:#}").contains("known fields"), "{err:#}");
    }

    #[test]
    fn test_known_fields_sorted() {
        let registry: FieldTypeRegistry = [("b", FieldKind::Number), ("a", FieldKind::Date)]
            .into_iter()
            .collect();
        assert_eq!(known_fields(&registry), r#""a", "b""#);
    }

    #[test]
    fn test_config_path_default() {
        assert_eq!(config_path(None), PathBuf::from("config.json"));
        assert_eq!(config_path(Some(Path::new("x.json"))), PathBuf::from("x.json"));
    }
}
