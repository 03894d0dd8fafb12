// Typed model of the presets input object consumed by the matrix and step
// generators. Deserialization doubles as validation: unknown keys and
// mistyped values are rejected.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// The full presets object: preset name → configuration.
pub type PresetMap = BTreeMap<String, PresetDefinition>;

/// Per-preset configuration.
///
/// Every field is optional; the matrix generator fills `runs-on` and
/// `toolchain` from its defaults when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PresetDefinition {
    #[serde(rename = "runs-on", skip_serializing_if = "Option::is_none")]
    pub runs_on: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub toolchain: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<ArtifactConfig>,
}

/// Artifact storage configuration attached to a preset, or supplied directly
/// to the step generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactConfig {
    /// Paths to collect, in the upload-artifact glob dialect
    /// (`!`-prefixed entries exclude).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_days: Option<u32>,
}

impl ArtifactConfig {
    /// True when no field is set; an empty config behaves as "not supplied".
    pub fn is_empty(&self) -> bool {
        self.path.is_none() && self.retention_days.is_none()
    }

    /// Parse an artifact config from a JSON string.
    ///
    /// An empty or `''` input (the workflow passes the literal quotes when
    /// the matrix carries no artifact entry) yields the empty config.
    pub fn parse(input: &str) -> Result<Self, PresetError> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed == "''" {
            return Ok(Self::default());
        }

        let value: serde_json::Value =
            serde_json::from_str(trimmed).map_err(PresetError::Decode)?;
        serde_json::from_value(value).map_err(PresetError::Validation)
    }
}

/// Error raised while parsing or validating a presets object.
#[derive(Debug, Error)]
pub enum PresetError {
    /// The input was not valid JSON at all.
    #[error("JSON decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// The JSON was well-formed but does not match the recognized preset
    /// shape.
    #[error("Preset validation error: {0}")]
    Validation(#[source] serde_json::Error),
}

/// Parse and validate a presets JSON object.
pub fn parse_presets(json: &str) -> Result<PresetMap, PresetError> {
    let value: serde_json::Value = serde_json::from_str(json).map_err(PresetError::Decode)?;
    serde_json::from_value(value).map_err(PresetError::Validation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_presets() {
        let presets = parse_presets(
            r#"{
                "debug": {
                    "toolchain": "gcc",
                    "artifact": {"path": ["build/tests", "!build/tests/broken_tests"], "retention_days": 7}
                },
                "release": {},
                "macos": {"runs-on": "macos-latest"}
            }"#,
        )
        .unwrap();

        assert_eq!(presets.len(), 3);
        assert_eq!(presets["debug"].toolchain.as_deref(), Some("gcc"));
        let artifact = presets["debug"].artifact.as_ref().unwrap();
        assert_eq!(artifact.retention_days, Some(7));
        assert_eq!(artifact.path.as_ref().unwrap().len(), 2);
        assert_eq!(presets["release"], PresetDefinition::default());
        assert_eq!(presets["macos"].runs_on.as_deref(), Some("macos-latest"));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = parse_presets("{key: value}").unwrap_err();
        assert!(matches!(err, PresetError::Decode(_)));
        assert!(err.to_string().starts_with("JSON decode error"));
    }

    #[test]
    fn non_object_preset_value_is_rejected() {
        let err = parse_presets(r#"{"int": 1, "bool": true}"#).unwrap_err();
        assert!(matches!(err, PresetError::Validation(_)));
        assert!(err.to_string().starts_with("Preset validation error"));
    }

    #[test]
    fn mistyped_artifact_path_is_rejected() {
        let err = parse_presets(
            r#"{"debug": {"toolchain": "gcc", "artifact": {"path": 123, "retention_days": 7}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, PresetError::Validation(_)));
    }

    #[test]
    fn unknown_preset_field_is_rejected() {
        let err = parse_presets(r#"{"debug": {"toolchains": "gcc"}}"#).unwrap_err();
        assert!(matches!(err, PresetError::Validation(_)));
    }

    #[test]
    fn artifact_parse_treats_empty_as_unset() {
        assert!(ArtifactConfig::parse("").unwrap().is_empty());
        assert!(ArtifactConfig::parse("  ").unwrap().is_empty());
        assert!(ArtifactConfig::parse("''").unwrap().is_empty());
        assert!(ArtifactConfig::parse("{}").unwrap().is_empty());
    }

    #[test]
    fn artifact_parse_reads_fields() {
        let artifact =
            ArtifactConfig::parse(r#"{"path": ["dir1", "dir2"], "retention_days": 5}"#).unwrap();
        assert_eq!(artifact.path.as_ref().unwrap().len(), 2);
        assert_eq!(artifact.retention_days, Some(5));
        assert!(!artifact.is_empty());
    }

    #[test]
    fn artifact_round_trips_through_json() {
        let artifact = ArtifactConfig {
            path: Some(vec!["build/artifacts".into()]),
            retention_days: Some(14),
        };
        let json = serde_json::to_string(&artifact).unwrap();
        assert_eq!(ArtifactConfig::parse(&json).unwrap(), artifact);
    }
}
