//! Decision file adapter - reads and writes decisions as YAML or JSON.
//!
//! Files reference criteria by name so they stay hand-editable:
//!
//! ```yaml
//! criteria: [Cost, Comfort]
//! alternatives: [Bike, Car]
//! criteria_comparisons:
//!   "0_1": 2
//! alternative_comparisons:
//!   Cost:
//!     "0_1": 4
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::domain::ahp::PairwiseSignals;
use crate::domain::decision::DecisionModel;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors raised while reading or writing decision files.
#[derive(Debug, Error)]
pub enum DecisionFileError {
    #[error("Failed to read decision file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported decision file extension '{0}' (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),

    #[error("Invalid decision: {0}")]
    Invalid(#[from] ValidationError),
}

impl From<DecisionFileError> for DomainError {
    fn from(err: DecisionFileError) -> Self {
        match err {
            DecisionFileError::Invalid(inner) => inner.into(),
            other => DomainError::new(ErrorCode::DecisionFileError, other.to_string()),
        }
    }
}

/// Serialization format of a decision file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionFileFormat {
    Yaml,
    Json,
}

impl DecisionFileFormat {
    /// Infers the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, DecisionFileError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(DecisionFileError::UnsupportedFormat(ext)),
        }
    }
}

/// On-disk representation of a decision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecisionFile {
    pub criteria: Vec<String>,
    pub alternatives: Vec<String>,
    #[serde(default)]
    pub criteria_comparisons: PairwiseSignals,
    /// Alternative comparisons keyed by criterion name.
    #[serde(default)]
    pub alternative_comparisons: BTreeMap<String, PairwiseSignals>,
}

impl DecisionFile {
    /// Parses file content in the given format.
    pub fn parse(content: &str, format: DecisionFileFormat) -> Result<Self, DecisionFileError> {
        let file = match format {
            DecisionFileFormat::Yaml => serde_yaml::from_str(content)?,
            DecisionFileFormat::Json => serde_json::from_str(content)?,
        };
        Ok(file)
    }

    /// Reads and parses a file, inferring the format from its extension.
    pub fn load(path: &Path) -> Result<Self, DecisionFileError> {
        let format = DecisionFileFormat::from_path(path)?;
        let content = fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    /// Renders the file in the given format.
    pub fn render(&self, format: DecisionFileFormat) -> Result<String, DecisionFileError> {
        let content = match format {
            DecisionFileFormat::Yaml => serde_yaml::to_string(self)?,
            DecisionFileFormat::Json => serde_json::to_string_pretty(self)?,
        };
        Ok(content)
    }

    /// Captures a model, keying alternative comparisons by criterion name.
    ///
    /// Fails when two criteria share a name, since their comparisons would collide.
    pub fn from_model(model: &DecisionModel) -> Result<Self, ValidationError> {
        ensure_unique_criteria(model.criterion_names())?;

        let alternative_comparisons = model
            .criteria()
            .iter()
            .filter_map(|c| {
                model
                    .alternative_signals(c.id)
                    .filter(|s| !s.is_empty())
                    .map(|s| (c.name.clone(), s.clone()))
            })
            .collect();

        Ok(Self {
            criteria: model.criterion_names().into_iter().map(String::from).collect(),
            alternatives: model.alternative_names().into_iter().map(String::from).collect(),
            criteria_comparisons: model.criteria_signals().clone(),
            alternative_comparisons,
        })
    }

    /// Builds a decision model from the file.
    ///
    /// Criterion names must be unique since alternative comparisons refer to them.
    pub fn into_model(self) -> Result<DecisionModel, ValidationError> {
        ensure_unique_criteria(self.criteria.iter().map(String::as_str))?;

        let mut model = DecisionModel::new();
        for name in self.criteria {
            model.add_criterion(name)?;
        }
        for name in self.alternatives {
            model.add_alternative(name)?;
        }

        model.replace_criteria_signals(self.criteria_comparisons)?;

        for (criterion_name, signals) in self.alternative_comparisons {
            let criterion_id = model
                .criteria()
                .iter()
                .find(|c| c.name == criterion_name)
                .map(|c| c.id)
                .ok_or_else(|| ValidationError::unknown_entity("criterion", criterion_name.clone()))?;
            model.replace_alternative_signals(criterion_id, signals)?;
        }

        Ok(model)
    }
}

fn ensure_unique_criteria<'a>(
    names: impl IntoIterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    match names.into_iter().find(|name| !seen.insert(*name)) {
        Some(dup) => Err(ValidationError::invalid_format(
            "criteria",
            format!("duplicate criterion name '{}'", dup),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const YAML: &str = r#"
criteria: [Cost, Comfort]
alternatives: [Bike, Car, Bus]
criteria_comparisons:
  "0_1": 2
alternative_comparisons:
  Cost:
    "0_1": 4
    "1_2": -1
"#;

    #[test]
    fn parses_yaml_into_model() {
        let file = DecisionFile::parse(YAML, DecisionFileFormat::Yaml).unwrap();
        let model = file.into_model().unwrap();

        assert_eq!(model.criterion_names(), vec!["Cost", "Comfort"]);
        assert_eq!(model.alternative_names(), vec!["Bike", "Car", "Bus"]);
        assert_eq!(model.criteria_signals().get(0, 1).value(), 2);

        let cost = model.criteria()[0].id;
        let comfort = model.criteria()[1].id;
        assert_eq!(model.alternative_signals(cost).unwrap().get(1, 2).value(), -1);
        assert!(model.alternative_signals(comfort).is_none());
    }

    #[test]
    fn parses_json_with_defaults() {
        let json = r#"{"criteria": ["C"], "alternatives": ["A", "B"]}"#;
        let file = DecisionFile::parse(json, DecisionFileFormat::Json).unwrap();
        assert!(file.criteria_comparisons.is_empty());
        assert!(file.alternative_comparisons.is_empty());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let json = r#"{"criteria": [], "alternatives": [], "weights": {}}"#;
        assert!(matches!(
            DecisionFile::parse(json, DecisionFileFormat::Json),
            Err(DecisionFileError::Json(_))
        ));
    }

    #[test]
    fn unknown_criterion_reference_is_rejected() {
        let yaml = "criteria: [Cost]\nalternatives: [A, B]\nalternative_comparisons:\n  Speed:\n    \"0_1\": 1\n";
        let file = DecisionFile::parse(yaml, DecisionFileFormat::Yaml).unwrap();
        assert!(matches!(
            file.into_model(),
            Err(ValidationError::UnknownEntity { .. })
        ));
    }

    #[test]
    fn duplicate_criterion_names_are_rejected() {
        let file = DecisionFile {
            criteria: vec!["Cost".into(), "Cost".into()],
            alternatives: vec!["A".into()],
            ..Default::default()
        };
        assert!(file.into_model().is_err());
    }

    #[test]
    fn model_with_duplicate_criterion_names_is_not_captured() {
        let mut model = DecisionModel::new();
        let first = model.add_criterion("Cost").unwrap();
        let second = model.add_criterion("Cost").unwrap();
        model.add_alternative("A").unwrap();
        model.add_alternative("B").unwrap();
        model.set_alternative_signal(first, 0, 1, 3).unwrap();
        model.set_alternative_signal(second, 0, 1, -3).unwrap();

        assert!(matches!(
            DecisionFile::from_model(&model),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn out_of_range_pairs_are_rejected() {
        let yaml = "criteria: [A, B]\nalternatives: [x]\ncriteria_comparisons:\n  \"0_5\": 1\n";
        let file = DecisionFile::parse(yaml, DecisionFileFormat::Yaml).unwrap();
        assert!(file.into_model().is_err());
    }

    #[test]
    fn model_survives_file_roundtrip() {
        let original = DecisionFile::parse(YAML, DecisionFileFormat::Yaml).unwrap();
        let model = original.clone().into_model().unwrap();

        let rendered = DecisionFile::from_model(&model)
            .unwrap()
            .render(DecisionFileFormat::Json)
            .unwrap();
        let reparsed = DecisionFile::parse(&rendered, DecisionFileFormat::Json).unwrap();

        assert_eq!(reparsed, original);
    }

    #[test]
    fn format_is_inferred_from_extension() {
        assert_eq!(
            DecisionFileFormat::from_path(Path::new("d.YML")).unwrap(),
            DecisionFileFormat::Yaml
        );
        assert_eq!(
            DecisionFileFormat::from_path(Path::new("d.json")).unwrap(),
            DecisionFileFormat::Json
        );
        assert!(DecisionFileFormat::from_path(Path::new("d.txt")).is_err());
        assert!(DecisionFileFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(YAML.as_bytes()).unwrap();

        let loaded = DecisionFile::load(file.path()).unwrap();
        assert_eq!(loaded.alternatives.len(), 3);
    }

    #[test]
    fn invalid_content_maps_to_domain_error() {
        let err = DecisionFile::parse("criteria: [", DecisionFileFormat::Yaml).unwrap_err();
        let domain: DomainError = err.into();
        assert_eq!(domain.code, ErrorCode::DecisionFileError);
    }
}
