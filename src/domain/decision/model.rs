//! Decision Model - criteria, alternatives and the pairwise comparisons between them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::ahp::PairwiseSignals;
use crate::domain::foundation::{AlternativeId, CriterionId, PreferenceSignal, ValidationError};

use super::DecisionAnalysis;

/// Criteria offered by a freshly seeded model.
pub const DEFAULT_CRITERIA: &[&str] = &[
    "Learning Curve",
    "Job Market",
    "Ecosystem",
    "Versatility",
    "Salary Potential",
];

/// Alternatives offered by a freshly seeded model.
pub const DEFAULT_ALTERNATIVES: &[&str] = &["Python", "JavaScript/TS", "Java", "C#", "Go"];

/// A decision criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: CriterionId,
    pub name: String,
}

/// A decision alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    pub id: AlternativeId,
    pub name: String,
}

/// Mutable input state of an AHP decision.
///
/// Criteria and alternatives are ordered; position defines the matrix index.
/// Alternative comparisons are stored per criterion id, so renaming or
/// reordering criteria never detaches comparisons already entered.
#[derive(Debug, Clone, Default)]
pub struct DecisionModel {
    criteria: Vec<Criterion>,
    alternatives: Vec<Alternative>,
    criteria_signals: PairwiseSignals,
    alternative_signals: HashMap<CriterionId, PairwiseSignals>,
}

impl DecisionModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a model seeded with the default criteria and alternatives.
    pub fn with_defaults() -> Self {
        let mut model = Self::new();
        for name in DEFAULT_CRITERIA {
            model.push_criterion(name.to_string());
        }
        for name in DEFAULT_ALTERNATIVES {
            model.push_alternative(name.to_string());
        }
        model
    }

    fn validated_name(name: impl Into<String>, field: &str) -> Result<String, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field(field));
        }
        Ok(name)
    }

    fn push_criterion(&mut self, name: String) -> CriterionId {
        let id = CriterionId::new();
        self.criteria.push(Criterion { id, name });
        id
    }

    fn push_alternative(&mut self, name: String) -> AlternativeId {
        let id = AlternativeId::new();
        self.alternatives.push(Alternative { id, name });
        id
    }

    // ─────────────────────────────────────────────────────────────────────
    // Entities
    // ─────────────────────────────────────────────────────────────────────

    /// Appends a criterion.
    pub fn add_criterion(&mut self, name: impl Into<String>) -> Result<CriterionId, ValidationError> {
        let name = Self::validated_name(name, "criterion name")?;
        Ok(self.push_criterion(name))
    }

    /// Appends a criterion labelled `"Criterion {n}"`.
    pub fn add_default_criterion(&mut self) -> CriterionId {
        let name = format!("Criterion {}", self.criteria.len() + 1);
        self.push_criterion(name)
    }

    /// Appends an alternative.
    pub fn add_alternative(
        &mut self,
        name: impl Into<String>,
    ) -> Result<AlternativeId, ValidationError> {
        let name = Self::validated_name(name, "alternative name")?;
        Ok(self.push_alternative(name))
    }

    /// Appends an alternative labelled `"Alternative {n}"`.
    pub fn add_default_alternative(&mut self) -> AlternativeId {
        let name = format!("Alternative {}", self.alternatives.len() + 1);
        self.push_alternative(name)
    }

    /// Renames a criterion. Comparisons are untouched.
    pub fn rename_criterion(
        &mut self,
        id: CriterionId,
        name: impl Into<String>,
    ) -> Result<(), ValidationError> {
        let name = Self::validated_name(name, "criterion name")?;
        let index = self.criterion_index(id)?;
        self.criteria[index].name = name;
        Ok(())
    }

    /// Renames an alternative. Comparisons are untouched.
    pub fn rename_alternative(
        &mut self,
        id: AlternativeId,
        name: impl Into<String>,
    ) -> Result<(), ValidationError> {
        let name = Self::validated_name(name, "alternative name")?;
        let index = self.alternative_index(id)?;
        self.alternatives[index].name = name;
        Ok(())
    }

    /// Removes a criterion together with its alternative comparisons.
    ///
    /// Criteria comparisons among the remaining criteria are kept.
    pub fn remove_criterion(&mut self, id: CriterionId) -> Result<Criterion, ValidationError> {
        let index = self.criterion_index(id)?;
        let removed = self.criteria.remove(index);
        self.criteria_signals.remove_index(index);
        self.alternative_signals.remove(&id);
        Ok(removed)
    }

    /// Removes an alternative from the model and from every criterion's comparisons.
    pub fn remove_alternative(&mut self, id: AlternativeId) -> Result<Alternative, ValidationError> {
        let index = self.alternative_index(id)?;
        let removed = self.alternatives.remove(index);
        for signals in self.alternative_signals.values_mut() {
            signals.remove_index(index);
        }
        Ok(removed)
    }

    /// Returns the position of a criterion.
    pub fn criterion_index(&self, id: CriterionId) -> Result<usize, ValidationError> {
        self.criteria
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| ValidationError::unknown_entity("criterion", id.to_string()))
    }

    /// Returns the position of an alternative.
    pub fn alternative_index(&self, id: AlternativeId) -> Result<usize, ValidationError> {
        self.alternatives
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| ValidationError::unknown_entity("alternative", id.to_string()))
    }

    /// Finds a criterion by id.
    pub fn find_criterion(&self, id: CriterionId) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.id == id)
    }

    /// Finds an alternative by id.
    pub fn find_alternative(&self, id: AlternativeId) -> Option<&Alternative> {
        self.alternatives.iter().find(|a| a.id == id)
    }

    /// Returns the criteria in order.
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Returns the alternatives in order.
    pub fn alternatives(&self) -> &[Alternative] {
        &self.alternatives
    }

    /// Returns the criterion labels in order.
    pub fn criterion_names(&self) -> Vec<&str> {
        self.criteria.iter().map(|c| c.name.as_str()).collect()
    }

    /// Returns the alternative labels in order.
    pub fn alternative_names(&self) -> Vec<&str> {
        self.alternatives.iter().map(|a| a.name.as_str()).collect()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Comparisons
    // ─────────────────────────────────────────────────────────────────────

    fn check_pair(field: &str, i: usize, j: usize, n: usize) -> Result<(), ValidationError> {
        for index in [i, j] {
            if index >= n {
                return Err(ValidationError::out_of_range(
                    field,
                    0,
                    n as i64 - 1,
                    index as i64,
                ));
            }
        }
        Ok(())
    }

    /// Records how much criterion `i` is preferred over criterion `j`.
    pub fn set_criteria_signal(
        &mut self,
        i: usize,
        j: usize,
        signal: impl Into<PreferenceSignal>,
    ) -> Result<(), ValidationError> {
        Self::check_pair("criterion index", i, j, self.criteria.len())?;
        self.criteria_signals.set(i, j, signal)
    }

    /// Records how much alternative `i` is preferred over alternative `j`
    /// with respect to one criterion.
    pub fn set_alternative_signal(
        &mut self,
        criterion_id: CriterionId,
        i: usize,
        j: usize,
        signal: impl Into<PreferenceSignal>,
    ) -> Result<(), ValidationError> {
        self.criterion_index(criterion_id)?;
        Self::check_pair("alternative index", i, j, self.alternatives.len())?;
        self.alternative_signals
            .entry(criterion_id)
            .or_default()
            .set(i, j, signal)
    }

    /// Replaces all criteria comparisons.
    pub fn replace_criteria_signals(&mut self, signals: PairwiseSignals) -> Result<(), ValidationError> {
        if !signals.is_within(self.criteria.len()) {
            return Err(ValidationError::invalid_format(
                "criteria comparisons",
                "pair index beyond the number of criteria",
            ));
        }
        self.criteria_signals = signals;
        Ok(())
    }

    /// Replaces the alternative comparisons for one criterion.
    pub fn replace_alternative_signals(
        &mut self,
        criterion_id: CriterionId,
        signals: PairwiseSignals,
    ) -> Result<(), ValidationError> {
        self.criterion_index(criterion_id)?;
        if !signals.is_within(self.alternatives.len()) {
            return Err(ValidationError::invalid_format(
                "alternative comparisons",
                "pair index beyond the number of alternatives",
            ));
        }
        self.alternative_signals.insert(criterion_id, signals);
        Ok(())
    }

    /// Returns the criteria comparisons.
    pub fn criteria_signals(&self) -> &PairwiseSignals {
        &self.criteria_signals
    }

    /// Returns the alternative comparisons for a criterion, if any were entered.
    pub fn alternative_signals(&self, criterion_id: CriterionId) -> Option<&PairwiseSignals> {
        self.alternative_signals.get(&criterion_id)
    }

    /// Runs the full AHP pipeline over the current input.
    pub fn evaluate(&self, threshold: f64) -> DecisionAnalysis {
        DecisionAnalysis::compute(self, threshold)
    }
}
