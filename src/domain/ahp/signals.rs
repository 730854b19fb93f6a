//! Pairwise Signals - sparse upper-triangle map of preference signals.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{PreferenceSignal, ValidationError};

/// Sparse map from an index pair `(i, j)` with `i < j` to a preference signal.
///
/// Missing pairs read as neutral. On the wire the map uses `"i_j"` string
/// keys, e.g. `{"0_1": 4, "1_2": -8}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, i32>", into = "BTreeMap<String, i32>")]
pub struct PairwiseSignals {
    signals: BTreeMap<(usize, usize), PreferenceSignal>,
}

impl PairwiseSignals {
    /// Creates an empty signal map (every pair neutral).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for constructing a signal map.
    pub fn builder() -> PairwiseSignalsBuilder {
        PairwiseSignalsBuilder::new()
    }

    /// Formats the wire key for a pair.
    pub fn pair_key(i: usize, j: usize) -> String {
        format!("{}_{}", i, j)
    }

    /// Parses an `"i_j"` wire key.
    pub fn parse_pair_key(key: &str) -> Result<(usize, usize), ValidationError> {
        let invalid = || ValidationError::invalid_format("pair", format!("expected 'i_j', got '{}'", key));

        let (left, right) = key.split_once('_').ok_or_else(invalid)?;
        let i = left.trim().parse::<usize>().map_err(|_| invalid())?;
        let j = right.trim().parse::<usize>().map_err(|_| invalid())?;
        Ok((i, j))
    }

    /// Records the signal for pair `(i, j)`.
    ///
    /// A pair given as `(j, i)` is stored as `(i, j)` with the inverse signal.
    /// Comparing an entity with itself is rejected.
    pub fn set(
        &mut self,
        i: usize,
        j: usize,
        signal: impl Into<PreferenceSignal>,
    ) -> Result<(), ValidationError> {
        let signal = signal.into();
        match i.cmp(&j) {
            std::cmp::Ordering::Less => {
                self.signals.insert((i, j), signal);
            }
            std::cmp::Ordering::Greater => {
                self.signals.insert((j, i), signal.inverse());
            }
            std::cmp::Ordering::Equal => {
                return Err(ValidationError::invalid_format(
                    "pair",
                    format!("entity {} cannot be compared with itself", i),
                ));
            }
        }
        Ok(())
    }

    /// Returns the signal for pair `(i, j)`, neutral when absent.
    pub fn get(&self, i: usize, j: usize) -> PreferenceSignal {
        if i < j {
            self.signals.get(&(i, j)).copied().unwrap_or_default()
        } else if i > j {
            self.signals
                .get(&(j, i))
                .map(|s| s.inverse())
                .unwrap_or_default()
        } else {
            PreferenceSignal::NEUTRAL
        }
    }

    /// Forgets the signal for pair `(i, j)`.
    pub fn clear(&mut self, i: usize, j: usize) {
        let key = if i < j { (i, j) } else { (j, i) };
        self.signals.remove(&key);
    }

    /// Number of explicitly recorded pairs.
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// Returns true if no pair has been recorded.
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Iterates recorded pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), PreferenceSignal)> + '_ {
        self.signals.iter().map(|(k, v)| (*k, *v))
    }

    /// Returns true if every recorded pair addresses an entity below `n`.
    pub fn is_within(&self, n: usize) -> bool {
        self.signals.keys().all(|&(_, j)| j < n)
    }

    /// Removes entity `index` from the indexing.
    ///
    /// Pairs touching `index` are dropped; higher indices shift down by one so
    /// comparisons among the remaining entities are preserved.
    pub fn remove_index(&mut self, index: usize) {
        let shift = |k: usize| if k > index { k - 1 } else { k };
        self.signals = std::mem::take(&mut self.signals)
            .into_iter()
            .filter(|((i, j), _)| *i != index && *j != index)
            .map(|((i, j), s)| ((shift(i), shift(j)), s))
            .collect();
    }
}

impl TryFrom<BTreeMap<String, i32>> for PairwiseSignals {
    type Error = ValidationError;

    fn try_from(raw: BTreeMap<String, i32>) -> Result<Self, Self::Error> {
        let mut signals = PairwiseSignals::new();
        for (key, value) in raw {
            let (i, j) = PairwiseSignals::parse_pair_key(&key)?;
            signals.set(i, j, value)?;
        }
        Ok(signals)
    }
}

impl From<PairwiseSignals> for BTreeMap<String, i32> {
    fn from(signals: PairwiseSignals) -> Self {
        signals
            .signals
            .into_iter()
            .map(|((i, j), s)| (PairwiseSignals::pair_key(i, j), s.value()))
            .collect()
    }
}

/// Builder for constructing PairwiseSignals instances.
#[derive(Debug, Default)]
pub struct PairwiseSignalsBuilder {
    pairs: Vec<(usize, usize, PreferenceSignal)>,
}

impl PairwiseSignalsBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pair signal.
    pub fn pair(mut self, i: usize, j: usize, signal: impl Into<PreferenceSignal>) -> Self {
        self.pairs.push((i, j, signal.into()));
        self
    }

    /// Builds the signal map, failing on self-comparisons.
    pub fn build(self) -> Result<PairwiseSignals, ValidationError> {
        let mut signals = PairwiseSignals::new();
        for (i, j, signal) in self.pairs {
            signals.set(i, j, signal)?;
        }
        Ok(signals)
    }
}
