//! Execution results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{HalError, HalResult};
use crate::program::ProgramId;

/// Measurement counts keyed by bit-string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts(BTreeMap<String, u64>);

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` observations of `bitstring`, saturating at `u64::MAX`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        let entry = self.0.entry(bitstring.into()).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    /// Count for one bit-string, zero if never observed.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// Number of distinct bit-strings.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if nothing was observed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counts, saturating at `u64::MAX`.
    pub fn total_shots(&self) -> u64 {
        self.checked_total().unwrap_or(u64::MAX)
    }

    /// Sum of all counts, or `None` if it does not fit in a `u64`.
    pub fn checked_total(&self) -> Option<u64> {
        self.0
            .values()
            .try_fold(0u64, |total, &count| total.checked_add(count))
    }

    /// Entries sorted by descending count, ties broken by bit-string.
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// The most frequent outcome.
    pub fn most_frequent(&self) -> Option<(&String, &u64)> {
        self.sorted().into_iter().next()
    }

    /// Relative frequency of each bit-string.
    #[allow(clippy::cast_precision_loss)]
    pub fn probabilities(&self) -> BTreeMap<String, f64> {
        let total = self.total_shots();
        if total == 0 {
            return BTreeMap::new();
        }
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), *v as f64 / total as f64))
            .collect()
    }

    /// Iterate in bit-string order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.0.iter()
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (k, v) in iter {
            counts.insert(k, v);
        }
        counts
    }
}

/// Result of executing a synthesized program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement counts.
    pub counts: Counts,
    /// Number of shots requested.
    pub shots: u32,
    /// Wall-clock execution time reported by the platform.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
    /// Program that produced these counts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_id: Option<ProgramId>,
}

impl ExecutionResult {
    /// Create a new result.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
            program_id: None,
        }
    }

    /// Set the execution time.
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }

    /// Set the program id.
    pub fn with_program_id(mut self, id: ProgramId) -> Self {
        self.program_id = Some(id);
        self
    }

    /// Reject results whose counts do not add up to the requested shots.
    pub fn verify_shots(self) -> HalResult<Self> {
        let total = self
            .counts
            .checked_total()
            .ok_or_else(|| HalError::Execution("counts overflow".into()))?;
        if total != u64::from(self.shots) {
            return Err(HalError::Execution(format!(
                "counts sum to {total} but {} shots were requested",
                self.shots
            )));
        }
        Ok(self)
    }
}
