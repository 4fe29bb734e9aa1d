use hashbrown::{HashMap, HashSet};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::RecommendError;
use crate::recommender::pick_best;

/// Precomputed k-nearest-neighbor row for one coffee: neighbor names ordered
/// nearest-first with their ratings in a parallel list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeighborEntry {
    pub neighbors: Vec<String>,
    pub ratings: Vec<f64>,
}

impl NeighborEntry {
    pub fn pairs(&self) -> impl Iterator<Item = (&str, f64)> {
        self.neighbors
            .iter()
            .map(String::as_str)
            .zip_eq(self.ratings.iter().copied())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NeighborTable {
    entries: HashMap<String, NeighborEntry>,
}

impl NeighborTable {
    pub fn new(entries: HashMap<String, NeighborEntry>) -> Self {
        NeighborTable { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Size of the largest neighbor list, the `k` the table was built with.
    pub fn neighborhood_size(&self) -> usize {
        self.entries
            .values()
            .map(|entry| entry.neighbors.len())
            .max()
            .unwrap_or(0)
    }

    fn entry(&self, name: &str) -> Result<&NeighborEntry, RecommendError> {
        self.entries
            .get(name)
            .ok_or_else(|| RecommendError::UnknownItem(name.to_string()))
    }

    pub fn recommend(&self, inputs: &[&str]) -> Result<String, RecommendError> {
        match inputs {
            [single] => self.recommend_single(single),
            [first, second] => self.recommend_pair(first, second),
            _ => Err(RecommendError::InvalidInputCount(inputs.len())),
        }
    }

    fn recommend_single(&self, name: &str) -> Result<String, RecommendError> {
        let entry = self.entry(name)?;
        pick_best(entry.pairs()).ok_or(RecommendError::EmptyCandidatePool)
    }

    fn recommend_pair(&self, first: &str, second: &str) -> Result<String, RecommendError> {
        let first_entry = self.entry(first)?;
        let second_entry = self.entry(second)?;

        let second_names: HashSet<&str> = second_entry
            .neighbors
            .iter()
            .map(String::as_str)
            .collect();

        // Overlap candidates keep the rating stored in the first input's row,
        // which is not necessarily the candidate's own catalog rating.
        let overlap = first_entry
            .pairs()
            .filter(|(name, _)| second_names.contains(name));
        if let Some(winner) = pick_best(overlap) {
            return Ok(winner);
        }

        // No overlap: scan both rows in order, first-seen rating wins per name.
        let mut seen: HashSet<&str> =
            HashSet::with_capacity(first_entry.neighbors.len() + second_entry.neighbors.len());
        let union = first_entry
            .pairs()
            .chain(second_entry.pairs())
            .filter(|(name, _)| seen.insert(*name));
        pick_best(union).ok_or(RecommendError::EmptyCandidatePool)
    }
}
