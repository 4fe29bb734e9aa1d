use hashbrown::{HashMap, HashSet};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::RecommendError;
use crate::recommender::pick_best;

/// Cluster assignment for one coffee plus its same-cluster neighbors and
/// their ratings in a parallel list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterEntry {
    pub cluster: u32,
    pub neighbors: Vec<String>,
    pub ratings: Vec<f64>,
}

impl ClusterEntry {
    pub fn pairs(&self) -> impl Iterator<Item = (&str, f64)> {
        self.neighbors
            .iter()
            .map(String::as_str)
            .zip_eq(self.ratings.iter().copied())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ClusterTable {
    entries: HashMap<String, ClusterEntry>,
}

impl ClusterTable {
    pub fn new(entries: HashMap<String, ClusterEntry>) -> Self {
        ClusterTable { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn qty_clusters(&self) -> usize {
        self.entries
            .values()
            .map(|entry| entry.cluster)
            .unique()
            .count()
    }

    fn entry(&self, name: &str) -> Result<&ClusterEntry, RecommendError> {
        self.entries
            .get(name)
            .ok_or_else(|| RecommendError::UnknownItem(name.to_string()))
    }

    pub fn recommend(&self, inputs: &[&str]) -> Result<String, RecommendError> {
        if inputs.is_empty() {
            return Err(RecommendError::InvalidInputCount(0));
        }

        let mut touched_clusters: HashSet<u32> = HashSet::new();
        let mut pool: Vec<(&str, f64)> = Vec::new();
        for name in inputs {
            let entry = self.entry(name)?;
            touched_clusters.insert(entry.cluster);
            pool.extend(entry.pairs());
        }

        // Inputs from a single cluster keep duplicate pool members, which
        // weights coffees appearing in several inputs' neighbor lists.
        // Across clusters the pool is deduplicated, first-seen pair wins.
        if touched_clusters.len() > 1 {
            let mut seen: HashSet<&str> = HashSet::with_capacity(pool.len());
            pool.retain(|(name, _)| seen.insert(*name));
        }

        pick_best(pool.into_iter()).ok_or(RecommendError::EmptyCandidatePool)
    }
}

#[cfg(test)]
mod cluster_table_test {
    use super::*;

    fn table(rows: Vec<(&str, u32, Vec<&str>, Vec<f64>)>) -> ClusterTable {
        let entries = rows
            .into_iter()
            .map(|(name, cluster, neighbors, ratings)| {
                (
                    name.to_string(),
                    ClusterEntry {
                        cluster,
                        neighbors: neighbors.into_iter().map(str::to_string).collect(),
                        ratings,
                    },
                )
            })
            .collect();
        ClusterTable::new(entries)
    }

    #[test]
    fn shared_cluster_keeps_duplicate_candidates() {
        let table = table(vec![
            ("A", 1, vec!["X", "Y"], vec![1.0, 2.0]),
            ("B", 1, vec!["Y", "Z"], vec![9.0, 3.0]),
        ]);
        // Pool is [(X,1),(Y,2),(Y,9),(Z,3)]; Y's second appearance wins.
        assert_eq!("Y", table.recommend(&["A", "B"]).unwrap());
    }

    #[test]
    fn distinct_clusters_deduplicate_first_wins() {
        let table = table(vec![
            ("A", 1, vec!["Y", "X"], vec![2.0, 6.0]),
            ("B", 2, vec!["Y", "Z"], vec![9.0, 3.0]),
        ]);
        // Y is first seen with rating 2.0 from A's row, so X wins with 6.0.
        assert_eq!("X", table.recommend(&["A", "B"]).unwrap());
    }

    #[test]
    fn single_input_returns_best_same_cluster_neighbor() {
        let table = table(vec![("A", 0, vec!["X", "Y", "Z"], vec![4.0, 7.0, 6.0])]);
        assert_eq!("Y", table.recommend(&["A"]).unwrap());
    }

    #[test]
    fn ties_resolve_to_pool_encounter_order() {
        let table = table(vec![
            ("A", 1, vec!["X"], vec![5.0]),
            ("B", 1, vec!["Y"], vec![5.0]),
        ]);
        assert_eq!("X", table.recommend(&["A", "B"]).unwrap());
    }

    #[test]
    fn unknown_item_is_reported() {
        let table = table(vec![("A", 1, vec!["X"], vec![5.0])]);
        assert!(matches!(
            table.recommend(&["Z"]),
            Err(RecommendError::UnknownItem(_))
        ));
    }

    #[test]
    fn empty_inputs_are_rejected() {
        let table = table(vec![("A", 1, vec!["X"], vec![5.0])]);
        assert!(matches!(
            table.recommend(&[]),
            Err(RecommendError::InvalidInputCount(0))
        ));
    }

    #[test]
    fn empty_cluster_entry_yields_empty_candidate_pool() {
        let table = table(vec![("A", 1, vec![], vec![])]);
        assert!(matches!(
            table.recommend(&["A"]),
            Err(RecommendError::EmptyCandidatePool)
        ));
    }

    #[test]
    fn counts_distinct_clusters() {
        let table = table(vec![
            ("A", 1, vec!["X"], vec![5.0]),
            ("B", 1, vec!["Y"], vec![5.0]),
            ("C", 4, vec!["Z"], vec![5.0]),
        ]);
        assert_eq!(2, table.qty_clusters());
    }
}
