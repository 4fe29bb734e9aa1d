use std::str::FromStr;

use thiserror::Error;

use crate::error::{RecommendError, TableLoadError};
use crate::recommender::cluster_table::ClusterTable;
use crate::recommender::neighbor_table::NeighborTable;

pub mod cluster_table;
pub mod neighbor_table;
pub mod table_loader;

/// Which precomputed table a recommendation request consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Neighbors,
    Cluster,
}

#[derive(Debug, Error)]
#[error("unknown strategy '{0}', expected 'neighbors' or 'cluster'")]
pub struct ParseStrategyError(String);

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "neighbors" => Ok(Strategy::Neighbors),
            "cluster" => Ok(Strategy::Cluster),
            other => Err(ParseStrategyError(other.to_string())),
        }
    }
}

/// Both similarity tables behind a single read-only handle.
pub struct Recommender {
    neighbors: NeighborTable,
    clusters: ClusterTable,
}

impl Recommender {
    pub fn new(neighbors: NeighborTable, clusters: ClusterTable) -> Self {
        Recommender {
            neighbors,
            clusters,
        }
    }

    pub fn load(
        neighbor_table_path: &str,
        cluster_table_path: &str,
    ) -> Result<Self, TableLoadError> {
        let neighbors = table_loader::load_neighbor_table(neighbor_table_path)?;
        let clusters = table_loader::load_cluster_table(cluster_table_path)?;
        Ok(Recommender::new(neighbors, clusters))
    }

    pub fn recommend(&self, strategy: Strategy, inputs: &[&str]) -> Result<String, RecommendError> {
        match strategy {
            Strategy::Neighbors => self.neighbors.recommend(inputs),
            Strategy::Cluster => self.clusters.recommend(inputs),
        }
    }

    pub fn neighbor_table(&self) -> &NeighborTable {
        &self.neighbors
    }

    pub fn cluster_table(&self) -> &ClusterTable {
        &self.clusters
    }
}

/// Argmax over (name, rating) candidates. The first maximum wins: a later
/// candidate replaces the current winner only with a strictly higher rating.
pub(crate) fn pick_best<'a, I>(candidates: I) -> Option<String>
where
    I: Iterator<Item = (&'a str, f64)>,
{
    let mut best: Option<(&'a str, f64)> = None;
    for (name, rating) in candidates {
        let better = match best {
            None => true,
            Some((_, top_rating)) => rating > top_rating,
        };
        if better {
            best = Some((name, rating));
        }
    }
    best.map(|(name, _)| name.to_string())
}

#[cfg(test)]
mod strategy_test {
    use hashbrown::HashMap;

    use super::*;
    use crate::recommender::cluster_table::ClusterEntry;
    use crate::recommender::neighbor_table::NeighborEntry;

    fn recommender_fixture() -> Recommender {
        let mut neighbor_entries = HashMap::new();
        neighbor_entries.insert(
            "Kenya Nyeri AA Ichuga".to_string(),
            NeighborEntry {
                neighbors: vec!["Ethiopia Yirgacheffe".to_string()],
                ratings: vec![9.0],
            },
        );
        let mut cluster_entries = HashMap::new();
        cluster_entries.insert(
            "Kenya Nyeri AA Ichuga".to_string(),
            ClusterEntry {
                cluster: 2,
                neighbors: vec!["Sumatra Mandheling".to_string()],
                ratings: vec![8.0],
            },
        );
        Recommender::new(
            NeighborTable::new(neighbor_entries),
            ClusterTable::new(cluster_entries),
        )
    }

    #[test]
    fn parses_known_strategies() {
        assert_eq!(Strategy::Neighbors, "neighbors".parse().unwrap());
        assert_eq!(Strategy::Cluster, "cluster".parse().unwrap());
        assert!("knn".parse::<Strategy>().is_err());
    }

    #[test]
    fn dispatches_to_the_selected_table() {
        let recommender = recommender_fixture();
        let inputs = vec!["Kenya Nyeri AA Ichuga"];

        let by_neighbors = recommender.recommend(Strategy::Neighbors, &inputs).unwrap();
        assert_eq!("Ethiopia Yirgacheffe", by_neighbors);

        let by_cluster = recommender.recommend(Strategy::Cluster, &inputs).unwrap();
        assert_eq!("Sumatra Mandheling", by_cluster);
    }

    #[test]
    fn first_maximum_wins_on_rating_ties() {
        let candidates = vec![("first", 8.5), ("second", 8.5), ("third", 7.0)];
        let winner = pick_best(candidates.into_iter()).unwrap();
        assert_eq!("first", winner);
    }

    #[test]
    fn empty_candidates_yield_no_winner() {
        assert!(pick_best(std::iter::empty()).is_none());
    }
}
