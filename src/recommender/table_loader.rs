use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

use hashbrown::{HashMap, HashSet};
use log::info;
use serde::de::DeserializeOwned;

use crate::error::TableLoadError;
use crate::recommender::cluster_table::{ClusterEntry, ClusterTable};
use crate::recommender::neighbor_table::{NeighborEntry, NeighborTable};

/// Reads the bincode-serialized neighbor table artifact and validates its
/// structure. Any failure here is fatal; the service must not start serving
/// with a partial or malformed table.
pub fn load_neighbor_table(path: &str) -> Result<NeighborTable, TableLoadError> {
    let start_time = Instant::now();
    let entries: HashMap<String, NeighborEntry> = read_artifact(path)?;
    for (item, entry) in entries.iter() {
        validate_parallel_lists(item, &entry.neighbors, &entry.ratings)?;
    }
    info!(
        "loaded neighbor table with {} entries from {} in {} micros",
        entries.len(),
        path,
        start_time.elapsed().as_micros()
    );
    Ok(NeighborTable::new(entries))
}

/// Reads and validates the bincode-serialized cluster table artifact.
pub fn load_cluster_table(path: &str) -> Result<ClusterTable, TableLoadError> {
    let start_time = Instant::now();
    let entries: HashMap<String, ClusterEntry> = read_artifact(path)?;
    for (item, entry) in entries.iter() {
        validate_parallel_lists(item, &entry.neighbors, &entry.ratings)?;
    }
    info!(
        "loaded cluster table with {} entries from {} in {} micros",
        entries.len(),
        path,
        start_time.elapsed().as_micros()
    );
    Ok(ClusterTable::new(entries))
}

fn read_artifact<T: DeserializeOwned>(path: &str) -> Result<T, TableLoadError> {
    let file = File::open(path).map_err(|source| TableLoadError::Io {
        path: path.to_string(),
        source,
    })?;
    bincode::deserialize_from(BufReader::new(file)).map_err(|source| TableLoadError::Decode {
        path: path.to_string(),
        source,
    })
}

fn validate_parallel_lists(
    item: &str,
    neighbors: &[String],
    ratings: &[f64],
) -> Result<(), TableLoadError> {
    if neighbors.len() != ratings.len() {
        return Err(TableLoadError::InvalidEntry {
            item: item.to_string(),
            reason: format!(
                "{} neighbors but {} ratings",
                neighbors.len(),
                ratings.len()
            ),
        });
    }
    let mut distinct: HashSet<&str> = HashSet::with_capacity(neighbors.len());
    for neighbor in neighbors {
        if neighbor == item {
            return Err(TableLoadError::InvalidEntry {
                item: item.to_string(),
                reason: "lists itself as a neighbor".to_string(),
            });
        }
        if !distinct.insert(neighbor) {
            return Err(TableLoadError::InvalidEntry {
                item: item.to_string(),
                reason: format!("duplicate neighbor '{}'", neighbor),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod table_loader_test {
    use std::io::Write;
    use std::path::PathBuf;

    use super::*;

    struct ScratchFile {
        path: PathBuf,
    }

    impl ScratchFile {
        fn write(tag: &str, bytes: &[u8]) -> Self {
            let path = std::env::temp_dir().join(format!(
                "cuppa-loader-{}-{}.bin",
                tag,
                std::process::id()
            ));
            let mut file = File::create(&path).unwrap();
            file.write_all(bytes).unwrap();
            ScratchFile { path }
        }

        fn path_str(&self) -> &str {
            self.path.to_str().unwrap()
        }
    }

    impl Drop for ScratchFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }

    fn neighbor_artifact(rows: Vec<(&str, Vec<&str>, Vec<f64>)>) -> Vec<u8> {
        let entries: HashMap<String, NeighborEntry> = rows
            .into_iter()
            .map(|(name, neighbors, ratings)| {
                (
                    name.to_string(),
                    NeighborEntry {
                        neighbors: neighbors.into_iter().map(str::to_string).collect(),
                        ratings,
                    },
                )
            })
            .collect();
        bincode::serialize(&entries).unwrap()
    }

    #[test]
    fn loads_a_valid_neighbor_artifact() {
        let bytes = neighbor_artifact(vec![("A", vec!["B", "C"], vec![3.0, 5.0])]);
        let scratch = ScratchFile::write("valid", &bytes);

        let table = load_neighbor_table(scratch.path_str()).unwrap();
        assert_eq!(1, table.len());
        assert_eq!(2, table.neighborhood_size());
        assert_eq!("C", table.recommend(&["A"]).unwrap());
    }

    #[test]
    fn loads_a_valid_cluster_artifact() {
        let mut entries: HashMap<String, ClusterEntry> = HashMap::new();
        entries.insert(
            "A".to_string(),
            ClusterEntry {
                cluster: 3,
                neighbors: vec!["X".to_string()],
                ratings: vec![7.5],
            },
        );
        let scratch = ScratchFile::write("cluster", &bincode::serialize(&entries).unwrap());

        let table = load_cluster_table(scratch.path_str()).unwrap();
        assert_eq!(1, table.len());
        assert_eq!("X", table.recommend(&["A"]).unwrap());
    }

    #[test]
    fn missing_artifact_is_an_io_error() {
        let result = load_neighbor_table("/nonexistent/knn_table.bin");
        assert!(matches!(result, Err(TableLoadError::Io { .. })));
    }

    #[test]
    fn truncated_artifact_is_a_decode_error() {
        let scratch = ScratchFile::write("truncated", &[0x01, 0x02, 0x03]);
        let result = load_neighbor_table(scratch.path_str());
        assert!(matches!(result, Err(TableLoadError::Decode { .. })));
    }

    #[test]
    fn mismatched_parallel_lists_are_rejected() {
        let bytes = neighbor_artifact(vec![("A", vec!["B", "C"], vec![3.0])]);
        let scratch = ScratchFile::write("mismatch", &bytes);
        let result = load_neighbor_table(scratch.path_str());
        assert!(matches!(result, Err(TableLoadError::InvalidEntry { .. })));
    }

    #[test]
    fn self_referencing_entries_are_rejected() {
        let bytes = neighbor_artifact(vec![("A", vec!["A"], vec![3.0])]);
        let scratch = ScratchFile::write("selfref", &bytes);
        let result = load_neighbor_table(scratch.path_str());
        assert!(matches!(result, Err(TableLoadError::InvalidEntry { .. })));
    }

    #[test]
    fn duplicate_neighbors_are_rejected() {
        let bytes = neighbor_artifact(vec![("A", vec!["B", "B"], vec![3.0, 4.0])]);
        let scratch = ScratchFile::write("duplicate", &bytes);
        let result = load_neighbor_table(scratch.path_str());
        assert!(matches!(result, Err(TableLoadError::InvalidEntry { .. })));
    }
}
