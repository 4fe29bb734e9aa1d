use std::time::Instant;

use anyhow::Context;
use hashbrown::HashMap;
use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One row of the cleaned coffee catalog. The recommendation core only needs
/// names and ratings; the remaining fields are served to presentation layers
/// for side-by-side comparison of inputs and recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoffeeRecord {
    pub name: String,
    pub roast: String,
    pub country: String,
    pub origin: String,
    pub roaster: String,
    pub rating: f64,
    pub price_per_ounce: f64,
    pub aroma: f64,
    pub acid: f64,
    pub body: f64,
    pub flavor: f64,
    pub aftertaste: f64,
}

/// Immutable, name-keyed view of the coffee catalog, loaded once at startup.
pub struct Catalog {
    records: Vec<CoffeeRecord>,
    name_to_index: HashMap<String, usize>,
}

pub struct CatalogStats {
    pub qty_records: usize,
    pub rating_min: f64,
    pub rating_mean: f64,
    pub rating_max: f64,
}

impl Catalog {
    pub fn from_csv(path: &str) -> anyhow::Result<Self> {
        let start_time = Instant::now();
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("cannot open catalog file {}", path))?;

        let mut records: Vec<CoffeeRecord> = Vec::new();
        let mut name_to_index: HashMap<String, usize> = HashMap::new();
        for result in reader.deserialize() {
            let record: CoffeeRecord =
                result.with_context(|| format!("malformed catalog record in {}", path))?;
            // The cleaned catalog should be unique by name; keep the first
            // occurrence if it is not.
            if !name_to_index.contains_key(&record.name) {
                name_to_index.insert(record.name.clone(), records.len());
                records.push(record);
            }
        }

        info!(
            "loaded catalog with {} coffees from {} in {} micros",
            records.len(),
            path,
            start_time.elapsed().as_micros()
        );
        Ok(Catalog {
            records,
            name_to_index,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&CoffeeRecord> {
        self.name_to_index
            .get(name)
            .map(|index| &self.records[*index])
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|record| record.name.as_str())
    }

    /// Up to `n` distinct random coffee names, for the "surprise me" pickers.
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<String> {
        let qty = n.min(self.records.len());
        rand::seq::index::sample(rng, self.records.len(), qty)
            .iter()
            .map(|index| self.records[index].name.clone())
            .collect()
    }

    pub fn stats(&self) -> CatalogStats {
        let mut rating_min = f64::INFINITY;
        let mut rating_max = f64::NEG_INFINITY;
        let mut rating_sum = 0.0;
        for record in self.records.iter() {
            rating_min = rating_min.min(record.rating);
            rating_max = rating_max.max(record.rating);
            rating_sum += record.rating;
        }
        if self.records.is_empty() {
            rating_min = 0.0;
            rating_max = 0.0;
        }
        CatalogStats {
            qty_records: self.records.len(),
            rating_min,
            rating_mean: rating_sum / self.records.len().max(1) as f64,
            rating_max,
        }
    }
}
