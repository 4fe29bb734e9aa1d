use std::sync::Arc;

use crate::catalog::Catalog;
use crate::recommender::Recommender;

/// Read-only handles shared with every actix worker. Tables and catalog are
/// loaded once before the server binds and are never mutated afterwards.
pub struct SharedHandlesAndConfig {
    pub recommender: Arc<Recommender>,
    pub catalog: Arc<Catalog>,
    pub qty_workers: usize,
}
