use serde::Serialize;

pub mod catalog_resource;
pub mod index_resource;
pub mod recommend_resource;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl ToString) -> Self {
        ErrorBody {
            error: error.to_string(),
        }
    }
}
