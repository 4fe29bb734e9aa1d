use actix_web::{get, web, HttpResponse};
use serde::Deserialize;

use crate::endpoints::ErrorBody;
use crate::state::SharedHandlesAndConfig;

const DEFAULT_SAMPLE_SIZE: usize = 15;

#[derive(Debug, Deserialize)]
pub struct SampleQueryParams {
    sample: Option<usize>,
}

// Random catalog names for the coffee pickers in the frontend.
#[get("/v1/items")]
pub async fn v1_item_sample(
    data: web::Data<SharedHandlesAndConfig>,
    query: web::Query<SampleQueryParams>,
) -> HttpResponse {
    let qty = query.sample.unwrap_or(DEFAULT_SAMPLE_SIZE);
    let names = data.catalog.sample(qty, &mut rand::thread_rng());
    HttpResponse::Ok().json(names)
}

// Full catalog record for one coffee, used to render the comparison between
// the inputs and the recommendation.
#[get("/v1/items/{name}")]
pub async fn v1_item_detail(
    data: web::Data<SharedHandlesAndConfig>,
    path: web::Path<String>,
) -> HttpResponse {
    match data.catalog.get(&path) {
        Some(record) => HttpResponse::Ok().json(record),
        None => HttpResponse::NotFound()
            .json(ErrorBody::new(format!("unknown item: {}", path.as_str()))),
    }
}
