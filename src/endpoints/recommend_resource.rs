use actix_web::{get, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::endpoints::ErrorBody;
use crate::error::RecommendError;
use crate::recommender::Strategy;
use crate::state::SharedHandlesAndConfig;

#[derive(Debug, Deserialize)]
pub struct V1QueryParams {
    first: String,
    second: Option<String>,
    strategy: String,
}

#[derive(Debug, Serialize)]
pub struct V1Recommendation {
    recommendation: String,
    inputs: Vec<String>,
}

// Cuppa's main endpoint. Takes one or two liked coffees and a strategy and
// answers with a single recommended coffee plus the echoed inputs, so the
// caller can render a side-by-side comparison.
#[get("/v1/recommend")]
pub async fn v1_recommend(
    data: web::Data<SharedHandlesAndConfig>,
    query: web::Query<V1QueryParams>,
) -> HttpResponse {
    let strategy = match query.strategy.parse::<Strategy>() {
        Ok(strategy) => strategy,
        Err(err) => return HttpResponse::BadRequest().json(ErrorBody::new(err)),
    };

    let mut inputs: Vec<&str> = vec![query.first.as_str()];
    if let Some(second) = &query.second {
        inputs.push(second.as_str());
    }

    match data.recommender.recommend(strategy, &inputs) {
        Ok(recommendation) => HttpResponse::Ok().json(V1Recommendation {
            recommendation,
            inputs: inputs.iter().map(|name| name.to_string()).collect(),
        }),
        Err(err @ RecommendError::UnknownItem(_)) => {
            HttpResponse::NotFound().json(ErrorBody::new(err))
        }
        Err(err @ RecommendError::InvalidInputCount(_)) => {
            HttpResponse::BadRequest().json(ErrorBody::new(err))
        }
        // A table entry that exists but is empty is a data defect in the
        // precomputed artifact.
        Err(err @ RecommendError::EmptyCandidatePool) => {
            HttpResponse::InternalServerError().json(ErrorBody::new(err))
        }
    }
}
