extern crate cuppa;

use actix_web::{
    http::ContentEncoding, middleware, web, App, HttpRequest, HttpResponse, HttpServer,
};
use actix_web_prom::PrometheusMetrics;

use actix_web::http::header;
use log::info;
use std::sync::Arc;

use cuppa::catalog::Catalog;
use cuppa::config::AppConfig;
use cuppa::endpoints::catalog_resource::{v1_item_detail, v1_item_sample};
use cuppa::endpoints::index_resource::internal;
use cuppa::endpoints::recommend_resource::v1_recommend;
use cuppa::recommender::Recommender;
use cuppa::state::SharedHandlesAndConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).unwrap_or_default();
    let config = AppConfig::new(config_path);

    let log_level = if config.log.level.is_empty() {
        "info"
    } else {
        &config.log.level
    };
    env_logger::Builder::new().parse_filters(log_level).init();

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    let qty_workers = config.server.num_workers;

    let catalog = Arc::new(Catalog::from_csv(&config.data.catalog_path)?);
    let recommender = Arc::new(Recommender::load(
        &config.data.neighbor_table_path,
        &config.data.cluster_table_path,
    )?);

    info!("start metrics");
    let prometheus = PrometheusMetrics::new("api", Some("/internal/prometheus"), None);

    info!("Done. start httpd at http://{}", &bind_address);
    HttpServer::new(move || {
        let handles_and_config = SharedHandlesAndConfig {
            recommender: recommender.clone(),
            catalog: catalog.clone(),
            qty_workers,
        };

        App::new()
            .wrap(middleware::Compress::new(ContentEncoding::Identity))
            .wrap(prometheus.clone())
            .wrap(
                middleware::DefaultHeaders::new()
                    .header("Cache-Control", "no-cache, no-store, must-revalidate")
                    .header("Pragma", "no-cache")
                    .header("Expires", "0"),
            )
            .data(handles_and_config)
            .service(v1_recommend)
            .service(v1_item_detail)
            .service(v1_item_sample)
            .service(internal)
            .service(web::resource("/").route(web::get().to(|_req: HttpRequest| {
                HttpResponse::Found()
                    .header(header::LOCATION, "/internal")
                    .finish()
            })))
    })
    .workers(qty_workers)
    .bind(&bind_address)
    .unwrap_or_else(|_| panic!("Could not bind server to address {}", &bind_address))
    .run()
    .await?;

    Ok(())
}
