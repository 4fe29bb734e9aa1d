extern crate sys_info;

use actix_web::{get, web, HttpResponse};

use crate::state::SharedHandlesAndConfig;
use web::Data;

#[get("/internal")]
pub async fn internal(config: Data<SharedHandlesAndConfig>) -> HttpResponse {
    let mut html = "<html>cuppa: coffee recommendations from precomputed similarity tables.<br />"
        .to_string();

    let catalog_stats = config.catalog.stats();
    html.push_str("<h3>Catalog</h3>");
    html.push_str("Qty Coffees: ");
    html.push_str(&catalog_stats.qty_records.to_string());
    html.push_str("<br />Rating min: ");
    html.push_str(&catalog_stats.rating_min.to_string());
    html.push_str(" mean: ");
    html.push_str(&format!("{:.2}", catalog_stats.rating_mean));
    html.push_str(" max: ");
    html.push_str(&catalog_stats.rating_max.to_string());

    let neighbor_table = config.recommender.neighbor_table();
    let cluster_table = config.recommender.cluster_table();
    html.push_str("<h3>Similarity tables</h3>");
    html.push_str("Neighbor table entries: ");
    html.push_str(&neighbor_table.len().to_string());
    html.push_str("<br />k (neighborhood size): ");
    html.push_str(&neighbor_table.neighborhood_size().to_string());
    html.push_str("<br />Cluster table entries: ");
    html.push_str(&cluster_table.len().to_string());
    html.push_str("<br />Qty distinct clusters: ");
    html.push_str(&cluster_table.qty_clusters().to_string());
    html.push_str("<br />Strategies: neighbors | cluster");
    html.push_str("<br /><a href=\"/v1/recommend?first=Kenya%20Nyeri%20AA%20Ichuga&strategy=neighbors\">v1 endpoint of our model</a>");

    html.push_str("<h3>Machine instance</h3>");
    html.push_str("<br />Qty CPU's detected: ");
    html.push_str(&*sys_info::cpu_num().unwrap_or(0).to_string());
    html.push_str("<br />Qty actix workers set: ");
    html.push_str(&config.qty_workers.to_string());
    html.push_str("<br />CPU speed: ");
    html.push_str(&*sys_info::cpu_speed().unwrap_or(0).to_string());
    html.push_str("MHz");
    html.push_str("<br />Active processes on instance: ");
    html.push_str(&*sys_info::proc_total().unwrap_or(0).to_string());
    html.push_str("<h3>Metrics</h3>");
    html.push_str("<a href=\"/internal/prometheus\">prometheus</a>");
    html.push_str("</html>");

    HttpResponse::Ok().body(html)
}
