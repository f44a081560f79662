// Route exports
pub mod predict;

use actix_web::{web, HttpResponse};

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// The single-page form
async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .service(
            web::scope("/api/v1")
                .configure(predict::configure),
        );
}
