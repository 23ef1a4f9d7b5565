pub mod extraction_route;
pub mod home_route;
pub mod insights_route;

use actix_web::HttpResponse;
use askama::Template;

pub(crate) fn render(template: impl Template) -> HttpResponse {
    match template.render() {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render template: {:?}", e);
            HttpResponse::InternalServerError().body("Failed to render page")
        }
    }
}
