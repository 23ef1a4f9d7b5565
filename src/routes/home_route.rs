use actix_web::{get, HttpResponse};
use askama::Template;

use crate::routes::render;

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate;

#[get("/")]
async fn home() -> HttpResponse {
    render(HomeTemplate)
}
