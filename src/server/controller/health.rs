use actix_web::{get, HttpResponse};

#[get("/")]
pub(crate) async fn health() -> HttpResponse {
    HttpResponse::Ok().body("OK")
}
