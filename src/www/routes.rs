use super::Data;

use actix_web::{ web, HttpResponse };

pub fn handler(data: web::Data<Data>) -> HttpResponse {
    HttpResponse::Ok().json(data.table.summaries())
}
