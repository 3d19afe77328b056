mod data;
mod page;
mod routes;

use std::sync::Arc;

use crate::{
    Result,
    config::Config,
    router::{ RouteTable, TitleFormat },
};
pub use data::Data;
pub use page::{ render, Page };

use actix_web::{ middleware, web, App, HttpServer };

pub fn start(config: &Config, table: Arc<RouteTable>) -> Result<()> {
    let title_format = TitleFormat::from_config(&config.router)?;
    let assets_dir = config.www.assets_dir.clone();
    if !assets_dir.is_dir() {
        log::warn!("Assets directory {} does not exist", assets_dir.display());
    }

    log::info!("Serving {} routes on {}", table.len(), config.www.base_url);
    HttpServer::new(move || {
        App::new()
            .data(Data {
                table: table.clone(),
                title_format: title_format.clone(),
            })
            .wrap(middleware::Logger::default())
            .service(actix_files::Files::new("/assets", assets_dir.clone()))
            .service(web::resource("/api/routes").route(web::get().to(routes::handler)))
            .default_service(web::route().to(page::handler))
    })
    .workers(config.www.workers)
    .bind(format!("{}:{}", config.www.bind_host, config.www.bind_port))?
    .run()?;

    Ok(())
}
