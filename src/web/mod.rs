pub mod routes;

use crate::config::Config;
use actix_web::{middleware, web::Data, App, HttpServer};
use log::info;
use std::sync::Arc;

pub async fn start_web_server(config: Arc<Config>) -> std::io::Result<()> {
    let bind_address = config.bind_address.clone();
    info!("Listening on http://{}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(Data::new(config.clone()))
            .service(routes::index)
            .service(routes::profile)
            .service(routes::comment)
            .service(routes::categorized_comment)
            .wrap(middleware::Logger::default())
    })
    .bind(bind_address)?
    .run()
    .await
}
