//! main file for the server

pub(crate) mod model;
pub(crate) mod store;
mod controller;
mod query;
mod state;
mod util;

use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{web, App, HttpServer};
use log::{info, warn};
use crate::server::model::config::ServerConfig;
use crate::server::state::AppState;
use crate::server::store::RecordStore;

/// Run the server
pub(crate) async fn run(
    ServerConfig { addr, per_page, .. }: ServerConfig,
    store: RecordStore,
) -> std::io::Result<()> {
    if store.is_empty() {
        warn!("no orders loaded, every query will return an empty page");
    }
    info!("serving {} orders on {}, per_page={}", store.len(), addr, per_page);
    let state = web::Data::new(AppState::new(store, per_page));
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(NormalizePath::trim())
            .wrap(Logger::default())
            .configure(controller::configure)
    })
        .bind(addr)?
        .run()
        .await
}
