//! application entry point

use crate::server::model::config::ServerConfig;
use crate::server::store::RecordStore;
use derive_more::Display;
use log::{info, warn};
use std::env;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::path::{Path, PathBuf};
use std::str::FromStr;

mod server;

const HOST_PARSING_FAILED_MSG: &str = "failed to parse HOST, aborting";
const PORT_PARSING_FAILED_MSG: &str = "failed to parse PORT, aborting";
const PER_PAGE_PARSING_FAILED_MSG: &str = "failed to parse PER_PAGE, aborting";
const DEFAULT_HOST: Ipv4Addr = Ipv4Addr::UNSPECIFIED;
const DEFAULT_PORT: u16 = 10000;
const DEFAULT_ORDERS_FILE: &str = "CustomerOrders.xlsx";
const DEFAULT_PER_PAGE: usize = 5000;

#[actix_web::main()]
async fn main() -> std::io::Result<()> {
    // bootstrap
    // a. env
    let env = env::var("APP_ENV")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(Env::Dev); // default dev env if absent

    let dotenv_result = match env {
        Env::Prod | Env::Stg => Ok(()), // provided by the deployment
        Env::Dev => dotenvy::from_path(Path::new(".env.dev")),
    };

    // b. logging
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    if let Err(e) = dotenv_result {
        warn!("no .env.dev loaded, using process env only: {}", e);
    }

    // c. config
    let host = env::var("HOST")
        .ok()
        .map(|v| Ipv4Addr::from_str(&v).expect(HOST_PARSING_FAILED_MSG))
        .unwrap_or(DEFAULT_HOST);
    let port = env::var("PORT")
        .ok()
        .map(|v| v.parse::<u16>().expect(PORT_PARSING_FAILED_MSG))
        .unwrap_or(DEFAULT_PORT);
    let per_page = env::var("PER_PAGE")
        .ok()
        .map(|v| {
            v.parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .expect(PER_PAGE_PARSING_FAILED_MSG)
        })
        .unwrap_or(DEFAULT_PER_PAGE);
    let config = ServerConfig::new(
        SocketAddrV4::new(host, port),
        env::var("ORDERS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_ORDERS_FILE)),
        per_page,
    );

    info!("App is starting in env={}", env);

    // d. load orders once, then serve
    let store = RecordStore::load(&config.orders_file);

    server::run(config, store).await
}

#[derive(Debug, Display)]
#[non_exhaustive]
enum Env {
    Dev,
    Stg,
    Prod,
}

impl FromStr for Env {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Self::Dev),
            "stg" => Ok(Self::Stg),
            "prod" => Ok(Self::Prod),
            s => Err(format!("Invalid Env: {s}")),
        }
    }
}
