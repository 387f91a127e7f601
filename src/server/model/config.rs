use std::net::SocketAddrV4;
use std::path::PathBuf;

/// Server configs
#[derive(Debug)]
pub(crate) struct ServerConfig {
    pub addr: SocketAddrV4,
    /// spreadsheet the orders are loaded from at startup
    pub orders_file: PathBuf,
    /// fixed page size, never taken from the request
    pub per_page: usize,
}

impl ServerConfig {
    pub fn new(addr: SocketAddrV4, orders_file: PathBuf, per_page: usize) -> Self {
        Self {
            addr,
            orders_file,
            per_page,
        }
    }
}
