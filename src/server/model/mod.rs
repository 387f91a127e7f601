use serde::Deserialize;

pub(crate) mod config;
pub(crate) mod order;
pub(crate) mod record;

/// Raw `/CustomerOrders` query string. Values stay as received so they can be echoed back.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct CustomerOrdersParams {
    pub page: Option<String>,
    pub month: Option<String>,
    pub year: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub last_load: Option<String>,
}
