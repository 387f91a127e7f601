use serde::Serialize;
use crate::server::model::record::OrderRecord;

#[derive(Debug, Serialize)]
pub(crate) struct GetCustomerOrdersResponse<'a> {
    pub page: usize,
    pub per_page: usize,
    /// count after filtering, before pagination
    pub total_rows: usize,
    pub has_more: bool,
    pub next_page: Option<String>,
    pub data: &'a [&'a OrderRecord],
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorResponse {
    pub error: String,
}
