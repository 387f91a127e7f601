use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use log::{debug, warn};
use crate::server::controller::error::QueryError;
use crate::server::controller::CUSTOMER_ORDERS_ROUTE;
use crate::server::model::order::GetCustomerOrdersResponse;
use crate::server::model::CustomerOrdersParams;
use crate::server::query::OrdersQuery;
use crate::server::state::AppState;

#[get("/CustomerOrders", name = "customer_orders")]
/// page through the loaded orders, optionally filtered by date
pub(crate) async fn get_customer_orders(req: HttpRequest, data: web::Data<AppState>) -> Result<impl Responder, QueryError> {
    let params = web::Query::<CustomerOrdersParams>::from_query(req.query_string())
        .map_err(|e| QueryError::MalformedQuery { message: e.to_string() })?
        .into_inner();
    let query = OrdersQuery::parse(&params).inspect_err(|e| warn!("rejected orders query, {}", e))?;

    let page = query.run(data.store().records(), data.per_page());
    debug!(
        "orders query filter={:?} page={} matched={}",
        query.filter, page.page, page.total_rows
    );
    let next_page = match (page.has_more, query.link_params()) {
        (true, Some(link_params)) => next_page_link(&req, page.page + 1, link_params),
        _ => None,
    };

    Ok(HttpResponse::Ok().json(GetCustomerOrdersResponse {
        page: page.page,
        per_page: page.per_page,
        total_rows: page.total_rows,
        has_more: page.has_more,
        next_page,
        data: &page.data,
    }))
}

/// Absolute link to `page` with the filter parameters echoed as received.
fn next_page_link(req: &HttpRequest, page: usize, link_params: &[(&'static str, String)]) -> Option<String> {
    let mut url = match req.url_for_static(CUSTOMER_ORDERS_ROUTE) {
        Ok(url) => url,
        Err(e) => {
            warn!("failed to build next page link, {}", e);
            return None;
        }
    };
    url.query_pairs_mut()
        .append_pair("page", &page.to_string())
        .extend_pairs(link_params.iter().map(|(name, value)| (*name, value.as_str())));
    Some(url.to_string())
}
