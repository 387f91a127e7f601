pub(crate) mod error;
mod health;
mod orders;

use actix_web::web;

/// Route name of the orders endpoint, used to build next-page links.
pub(crate) const CUSTOMER_ORDERS_ROUTE: &str = "customer_orders";

pub(crate) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(orders::get_customer_orders);
}
