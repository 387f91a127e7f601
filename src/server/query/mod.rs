//! Parsing, filtering and paging for `/CustomerOrders`

pub(crate) mod filter;

use crate::server::controller::error::QueryError;
use crate::server::model::record::OrderRecord;
use crate::server::model::CustomerOrdersParams;
use crate::server::query::filter::{FilterMode, LinkParams};

/// A validated orders request.
#[derive(Debug)]
pub(crate) struct OrdersQuery {
    pub page: usize,
    pub filter: FilterMode,
    link_params: LinkParams,
}

/// One page of the filtered orders.
#[derive(Debug)]
pub(crate) struct Page<'a> {
    pub page: usize,
    pub per_page: usize,
    pub total_rows: usize,
    pub has_more: bool,
    pub data: Vec<&'a OrderRecord>,
}

impl OrdersQuery {
    /// Validate the page number first, then the filter parameters as a unit.
    pub fn parse(params: &CustomerOrdersParams) -> Result<Self, QueryError> {
        let page = parse_page(params.page.as_deref())?;
        let (filter, link_params) = FilterMode::from_params(params)?;
        Ok(Self {
            page,
            filter,
            link_params,
        })
    }

    /// Filter parameters for the next-page link. Unfiltered queries never get one.
    pub fn link_params(&self) -> Option<&[(&'static str, String)]> {
        self.filter.is_filtered().then_some(self.link_params.as_slice())
    }

    /// Apply the filter to a fresh view of `records` and cut out the requested page.
    pub fn run<'a>(&self, records: &'a [OrderRecord], per_page: usize) -> Page<'a> {
        let matched = records
            .iter()
            .filter(|record| self.filter.matches(record))
            .collect::<Vec<_>>();
        paginate(matched, self.page, per_page)
    }
}

fn parse_page(raw: Option<&str>) -> Result<usize, QueryError> {
    let Some(raw) = raw else {
        return Ok(1);
    };
    match raw.trim().parse::<i64>() {
        Ok(page) if page > 0 => usize::try_from(page).map_err(|_| QueryError::InvalidPage),
        _ => Err(QueryError::InvalidPage),
    }
}

pub(crate) fn paginate(matched: Vec<&OrderRecord>, page: usize, per_page: usize) -> Page<'_> {
    let total_rows = matched.len();
    let start = page.saturating_sub(1).saturating_mul(per_page);
    let end = start.saturating_add(per_page);
    let data = matched
        .into_iter()
        .skip(start)
        .take(per_page)
        .collect();
    Page {
        page,
        per_page,
        total_rows,
        has_more: end < total_rows,
        data,
    }
}
